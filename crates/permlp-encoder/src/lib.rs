pub mod constraints;
pub mod encoder;
pub mod input;
pub mod objective;
pub mod permutation;

pub use constraints::{InequalitySystem, Row, combined_rows, monotonicity_rows, spacing_rows};
pub use encoder::{EncodeError, encode, variable_names};
pub use input::{InputError, ProblemInput};
pub use objective::{ObjectiveError, parse_objective};
pub use permutation::{Permutation, PermutationError, RankMap};
