use permlp_solver::LpDocument;
use thiserror::Error;

use crate::constraints::{InequalitySystem, combined_rows, monotonicity_rows, spacing_rows};
use crate::objective::{ObjectiveError, parse_objective};
use crate::permutation::{Permutation, PermutationError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid permutation: {0}")]
    InvalidPermutation(#[from] PermutationError),
    #[error(transparent)]
    Objective(#[from] ObjectiveError),
}

/// Encodes two permutations and an objective expression as one LP document.
///
/// The inequality system concatenates the three generator families in a
/// fixed order (monotonicity, then spacing, then combined) because
/// downstream violation reports reference rows by index. Any error aborts
/// the whole encoding; no partial document is produced.
pub fn encode(
    p1: &Permutation,
    p2: &Permutation,
    objective_expression: &str,
) -> Result<LpDocument, EncodeError> {
    if p1.len() != p2.len() {
        return Err(PermutationError::LengthMismatch {
            left: p1.len(),
            right: p2.len(),
        }
        .into());
    }
    let n = p1.len();

    let objective = parse_objective(objective_expression, n)?;
    let q1 = p1.inverse();
    let q2 = p2.inverse();

    let mut system = InequalitySystem::new(2 * n);
    system.extend(monotonicity_rows(p1, p2));
    system.extend(spacing_rows(p1, p2, &q1, &q2));
    system.extend(combined_rows(p1, p2, &q1, &q2));
    let (inequality_matrix, inequality_rhs) = system.into_parts();

    Ok(LpDocument {
        objective,
        inequality_matrix,
        inequality_rhs,
        equality_matrix: Vec::new(),
        equality_rhs: Vec::new(),
        bounds: vec![(0.0, None); 2 * n],
        variable_names: variable_names(n),
    })
}

/// `x_1..x_n` followed by `y_1..y_n`, the same spelling the objective
/// grammar accepts.
pub fn variable_names(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("x_{i}"))
        .chain((1..=n).map(|i| format!("y_{i}")))
        .collect()
}
