use permlp_solver::LpDocument;
use thiserror::Error;

use crate::encoder::{EncodeError, encode};
use crate::permutation::Permutation;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("expected three input lines (P1, P2, objective), found {0}")]
    MissingLines(usize),
    #[error("line {line} has a non-integer token `{token}`")]
    BadInteger { line: usize, token: String },
}

/// The textual problem format: P1 and P2 as whitespace-separated integers
/// on the first two lines, the objective expression on the third.
///
/// Parsing stops at structure; the values are validated as permutations
/// when the input is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInput {
    pub p1: Vec<i64>,
    pub p2: Vec<i64>,
    pub objective: String,
}

impl ProblemInput {
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut lines = text.lines();
        let (Some(first), Some(second), Some(third)) =
            (lines.next(), lines.next(), lines.next())
        else {
            return Err(InputError::MissingLines(text.lines().count()));
        };

        Ok(Self {
            p1: parse_integer_line(first, 1)?,
            p2: parse_integer_line(second, 2)?,
            objective: third.trim().to_string(),
        })
    }

    /// Validates both permutations and runs the full encoding.
    pub fn encode(&self) -> Result<LpDocument, EncodeError> {
        let p1 = Permutation::new(self.p1.clone())?;
        let p2 = Permutation::new(self.p2.clone())?;
        encode(&p1, &p2, &self.objective)
    }
}

fn parse_integer_line(line: &str, line_number: usize) -> Result<Vec<i64>, InputError> {
    line.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| InputError::BadInteger {
                line: line_number,
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_lines() {
        let input = ProblemInput::parse("1 2 3\n3 1 2\nx_1 + 2 y_2\n").unwrap();
        assert_eq!(input.p1, vec![1, 2, 3]);
        assert_eq!(input.p2, vec![3, 1, 2]);
        assert_eq!(input.objective, "x_1 + 2 y_2");
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let input = ProblemInput::parse("  2   1 \n 1 2\n  x_1 \n").unwrap();
        assert_eq!(input.p1, vec![2, 1]);
        assert_eq!(input.p2, vec![1, 2]);
        assert_eq!(input.objective, "x_1");
    }

    #[test]
    fn test_missing_lines() {
        assert_eq!(
            ProblemInput::parse("1 2\n2 1\n"),
            Err(InputError::MissingLines(2))
        );
        assert_eq!(ProblemInput::parse(""), Err(InputError::MissingLines(0)));
    }

    #[test]
    fn test_non_integer_token() {
        assert_eq!(
            ProblemInput::parse("1 two\n2 1\nx_1\n"),
            Err(InputError::BadInteger {
                line: 1,
                token: "two".to_string(),
            })
        );
    }

    #[test]
    fn test_encode_validates_permutations() {
        let input = ProblemInput::parse("1 1\n2 1\nx_1\n").unwrap();
        assert!(matches!(
            input.encode(),
            Err(EncodeError::InvalidPermutation(_))
        ));
    }

    #[test]
    fn test_encode_produces_document() {
        let input = ProblemInput::parse("1 2\n2 1\nx_1 + y_1\n").unwrap();
        let document = input.encode().unwrap();
        assert_eq!(document.num_variables(), 4);
        assert_eq!(document.num_inequalities(), 6);
    }
}
