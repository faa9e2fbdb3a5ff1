use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};
use thiserror::Error;

use crate::document::{DocumentError, LpDocument};
use crate::solution::Solution;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("malformed LP document: {0}")]
    Document(#[from] DocumentError),
}

/// Thin front-end over the `microlp` simplex implementation.
///
/// Builds a minimization problem straight from an [`LpDocument`] and maps
/// the backend outcome onto a [`Solution`]. Infeasibility and unboundedness
/// are solution statuses, not errors; only a malformed document fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    pub fn solve(&self, document: &LpDocument) -> Result<Solution, SolveError> {
        document.validate()?;

        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let variables: Vec<Variable> = document
            .objective
            .iter()
            .zip(&document.bounds)
            .map(|(&cost, &(lower, upper))| {
                problem.add_var(cost, (lower, upper.unwrap_or(f64::INFINITY)))
            })
            .collect();

        for (row, &rhs) in document
            .inequality_matrix
            .iter()
            .zip(&document.inequality_rhs)
        {
            let terms = dense_terms(&variables, row);
            if terms.is_empty() {
                // A row with no support is decided by its right-hand side.
                if rhs < 0.0 {
                    return Ok(Solution::infeasible());
                }
                continue;
            }
            problem.add_constraint(terms.as_slice(), ComparisonOp::Le, rhs);
        }

        for (row, &rhs) in document.equality_matrix.iter().zip(&document.equality_rhs) {
            let terms = dense_terms(&variables, row);
            if terms.is_empty() {
                if rhs != 0.0 {
                    return Ok(Solution::infeasible());
                }
                continue;
            }
            problem.add_constraint(terms.as_slice(), ComparisonOp::Eq, rhs);
        }

        Ok(match problem.solve() {
            Ok(solved) => {
                let values = variables.iter().map(|&variable| solved[variable]).collect();
                Solution::optimal(values, solved.objective())
            }
            Err(microlp::Error::Infeasible) => Solution::infeasible(),
            Err(microlp::Error::Unbounded) => Solution::unbounded(),
            Err(other) => Solution::error(other.to_string()),
        })
    }
}

fn dense_terms(variables: &[Variable], row: &[f64]) -> Vec<(Variable, f64)> {
    row.iter()
        .enumerate()
        .filter(|&(_, &coefficient)| coefficient != 0.0)
        .map(|(column, &coefficient)| (variables[column], coefficient))
        .collect()
}
