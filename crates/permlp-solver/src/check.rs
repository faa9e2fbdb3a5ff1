use std::collections::HashMap;

use thiserror::Error;

use crate::document::{DocumentError, LpDocument};

/// Absolute tolerance for every feasibility comparison.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("malformed LP document: {0}")]
    Document(#[from] DocumentError),
    #[error("assignment has no value for variable {0}")]
    MissingVariable(String),
}

/// A candidate assignment keyed by variable name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    pub variable_values: HashMap<String, f64>,
}

impl Assignment {
    pub fn new(variable_values: HashMap<String, f64>) -> Self {
        Self { variable_values }
    }
}

/// Outcome of checking an assignment against a document.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityReport {
    pub all_constraints_satisfied: bool,
    /// Violations in check order: inequality rows, equality rows, bounds.
    pub violations: Vec<Violation>,
}

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Inequality {
        index: usize,
        expression: String,
        lhs: f64,
        rhs: f64,
        violation: String,
    },
    Equality {
        index: usize,
        expression: String,
        lhs: f64,
        rhs: f64,
        violation: String,
    },
    Bound {
        index: usize,
        variable: String,
        description: String,
    },
}

/// Evaluates every constraint and bound of `document` at `assignment`.
///
/// Rows are reported by their index within their system so callers can map
/// a violation back to the emitting generator. Missing variables abort the
/// check rather than defaulting to zero.
pub fn check_feasibility(
    document: &LpDocument,
    assignment: &Assignment,
) -> Result<FeasibilityReport, CheckError> {
    document.validate()?;

    let values = document
        .variable_names
        .iter()
        .map(|name| {
            assignment
                .variable_values
                .get(name)
                .copied()
                .ok_or_else(|| CheckError::MissingVariable(name.clone()))
        })
        .collect::<Result<Vec<f64>, CheckError>>()?;

    let mut violations = Vec::new();

    for (index, (row, &rhs)) in document
        .inequality_matrix
        .iter()
        .zip(&document.inequality_rhs)
        .enumerate()
    {
        let lhs = dot(row, &values);
        if lhs > rhs + FEASIBILITY_TOLERANCE {
            violations.push(Violation::Inequality {
                index,
                expression: render_constraint(row, &document.variable_names, "<=", rhs),
                lhs,
                rhs,
                violation: format!("{} <= {} is False", fmt_g(lhs), fmt_g(rhs)),
            });
        }
    }

    for (index, (row, &rhs)) in document
        .equality_matrix
        .iter()
        .zip(&document.equality_rhs)
        .enumerate()
    {
        let lhs = dot(row, &values);
        if (lhs - rhs).abs() > FEASIBILITY_TOLERANCE {
            violations.push(Violation::Equality {
                index,
                expression: render_constraint(row, &document.variable_names, "=", rhs),
                lhs,
                rhs,
                violation: format!("{} = {} is False", fmt_g(lhs), fmt_g(rhs)),
            });
        }
    }

    for (index, (&(lower, upper), &value)) in document.bounds.iter().zip(&values).enumerate() {
        let name = &document.variable_names[index];
        if value < lower - FEASIBILITY_TOLERANCE {
            violations.push(Violation::Bound {
                index,
                variable: name.clone(),
                description: format!(
                    "{} = {} is below lower bound {}",
                    name,
                    fmt_g(value),
                    fmt_g(lower)
                ),
            });
        }
        if let Some(upper) = upper {
            if value > upper + FEASIBILITY_TOLERANCE {
                violations.push(Violation::Bound {
                    index,
                    variable: name.clone(),
                    description: format!(
                        "{} = {} is above upper bound {}",
                        name,
                        fmt_g(value),
                        fmt_g(upper)
                    ),
                });
            }
        }
    }

    Ok(FeasibilityReport {
        all_constraints_satisfied: violations.is_empty(),
        violations,
    })
}

fn dot(row: &[f64], values: &[f64]) -> f64 {
    row.iter()
        .zip(values)
        .map(|(coefficient, value)| coefficient * value)
        .sum()
}

/// Renders a row as `x_1 - 2x_2 <= -1`: zero coefficients are dropped and
/// unit magnitudes are elided.
fn render_constraint(row: &[f64], names: &[String], relation: &str, rhs: f64) -> String {
    let mut terms = Vec::new();
    for (coefficient, name) in row.iter().zip(names) {
        if coefficient.abs() <= FEASIBILITY_TOLERANCE {
            continue;
        }
        let sign = if *coefficient > 0.0 { '+' } else { '-' };
        let magnitude = coefficient.abs();
        if magnitude == 1.0 {
            terms.push(format!("{sign} {name}"));
        } else {
            terms.push(format!("{sign} {}{name}", fmt_g(magnitude)));
        }
    }
    let joined = terms.join(" ");
    let expression = joined.trim_start_matches(['+', ' ']);
    format!("{expression} {relation} {}", fmt_g(rhs))
}

/// Shortest reasonable rendering of a float: integers lose the fraction,
/// everything else keeps up to six decimals with trailing zeros trimmed.
fn fmt_g(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let rendered = format!("{value:.6}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| format!("x_{i}"))
            .chain((1..=n).map(|i| format!("y_{i}")))
            .collect()
    }

    fn assignment(pairs: &[(&str, f64)]) -> Assignment {
        Assignment::new(
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        )
    }

    fn small_document() -> LpDocument {
        // x_1 - x_2 <= -1 over two x variables and two y variables.
        LpDocument {
            objective: vec![0.0; 4],
            inequality_matrix: vec![vec![1.0, -1.0, 0.0, 0.0]],
            inequality_rhs: vec![-1.0],
            equality_matrix: Vec::new(),
            equality_rhs: Vec::new(),
            bounds: vec![(0.0, None); 4],
            variable_names: names(2),
        }
    }

    #[test]
    fn test_satisfied_assignment_reports_no_violations() {
        let report = check_feasibility(
            &small_document(),
            &assignment(&[("x_1", 1.0), ("x_2", 2.0), ("y_1", 1.0), ("y_2", 2.0)]),
        )
        .unwrap();

        assert!(report.all_constraints_satisfied);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_violated_inequality_is_rendered() {
        let report = check_feasibility(
            &small_document(),
            &assignment(&[("x_1", 2.0), ("x_2", 2.0), ("y_1", 0.0), ("y_2", 0.0)]),
        )
        .unwrap();

        assert!(!report.all_constraints_satisfied);
        assert_eq!(
            report.violations,
            vec![Violation::Inequality {
                index: 0,
                expression: "x_1 - x_2 <= -1".to_string(),
                lhs: 0.0,
                rhs: -1.0,
                violation: "0 <= -1 is False".to_string(),
            }]
        );
    }

    #[test]
    fn test_bound_violation_reports_variable() {
        let mut document = small_document();
        document.bounds[3] = (0.0, Some(1.0));

        let report = check_feasibility(
            &document,
            &assignment(&[("x_1", 1.0), ("x_2", 2.0), ("y_1", -1.0), ("y_2", 3.0)]),
        )
        .unwrap();

        assert!(!report.all_constraints_satisfied);
        assert_eq!(
            report.violations,
            vec![
                Violation::Bound {
                    index: 2,
                    variable: "y_1".to_string(),
                    description: "y_1 = -1 is below lower bound 0".to_string(),
                },
                Violation::Bound {
                    index: 3,
                    variable: "y_2".to_string(),
                    description: "y_2 = 3 is above upper bound 1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_within_tolerance_is_not_a_violation() {
        let report = check_feasibility(
            &small_document(),
            &assignment(&[
                ("x_1", 1.0 + 5e-9),
                ("x_2", 2.0),
                ("y_1", 0.0),
                ("y_2", -5e-9),
            ]),
        )
        .unwrap();

        assert!(report.all_constraints_satisfied);
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let error =
            check_feasibility(&small_document(), &assignment(&[("x_1", 1.0)])).unwrap_err();
        assert_eq!(error, CheckError::MissingVariable("x_2".to_string()));
    }

    #[test]
    fn test_non_unit_coefficients_keep_their_magnitude() {
        let document = LpDocument {
            objective: vec![0.0, 0.0],
            inequality_matrix: vec![vec![2.0, -0.5]],
            inequality_rhs: vec![1.0],
            equality_matrix: Vec::new(),
            equality_rhs: Vec::new(),
            bounds: vec![(0.0, None); 2],
            variable_names: vec!["a".to_string(), "b".to_string()],
        };

        let report =
            check_feasibility(&document, &assignment(&[("a", 2.0), ("b", 0.0)])).unwrap();

        assert_eq!(
            report.violations,
            vec![Violation::Inequality {
                index: 0,
                expression: "2a - 0.5b <= 1".to_string(),
                lhs: 4.0,
                rhs: 1.0,
                violation: "4 <= 1 is False".to_string(),
            }]
        );
    }
}
