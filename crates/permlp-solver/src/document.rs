use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("inequality row {row} has {found} coefficients, expected {expected}")]
    InequalityWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("equality row {row} has {found} coefficients, expected {expected}")]
    EqualityWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{rows} inequality rows paired with {rhs} right-hand sides")]
    InequalityRhsLength { rows: usize, rhs: usize },
    #[error("{rows} equality rows paired with {rhs} right-hand sides")]
    EqualityRhsLength { rows: usize, rhs: usize },
    #[error("{found} bound pairs for {expected} variables")]
    BoundsLength { expected: usize, found: usize },
    #[error("{found} variable names for {expected} variables")]
    NamesLength { expected: usize, found: usize },
}

/// A complete minimization problem: objective, inequality system
/// (`row · vars <= rhs`), equality system, per-variable bounds, and
/// variable names.
///
/// The JSON field names are the wire format consumed and produced by the
/// CLI; an upper bound of `None` serializes as `null` (unbounded above).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpDocument {
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    pub objective: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "A_ub"))]
    pub inequality_matrix: Vec<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(rename = "b_ub"))]
    pub inequality_rhs: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "A_eq"))]
    pub equality_matrix: Vec<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(rename = "b_eq"))]
    pub equality_rhs: Vec<f64>,
    pub bounds: Vec<(f64, Option<f64>)>,
    pub variable_names: Vec<String>,
}

impl LpDocument {
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_inequalities(&self) -> usize {
        self.inequality_matrix.len()
    }

    pub fn num_equalities(&self) -> usize {
        self.equality_matrix.len()
    }

    /// Checks that every row, right-hand side, bound, and name agrees with
    /// the variable count. Consumers validate before touching the numbers.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let width = self.num_variables();

        for (row, coefficients) in self.inequality_matrix.iter().enumerate() {
            if coefficients.len() != width {
                return Err(DocumentError::InequalityWidth {
                    row,
                    expected: width,
                    found: coefficients.len(),
                });
            }
        }
        if self.inequality_rhs.len() != self.inequality_matrix.len() {
            return Err(DocumentError::InequalityRhsLength {
                rows: self.inequality_matrix.len(),
                rhs: self.inequality_rhs.len(),
            });
        }

        for (row, coefficients) in self.equality_matrix.iter().enumerate() {
            if coefficients.len() != width {
                return Err(DocumentError::EqualityWidth {
                    row,
                    expected: width,
                    found: coefficients.len(),
                });
            }
        }
        if self.equality_rhs.len() != self.equality_matrix.len() {
            return Err(DocumentError::EqualityRhsLength {
                rows: self.equality_matrix.len(),
                rhs: self.equality_rhs.len(),
            });
        }

        if self.bounds.len() != width {
            return Err(DocumentError::BoundsLength {
                expected: width,
                found: self.bounds.len(),
            });
        }
        if self.variable_names.len() != width {
            return Err(DocumentError::NamesLength {
                expected: width,
                found: self.variable_names.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var_document() -> LpDocument {
        LpDocument {
            objective: vec![1.0, 2.0],
            inequality_matrix: vec![vec![1.0, 1.0]],
            inequality_rhs: vec![4.0],
            equality_matrix: Vec::new(),
            equality_rhs: Vec::new(),
            bounds: vec![(0.0, None), (0.0, Some(3.0))],
            variable_names: vec!["x_1".to_string(), "x_2".to_string()],
        }
    }

    #[test]
    fn test_validate_accepts_consistent_document() {
        assert_eq!(two_var_document().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_short_row() {
        let mut document = two_var_document();
        document.inequality_matrix.push(vec![1.0]);
        document.inequality_rhs.push(0.0);
        assert_eq!(
            document.validate(),
            Err(DocumentError::InequalityWidth {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_unpaired_rhs() {
        let mut document = two_var_document();
        document.inequality_rhs.push(0.0);
        assert_eq!(
            document.validate(),
            Err(DocumentError::InequalityRhsLength { rows: 1, rhs: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_missing_bounds() {
        let mut document = two_var_document();
        document.bounds.pop();
        assert_eq!(
            document.validate(),
            Err(DocumentError::BoundsLength {
                expected: 2,
                found: 1,
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_uses_wire_names() {
        let document = two_var_document();
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["c"], serde_json::json!([1.0, 2.0]));
        assert_eq!(json["A_ub"], serde_json::json!([[1.0, 1.0]]));
        assert_eq!(json["b_ub"], serde_json::json!([4.0]));
        assert_eq!(json["A_eq"], serde_json::json!([]));
        assert_eq!(json["bounds"][0], serde_json::json!([0.0, null]));
        assert_eq!(json["variable_names"], serde_json::json!(["x_1", "x_2"]));

        let back: LpDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, document);
    }
}
