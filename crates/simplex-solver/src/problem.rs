use std::fmt;
use std::str::FromStr;

use crate::error::ProblemError;

/// A linear program: maximize `objective · x` subject to the constraints, `x >= 0`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective coefficients, one per variable
    pub objective: Vec<f64>,
    /// Constraint rows
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "le"))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "ge"))]
    Ge,
    /// Equal (==)
    #[cfg_attr(feature = "serde", serde(rename = "==", alias = "=", alias = "eq"))]
    Eq,
}

impl ConstraintOp {
    /// The operator obtained by multiplying both sides by -1
    pub fn flipped(self) -> Self {
        match self {
            ConstraintOp::Le => ConstraintOp::Ge,
            ConstraintOp::Ge => ConstraintOp::Le,
            ConstraintOp::Eq => ConstraintOp::Eq,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "==",
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ConstraintOp {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" => Ok(ConstraintOp::Le),
            ">=" | "≥" => Ok(ConstraintOp::Ge),
            "==" | "=" => Ok(ConstraintOp::Eq),
            other => Err(ProblemError::UnknownOperator(other.to_string())),
        }
    }
}

impl LpProblem {
    pub fn new(objective: Vec<f64>) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Build from the dense `(c, A, b, ops)` form, checking that the shapes agree
    pub fn from_dense(
        objective: Vec<f64>,
        matrix: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        ops: Vec<ConstraintOp>,
    ) -> Result<Self, ProblemError> {
        if matrix.len() != rhs.len() || matrix.len() != ops.len() {
            return Err(ProblemError::RowCount {
                rows: matrix.len(),
                rhs: rhs.len(),
                ops: ops.len(),
            });
        }

        let constraints = matrix
            .into_iter()
            .zip(ops)
            .zip(rhs)
            .map(|((coefficients, op), rhs)| Constraint { coefficients, op, rhs })
            .collect();
        let problem = Self { objective, constraints };
        problem.validate()?;
        Ok(problem)
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint { coefficients, op, rhs });
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check dimensions and reject NaN / infinite entries
    pub fn validate(&self) -> Result<(), ProblemError> {
        let n = self.num_variables();
        if n == 0 {
            return Err(ProblemError::EmptyObjective);
        }
        for (j, &v) in self.objective.iter().enumerate() {
            if !v.is_finite() {
                return Err(ProblemError::NonFinite {
                    location: format!("objective[{}]", j),
                    value: v,
                });
            }
        }

        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != n {
                return Err(ProblemError::RowLength {
                    row: i,
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if let Some((j, &v)) = c.coefficients.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(ProblemError::NonFinite {
                    location: format!("constraint {} coefficient {}", i, j),
                    value: v,
                });
            }
            if !c.rhs.is_finite() {
                return Err(ProblemError::NonFinite {
                    location: format!("constraint {} rhs", i),
                    value: c.rhs,
                });
            }
        }

        Ok(())
    }

    /// Copy of the problem in which every row with a negative right-hand side
    /// has been multiplied by -1 and its operator flipped
    pub fn normalized(&self) -> Self {
        let constraints = self
            .constraints
            .iter()
            .map(|c| {
                if c.rhs < 0.0 {
                    Constraint {
                        coefficients: c.coefficients.iter().map(|v| -v).collect(),
                        op: c.op.flipped(),
                        rhs: -c.rhs,
                    }
                } else {
                    c.clone()
                }
            })
            .collect();

        Self {
            objective: self.objective.clone(),
            constraints,
        }
    }

    /// All rows are `<=` with a nonnegative right-hand side, so the slack basis is feasible
    pub fn is_standard_form(&self) -> bool {
        self.constraints
            .iter()
            .all(|c| c.op == ConstraintOp::Le && c.rhs >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_flips_negative_rows() {
        let problem = LpProblem::from_dense(
            vec![1.0, 1.0],
            vec![vec![-1.0, 1.0], vec![-1.0, -1.0], vec![2.0, 0.0]],
            vec![1.0, -2.0, -3.0],
            vec![ConstraintOp::Le, ConstraintOp::Le, ConstraintOp::Eq],
        )
        .unwrap();

        let normalized = problem.normalized();

        assert_eq!(normalized.constraints[0], problem.constraints[0]);
        assert_eq!(normalized.constraints[1].coefficients, vec![1.0, 1.0]);
        assert_eq!(normalized.constraints[1].op, ConstraintOp::Ge);
        assert_eq!(normalized.constraints[1].rhs, 2.0);
        assert_eq!(normalized.constraints[2].coefficients, vec![-2.0, -0.0]);
        assert_eq!(normalized.constraints[2].op, ConstraintOp::Eq);
        assert_eq!(normalized.constraints[2].rhs, 3.0);
        assert!(!normalized.is_standard_form());
    }

    #[test]
    fn test_standard_form_predicate() {
        let mut problem = LpProblem::new(vec![3.0, 5.0]);
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 4.0);
        problem.add_constraint(vec![0.0, 2.0], ConstraintOp::Le, 0.0);
        assert!(problem.is_standard_form());

        problem.add_constraint(vec![1.0, 1.0], ConstraintOp::Le, -1.0);
        assert!(!problem.is_standard_form());
        assert!(!problem.normalized().is_standard_form());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = LpProblem::from_dense(
            vec![1.0, 2.0],
            vec![vec![1.0, 2.0], vec![1.0]],
            vec![1.0, 1.0],
            vec![ConstraintOp::Le, ConstraintOp::Le],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProblemError::RowLength {
                row: 1,
                expected: 2,
                found: 1
            }
        );

        let err = LpProblem::from_dense(
            vec![1.0],
            vec![vec![1.0]],
            vec![1.0, 2.0],
            vec![ConstraintOp::Le],
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::RowCount { rows: 1, rhs: 2, ops: 1 }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut problem = LpProblem::new(vec![1.0]);
        problem.add_constraint(vec![f64::NAN], ConstraintOp::Le, 1.0);
        assert!(matches!(problem.validate(), Err(ProblemError::NonFinite { .. })));

        let problem = LpProblem::new(vec![]);
        assert_eq!(problem.validate(), Err(ProblemError::EmptyObjective));
    }

    #[test]
    fn test_parse_operators() {
        assert_eq!("<=".parse::<ConstraintOp>().unwrap(), ConstraintOp::Le);
        assert_eq!(">=".parse::<ConstraintOp>().unwrap(), ConstraintOp::Ge);
        assert_eq!("==".parse::<ConstraintOp>().unwrap(), ConstraintOp::Eq);
        assert_eq!(" = ".parse::<ConstraintOp>().unwrap(), ConstraintOp::Eq);
        assert!("<".parse::<ConstraintOp>().is_err());
        assert_eq!(ConstraintOp::Ge.to_string(), ">=");
        assert_eq!(ConstraintOp::Le.flipped(), ConstraintOp::Ge);
        assert_eq!(ConstraintOp::Eq.flipped(), ConstraintOp::Eq);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_problem() {
        let json = r#"{
            "objective": [3, 5],
            "constraints": [
                { "coefficients": [1, 0], "op": "<=", "rhs": 4 },
                { "coefficients": [0, 2], "op": "ge", "rhs": 12 },
                { "coefficients": [3, 2], "op": "=", "rhs": 18 }
            ]
        }"#;
        let problem: LpProblem = serde_json::from_str(json).unwrap();
        assert_eq!(problem.num_constraints(), 3);
        assert_eq!(problem.constraints[1].op, ConstraintOp::Ge);
        assert_eq!(problem.constraints[2].op, ConstraintOp::Eq);
    }
}
