use thiserror::Error;

/// Malformed input, rejected before any tableau is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Objective has no coefficients")]
    EmptyObjective,
    #[error("Constraint {row} has {found} coefficients, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Got {rows} matrix rows but {rhs} right-hand sides and {ops} operators")]
    RowCount { rows: usize, rhs: usize, ops: usize },
    #[error("Non-finite value {value} in {location}")]
    NonFinite { location: String, value: f64 },
    #[error("Constraint {row} is not `<=` with a nonnegative right-hand side")]
    NotStandardForm { row: usize },
    #[error("Unknown constraint operator: {0}")]
    UnknownOperator(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid problem: {0}")]
    Problem(#[from] ProblemError),
    #[error("Tolerance must be finite and nonnegative, got {0}")]
    InvalidTolerance(f64),
    #[error("{phase} did not converge within {limit} pivots")]
    IterationLimit { phase: Phase, limit: usize },
}

/// Which pivoting pass was running
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Feasibility search on the auxiliary objective
    One,
    /// Optimization of the real objective
    Two,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::One => write!(f, "Phase 1"),
            Phase::Two => write!(f, "Phase 2"),
        }
    }
}
