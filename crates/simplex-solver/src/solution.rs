/// Outcome of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// An optimal point was found
    Optimal {
        /// Optimal objective value
        value: f64,
        /// Optimal values for each variable
        x: Vec<f64>,
    },
    /// The objective grows without bound over the feasible region
    Unbounded,
    /// No point satisfies all constraints
    Infeasible,
}

impl Solution {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Solution::Optimal { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Solution::Optimal { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn x(&self) -> Option<&[f64]> {
        match self {
            Solution::Optimal { x, .. } => Some(x),
            _ => None,
        }
    }
}

/// How the problem was solved
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePath {
    /// Slack basis was feasible, single pivoting pass
    Standard,
    /// Auxiliary problem first, then the real objective
    TwoPhase,
}

/// Bookkeeping collected during a solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStats {
    pub path: SolvePath,
    /// Pivots spent finding a feasible basis (zero on the standard path)
    pub phase1_pivots: usize,
    /// Pivots spent optimizing the real objective
    pub phase2_pivots: usize,
    /// Auxiliary objective at the end of Phase 1; `None` on the standard path
    pub phase1_objective: Option<f64>,
    /// Constraint rows dropped as redundant after Phase 1
    pub redundant_rows: usize,
}

impl SolveStats {
    pub(crate) fn new(path: SolvePath) -> Self {
        Self {
            path,
            phase1_pivots: 0,
            phase2_pivots: 0,
            phase1_objective: None,
            redundant_rows: 0,
        }
    }

    pub fn total_pivots(&self) -> usize {
        self.phase1_pivots + self.phase2_pivots
    }
}
