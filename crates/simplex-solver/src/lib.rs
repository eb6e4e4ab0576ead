mod error;
mod problem;
mod simplex;
mod solution;
mod tableau;
mod two_phase;

pub use error::{Phase, ProblemError, SolveError};
pub use problem::{Constraint, ConstraintOp, LpProblem};
pub use simplex::{Solver, solve, solve_standard};
pub use solution::{Solution, SolvePath, SolveStats};
