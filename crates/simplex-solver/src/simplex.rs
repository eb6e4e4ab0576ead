use log::{debug, trace, warn};

use crate::error::{Phase, ProblemError, SolveError};
use crate::problem::{ConstraintOp, LpProblem};
use crate::solution::{Solution, SolvePath, SolveStats};
use crate::tableau::Tableau;

/// Simplex solver for linear programming problems
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons against zero
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

/// Where the pivot loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotOutcome {
    Optimal,
    Unbounded,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem, choosing the standard or two-phase method
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, SolveError> {
        self.solve_with_stats(problem).map(|(solution, _)| solution)
    }

    /// Like [`Solver::solve`], also reporting the path taken and pivot counts
    pub fn solve_with_stats(&self, problem: &LpProblem) -> Result<(Solution, SolveStats), SolveError> {
        self.check_tolerance()?;
        problem.validate()?;

        let normalized = problem.normalized();
        if normalized.is_standard_form() {
            debug!(
                "{} constraints are all <= with nonnegative rhs, using slack basis",
                normalized.num_constraints()
            );
            self.run_standard(&normalized)
        } else {
            debug!("Problem needs an artificial basis, using two-phase method");
            self.solve_two_phase(&normalized)
        }
    }

    /// Solve a problem whose constraints are all `<=` with nonnegative right-hand sides
    pub fn solve_standard(&self, problem: &LpProblem) -> Result<Solution, SolveError> {
        self.check_tolerance()?;
        problem.validate()?;
        if let Some(row) = problem
            .constraints
            .iter()
            .position(|c| c.op != ConstraintOp::Le || c.rhs < 0.0)
        {
            return Err(ProblemError::NotStandardForm { row }.into());
        }

        self.run_standard(problem).map(|(solution, _)| solution)
    }

    fn check_tolerance(&self) -> Result<(), SolveError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolveError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    fn run_standard(&self, problem: &LpProblem) -> Result<(Solution, SolveStats), SolveError> {
        let mut stats = SolveStats::new(SolvePath::Standard);
        let mut tableau = Tableau::standard(problem);

        let (outcome, pivots) = self.iterate(&mut tableau, Phase::Two)?;
        stats.phase2_pivots = pivots;

        let solution = match outcome {
            PivotOutcome::Optimal => self.extract_solution(&tableau),
            PivotOutcome::Unbounded => Solution::Unbounded,
        };
        Ok((solution, stats))
    }

    /// Pivot until no objective entry is negative or an unbounded column turns up.
    ///
    /// Bland's rule picks the lowest-index improving column and, among rows
    /// tied on the minimum ratio, the lowest-index row, so degenerate
    /// problems cannot cycle.
    pub(crate) fn iterate(&self, tableau: &mut Tableau, phase: Phase) -> Result<(PivotOutcome, usize), SolveError> {
        for pivots in 0..=self.max_iterations {
            let Some(col) = self.entering_column(tableau) else {
                debug!("{} optimal after {} pivots, objective {}", phase, pivots, tableau.objective_value());
                return Ok((PivotOutcome::Optimal, pivots));
            };
            let Some(row) = self.leaving_row(tableau, col) else {
                debug!("{} unbounded along column {} after {} pivots", phase, col, pivots);
                return Ok((PivotOutcome::Unbounded, pivots));
            };
            if pivots == self.max_iterations {
                break;
            }

            trace!(
                "{} pivot {}: column {} enters, column {} leaves row {}",
                phase, pivots, col, tableau.basis[row], row
            );
            tableau.pivot(row, col);
        }

        warn!("{} hit the limit of {} pivots", phase, self.max_iterations);
        Err(SolveError::IterationLimit {
            phase,
            limit: self.max_iterations,
        })
    }

    fn entering_column(&self, tableau: &Tableau) -> Option<usize> {
        tableau.objective_row()[..tableau.num_columns()]
            .iter()
            .position(|&v| v < -self.tolerance)
    }

    fn leaving_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let ratios: Vec<(usize, f64)> = (0..tableau.num_rows())
            .filter(|&i| tableau.data[i][col] > self.tolerance)
            .map(|i| (i, tableau.rhs(i) / tableau.data[i][col]))
            .collect();

        let min_ratio = ratios
            .iter()
            .map(|&(_, ratio)| ratio)
            .fold(f64::INFINITY, f64::min);

        ratios
            .into_iter()
            .find(|&(_, ratio)| ratio <= min_ratio + self.tolerance)
            .map(|(i, _)| i)
    }

    /// First constraint row whose right-hand side is negative beyond tolerance
    pub(crate) fn negative_rhs_row(&self, tableau: &Tableau) -> Option<usize> {
        let row = (0..tableau.num_rows()).find(|&i| tableau.rhs(i) < -self.tolerance)?;
        debug!("Row {} has negative rhs {}, infeasible", row, tableau.rhs(row));
        Some(row)
    }

    /// Read the optimum off a terminal tableau
    pub(crate) fn extract_solution(&self, tableau: &Tableau) -> Solution {
        if self.negative_rhs_row(tableau).is_some() {
            return Solution::Infeasible;
        }

        let x = tableau
            .primal_values()
            .into_iter()
            .map(|v| if v.abs() <= self.tolerance { 0.0 } else { v })
            .collect();

        Solution::Optimal {
            value: tableau.objective_value(),
            x,
        }
    }
}

/// Solve `max c·x` s.t. `A x <= b`, `x >= 0`, with `b >= 0`, using a default [`Solver`]
pub fn solve_standard(c: &[f64], a: &[Vec<f64>], b: &[f64]) -> Result<Solution, SolveError> {
    let ops = vec![ConstraintOp::Le; b.len()];
    let problem = LpProblem::from_dense(c.to_vec(), a.to_vec(), b.to_vec(), ops)?;
    Solver::new().solve_standard(&problem)
}

/// Solve `max c·x` s.t. `A x {<=, >=, ==} b`, `x >= 0`, using a default [`Solver`]
pub fn solve(c: &[f64], a: &[Vec<f64>], b: &[f64], ops: &[ConstraintOp]) -> Result<Solution, SolveError> {
    let problem = LpProblem::from_dense(c.to_vec(), a.to_vec(), b.to_vec(), ops.to_vec())?;
    Solver::new().solve(&problem)
}
