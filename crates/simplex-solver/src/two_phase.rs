use log::{debug, warn};

use crate::error::{Phase, SolveError};
use crate::problem::{ConstraintOp, LpProblem};
use crate::simplex::{PivotOutcome, Solver};
use crate::solution::{Solution, SolvePath, SolveStats};
use crate::tableau::Tableau;

/// Phase 1 tableau plus the column where artificial variables start
struct AuxiliaryTableau {
    tableau: Tableau,
    first_artificial: usize,
}

impl AuxiliaryTableau {
    /// Columns are laid out as: variables, slacks, surpluses, artificials, rhs.
    /// Expects nonnegative right-hand sides.
    fn build(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let m = problem.num_constraints();

        let count = |op: ConstraintOp| problem.constraints.iter().filter(|c| c.op == op).count();
        let n_slack = count(ConstraintOp::Le);
        let n_surplus = count(ConstraintOp::Ge);
        let n_artificial = n_surplus + count(ConstraintOp::Eq);

        let width = n_vars + n_slack + n_surplus + n_artificial + 1;
        let mut data = vec![vec![0.0; width]; m + 1];
        let mut basis = vec![0; m];

        let mut slack_idx = n_vars;
        let mut surplus_idx = n_vars + n_slack;
        let first_artificial = n_vars + n_slack + n_surplus;
        let mut artificial_idx = first_artificial;

        for (i, c) in problem.constraints.iter().enumerate() {
            data[i][..n_vars].copy_from_slice(&c.coefficients);
            data[i][width - 1] = c.rhs;

            match c.op {
                ConstraintOp::Le => {
                    data[i][slack_idx] = 1.0;
                    basis[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    data[i][surplus_idx] = -1.0;
                    surplus_idx += 1;
                    data[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    data[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        let mut aux = Self {
            tableau: Tableau { data, basis, n_vars },
            first_artificial,
        };
        aux.set_auxiliary_objective();
        aux
    }

    /// Objective: maximize minus the sum of artificials, expressed in the
    /// non-basic variables by eliminating each basic artificial
    fn set_auxiliary_objective(&mut self) {
        let m = self.tableau.num_rows();
        let n_cols = self.tableau.num_columns();

        for j in self.first_artificial..n_cols {
            self.tableau.data[m][j] = 1.0;
        }

        for row in 0..m {
            let basic = self.tableau.basis[row];
            if basic < self.first_artificial {
                continue;
            }
            debug_assert_eq!(
                (self.first_artificial..n_cols)
                    .filter(|&j| self.tableau.data[row][j] != 0.0)
                    .count(),
                1,
                "row {} must hold exactly one artificial",
                row
            );
            let factor = self.tableau.data[m][basic] / self.tableau.data[row][basic];
            self.tableau.eliminate_from_objective(row, factor);
        }
    }

    fn is_artificial(&self, col: usize) -> bool {
        col >= self.first_artificial
    }

    /// Pivot zero-level artificials out of the basis on the largest-magnitude
    /// non-artificial entry of their row; rows where that is impossible are
    /// linear combinations of other rows and get dropped.
    /// Returns the number of rows removed.
    fn expel_artificials(&mut self, tolerance: f64) -> usize {
        let mut removed = 0;
        let mut row = 0;

        while row < self.tableau.num_rows() {
            if !self.is_artificial(self.tableau.basis[row]) {
                row += 1;
                continue;
            }

            let entries = &self.tableau.data[row];
            let replacement = (0..self.first_artificial)
                .filter(|&j| entries[j].abs() > tolerance)
                .fold(None, |best: Option<usize>, j| match best {
                    Some(b) if entries[b].abs() >= entries[j].abs() => Some(b),
                    _ => Some(j),
                });
            match replacement {
                Some(col) => {
                    debug!("Artificial in row {} leaves the basis for column {}", row, col);
                    self.tableau.pivot(row, col);
                    row += 1;
                }
                None => {
                    warn!("Dropping redundant constraint row {}", row);
                    self.tableau.remove_row(row);
                    removed += 1;
                }
            }
        }

        removed
    }

    /// Strip artificial columns and install the real objective, re-expressed
    /// in terms of the current non-basic variables
    fn into_phase_two(self, objective: &[f64], tolerance: f64) -> Tableau {
        let mut tableau = self.tableau;
        tableau.truncate_columns(self.first_artificial);
        tableau.set_objective(objective);

        for row in 0..tableau.num_rows() {
            let factor = tableau.objective_row()[tableau.basis[row]];
            if factor.abs() > tolerance {
                tableau.eliminate_from_objective(row, factor);
            }
        }

        tableau
    }
}

impl Solver {
    /// Two-phase method for a sign-normalized problem
    pub(crate) fn solve_two_phase(&self, problem: &LpProblem) -> Result<(Solution, SolveStats), SolveError> {
        let mut stats = SolveStats::new(SolvePath::TwoPhase);
        let mut aux = AuxiliaryTableau::build(problem);

        let (outcome, pivots) = self.iterate(&mut aux.tableau, Phase::One)?;
        stats.phase1_pivots = pivots;

        let residual = aux.tableau.objective_value();
        stats.phase1_objective = Some(residual);

        if outcome == PivotOutcome::Unbounded {
            // The auxiliary objective is bounded above by zero
            warn!("Auxiliary problem reported unbounded, treating as infeasible");
            return Ok((Solution::Infeasible, stats));
        }

        if residual.abs() > self.tolerance() {
            debug!("Phase 1 residual {} is not zero, infeasible", residual);
            return Ok((Solution::Infeasible, stats));
        }

        stats.redundant_rows = aux.expel_artificials(self.tolerance());
        if self.negative_rhs_row(&aux.tableau).is_some() {
            return Ok((Solution::Infeasible, stats));
        }
        let mut tableau = aux.into_phase_two(&problem.objective, self.tolerance());

        let (outcome, pivots) = self.iterate(&mut tableau, Phase::Two)?;
        stats.phase2_pivots = pivots;

        let solution = match outcome {
            PivotOutcome::Optimal => self.extract_solution(&tableau),
            PivotOutcome::Unbounded => Solution::Unbounded,
        };
        Ok((solution, stats))
    }
}
