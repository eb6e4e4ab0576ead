use crate::problem::LpProblem;

/// Dense simplex tableau.
///
/// Rows `0..m` are constraint rows, row `m` is the objective row. The last
/// column is the right-hand side. The objective row holds the negated
/// objective coefficients, so its right-hand side reads the current
/// objective value directly.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    pub(crate) data: Vec<Vec<f64>>,
    /// Column currently basic in each constraint row
    pub(crate) basis: Vec<usize>,
    /// Number of original (structural) variables
    pub(crate) n_vars: usize,
}

impl Tableau {
    /// Slack-basis tableau for an all-`<=` problem with nonnegative right-hand sides
    pub(crate) fn standard(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let m = problem.num_constraints();
        let width = n_vars + m + 1;

        let mut data = vec![vec![0.0; width]; m + 1];
        for (i, c) in problem.constraints.iter().enumerate() {
            data[i][..n_vars].copy_from_slice(&c.coefficients);
            data[i][n_vars + i] = 1.0;
            data[i][width - 1] = c.rhs;
        }
        for (j, &coef) in problem.objective.iter().enumerate() {
            data[m][j] = -coef;
        }

        Self {
            data,
            basis: (n_vars..n_vars + m).collect(),
            n_vars,
        }
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.basis.len()
    }

    /// Columns excluding the right-hand side
    pub(crate) fn num_columns(&self) -> usize {
        self.data[0].len() - 1
    }

    pub(crate) fn rhs_col(&self) -> usize {
        self.num_columns()
    }

    pub(crate) fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.rhs_col()]
    }

    pub(crate) fn objective_row(&self) -> &[f64] {
        &self.data[self.num_rows()]
    }

    pub(crate) fn objective_value(&self) -> f64 {
        self.rhs(self.num_rows())
    }

    /// Scale `row` so the pivot entry becomes 1, then eliminate `col` from every other row
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[row][col];
        for v in self.data[row].iter_mut() {
            *v /= pivot_val;
        }
        // Exact unit entry so later basic-column checks are clean
        self.data[row][col] = 1.0;

        let pivot_row = self.data[row].clone();
        for (i, r) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = r[col];
            if factor == 0.0 {
                continue;
            }
            for (v, &p) in r.iter_mut().zip(&pivot_row) {
                *v -= factor * p;
            }
            r[col] = 0.0;
        }

        self.basis[row] = col;
    }

    /// Subtract `factor` times constraint row `row` from the objective row
    pub(crate) fn eliminate_from_objective(&mut self, row: usize, factor: f64) {
        let obj = self.num_rows();
        let (constraints, objective) = self.data.split_at_mut(obj);
        for (v, &p) in objective[0].iter_mut().zip(&constraints[row]) {
            *v -= factor * p;
        }
    }

    /// Drop the columns `from..num_columns()`, keeping the right-hand side
    pub(crate) fn truncate_columns(&mut self, from: usize) {
        for r in self.data.iter_mut() {
            let rhs = r[r.len() - 1];
            r.truncate(from);
            r.push(rhs);
        }
    }

    pub(crate) fn remove_row(&mut self, row: usize) {
        self.data.remove(row);
        self.basis.remove(row);
    }

    /// Reset the objective row to `-objective` over the structural columns
    pub(crate) fn set_objective(&mut self, objective: &[f64]) {
        let obj = self.num_rows();
        for v in self.data[obj].iter_mut() {
            *v = 0.0;
        }
        for (j, &coef) in objective.iter().enumerate() {
            self.data[obj][j] = -coef;
        }
    }

    /// Values of the structural variables under the current basis
    pub(crate) fn primal_values(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.n_vars];
        for (row, &col) in self.basis.iter().enumerate() {
            if col < self.n_vars {
                values[col] = self.rhs(row);
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ConstraintOp;

    fn sample() -> Tableau {
        let mut problem = LpProblem::new(vec![3.0, 5.0]);
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 4.0);
        problem.add_constraint(vec![0.0, 2.0], ConstraintOp::Le, 12.0);
        problem.add_constraint(vec![3.0, 2.0], ConstraintOp::Le, 18.0);
        Tableau::standard(&problem)
    }

    #[test]
    fn test_standard_layout() {
        let t = sample();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_columns(), 5);
        assert_eq!(t.basis, vec![2, 3, 4]);
        assert_eq!(t.data[2], vec![3.0, 2.0, 0.0, 0.0, 1.0, 18.0]);
        assert_eq!(t.objective_row(), &[-3.0, -5.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(t.objective_value(), 0.0);
    }

    #[test]
    fn test_pivot_makes_unit_column() {
        let mut t = sample();
        t.pivot(1, 1);

        assert_eq!(t.basis, vec![2, 1, 4]);
        for i in 0..=t.num_rows() {
            let expected = if i == 1 { 1.0 } else { 0.0 };
            assert_eq!(t.data[i][1], expected, "row {}", i);
        }
        assert!((t.rhs(1) - 6.0).abs() < 1e-12);
        assert!((t.rhs(2) - 6.0).abs() < 1e-12);
        assert!((t.objective_value() - 30.0).abs() < 1e-12);
        assert_eq!(t.primal_values(), vec![0.0, 6.0]);
    }

    #[test]
    fn test_truncate_and_remove() {
        let mut t = sample();
        t.truncate_columns(3);
        assert_eq!(t.num_columns(), 3);
        assert_eq!(t.data[0], vec![1.0, 0.0, 1.0, 4.0]);

        t.remove_row(1);
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.data[1], vec![3.0, 2.0, 0.0, 18.0]);
        assert_eq!(t.objective_row(), &[-3.0, -5.0, 0.0, 0.0]);
    }
}
