use std::io::{self, BufRead, Write};

use log::info;
use simplex_solver::{LpProblem, Solver};

use crate::input::{self, InputError};
use crate::report;

const BANNER: &str = "\
Simplex Algorithm Solver
=========================
Solves linear programs with the simplex method:
  Maximize Z = c^T * x
  Subject to: Ax [constraint_type] b
where [constraint_type] is one of '<=', '>=' or '=='.
Non-negativity constraints (x >= 0) are assumed and need not be entered.
=========================";

/// Prompt-driven session over any line source
pub struct Session<R, W> {
    input: R,
    output: W,
    solver: Solver,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, solver: Solver) -> Self {
        Self { input, output, solver }
    }

    /// Solve problems until the user declines or input runs out
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", BANNER)?;

        loop {
            let Some(problem) = self.read_problem()? else {
                return Ok(());
            };
            info!(
                "Read problem with {} variables and {} constraints",
                problem.num_variables(),
                problem.num_constraints()
            );

            match self.solver.solve(&problem) {
                Ok(solution) => writeln!(self.output, "\n{}", report::render(&solution))?,
                Err(e) => writeln!(self.output, "\nAn error occurred: {}", e)?,
            }

            let again = self.ask("\nDo you want to solve another problem? (yes/no): ", input::parse_yes_no)?;
            if again != Some(true) {
                return Ok(());
            }
        }
    }

    fn read_problem(&mut self) -> io::Result<Option<LpProblem>> {
        let Some(n_vars) = self.ask("Enter the number of variables: ", |l| {
            input::parse_count(l, "Number of variables")
        })?
        else {
            return Ok(None);
        };

        let prompt = format!(
            "Enter the {} coefficients of the objective function (space-separated): ",
            n_vars
        );
        let Some(objective) = self.ask(&prompt, |l| input::parse_coefficients(l, n_vars))? else {
            return Ok(None);
        };

        let Some(n_constraints) = self.ask("Enter the number of constraints: ", |l| {
            input::parse_count(l, "Number of constraints")
        })?
        else {
            return Ok(None);
        };

        writeln!(
            self.output,
            "Enter the coefficients of the constraints (A), the constraint type, and the right-hand side (b):"
        )?;
        let mut problem = LpProblem::new(objective);
        for i in 0..n_constraints {
            let prompt = format!(
                "Constraint {} ({} coefficients, a type from ['<=', '>=', '=='], and 1 RHS value, space-separated): ",
                i + 1,
                n_vars
            );
            let Some(c) = self.ask(&prompt, |l| input::parse_constraint(l, n_vars))? else {
                return Ok(None);
            };
            problem.add_constraint(c.coefficients, c.op, c.rhs);
        }

        Ok(Some(problem))
    }

    /// Re-prompt until `parse` accepts a line; `None` at end of input
    fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T, InputError>) -> io::Result<Option<T>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        Session::new(script.as_bytes(), &mut out, Solver::new()).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_solves_problem() {
        let out = run("2\n3 5\n3\n1 0 <= 4\n0 2 <= 12\n3 2 <= 18\nno\n");
        assert!(out.contains("Optimal value: 36.0000"), "{}", out);
        assert!(out.contains("  x1 = 2.0000"));
        assert!(out.contains("  x2 = 6.0000"));
    }

    #[test]
    fn test_session_reprompts_on_bad_input() {
        let out = run("zero\n0\n1\n1 2\n1\n1\n1 <= x\n1 <= 3\nmaybe\nno\n");
        assert!(out.contains("Please enter an integer."));
        assert!(out.contains("Number of variables must be a positive integer."));
        assert!(out.contains("Please enter exactly 1 values."));
        assert!(out.contains("Please enter numbers separated by spaces."));
        assert!(out.contains("Please enter 'yes' or 'no'."));
        assert!(out.contains("Optimal value: 3.0000"), "{}", out);
    }

    #[test]
    fn test_session_loops_until_no() {
        let out = run("1\n1\n1\n1 <= -5\nyes\n1\n1\n1\n-1 >= 2\nno\n");
        assert!(out.contains("infeasible"));
        assert_eq!(out.matches("Enter the number of variables").count(), 2);
    }

    #[test]
    fn test_session_stops_at_eof() {
        let out = run("2\n1 1\n");
        assert!(!out.contains("Optimal value"));
    }
}
