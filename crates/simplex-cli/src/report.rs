use std::fmt::Write;

use simplex_solver::{Solution, SolveStats};

const RULE: &str = "=========================";

/// Render a solution the way the interactive session prints it
pub fn render(solution: &Solution) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');

    match solution {
        Solution::Optimal { value, x } => {
            out.push_str("Solution (Maximization):\n");
            let _ = writeln!(out, "Optimal value: {:.4}", value);
            for (i, v) in x.iter().enumerate() {
                let _ = writeln!(out, "  x{} = {:.4}", i + 1, v);
            }
        }
        Solution::Unbounded => {
            out.push_str("The linear programming problem is unbounded and has no finite solution.\n");
        }
        Solution::Infeasible => {
            out.push_str("The linear programming problem is infeasible and has no solution.\n");
        }
    }

    out.push_str(RULE);
    out
}

pub fn render_stats(stats: &SolveStats) -> String {
    let mut out = format!(
        "Method: {:?}, pivots: {} (phase 1: {}, phase 2: {})",
        stats.path,
        stats.total_pivots(),
        stats.phase1_pivots,
        stats.phase2_pivots
    );
    if let Some(residual) = stats.phase1_objective {
        let _ = write!(out, ", phase 1 objective: {:.4}", residual);
    }
    if stats.redundant_rows > 0 {
        let _ = write!(out, ", redundant rows dropped: {}", stats.redundant_rows);
    }
    out
}
