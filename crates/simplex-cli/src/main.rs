mod input;
mod interactive;
mod report;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, error, info};
use simplex_solver::{LpProblem, Solver};

#[derive(Parser)]
#[command(name = "simplex")]
#[command(about = "Solve linear programs with the tableau simplex method", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Tolerance for comparisons against zero
    #[arg(long, global = true, default_value_t = 1e-9)]
    tolerance: f64,
    /// Maximum pivots per phase
    #[arg(long, global = true, default_value_t = 10000)]
    max_iterations: usize,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem given as a JSON file
    Solve {
        /// The problem file, or `-` for stdin
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Print the method used and pivot counts
        #[arg(short, long)]
        stats: bool,
    },
    /// Enter problems at prompts, one after another
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let solver = Solver::new()
        .with_tolerance(cli.tolerance)
        .with_max_iterations(cli.max_iterations);

    match cli.command {
        Commands::Solve { file, format, stats } => {
            let source = match read_source(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    std::process::exit(1);
                }
            };

            let problem: LpProblem = match serde_json::from_str(&source) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Parse error: {}", e);
                    std::process::exit(1);
                }
            };
            info!(
                "Loaded {} with {} variables and {} constraints",
                file.display(),
                problem.num_variables(),
                problem.num_constraints()
            );

            let (solution, solve_stats) = match solver.solve_with_stats(&problem) {
                Ok(r) => r,
                Err(e) => {
                    error!("Solve failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            match format {
                Format::Text => {
                    println!("{}", report::render(&solution));
                    if stats {
                        println!("{}", report::render_stats(&solve_stats));
                    }
                }
                Format::Json => {
                    let value = if stats {
                        serde_json::json!({ "solution": solution, "stats": solve_stats })
                    } else {
                        serde_json::json!(solution)
                    };
                    println!("{}", serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
                        format!("{{\"error\": \"{}\"}}", e)
                    }));
                }
            }

            if !solution.is_optimal() {
                std::process::exit(2);
            }
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut session = interactive::Session::new(stdin.lock(), io::stdout(), solver);
            if let Err(e) = session.run() {
                eprintln!("I/O error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn read_source(file: &Path) -> io::Result<String> {
    if file.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(file)
    }
}
