use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use permlp_encoder::ProblemInput;
use permlp_solver::{Assignment, LpDocument, Solution, Solver, check_feasibility};

#[derive(Parser)]
#[command(name = "permlp")]
#[command(
    about = "Encode permutation pairs as linear programs, solve them, and check solutions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode two permutations and an objective into an LP document
    Encode {
        /// Input file with P1, P2, and the objective on three lines (stdin if omitted)
        input: Option<PathBuf>,
        /// Output file for the LP document (stdout if omitted)
        output: Option<PathBuf>,
        /// Directory input/output paths are resolved against
        #[arg(short = 'd', default_value = ".")]
        directory: PathBuf,
    },
    /// Solve an LP document and report the optimal assignment
    Solve {
        /// Input file with the LP document (stdin if omitted)
        input: Option<PathBuf>,
        /// Output file for the result (stdout if omitted)
        output: Option<PathBuf>,
        /// Directory input/output paths are resolved against
        #[arg(short = 'd', default_value = ".")]
        directory: PathBuf,
    },
    /// Check a candidate assignment against an LP document
    Check {
        /// Input file with a two-element JSON array: the LP document and a
        /// result carrying variable_values (stdin if omitted)
        input: Option<PathBuf>,
        /// Output file for the feasibility report (stdout if omitted)
        output: Option<PathBuf>,
        /// Directory input/output paths are resolved against
        #[arg(short = 'd', default_value = ".")]
        directory: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            directory,
        } => {
            let text = read_input(&directory, input.as_deref());
            let problem = match ProblemInput::parse(&text) {
                Ok(problem) => problem,
                Err(e) => {
                    eprintln!("Error parsing input: {}", e);
                    std::process::exit(1);
                }
            };
            let document = match problem.encode() {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Error encoding LP: {}", e);
                    std::process::exit(1);
                }
            };
            let payload = match serde_json::to_value(&document) {
                Ok(payload) => payload,
                Err(e) => {
                    eprintln!("Error encoding output: {}", e);
                    std::process::exit(1);
                }
            };
            write_output(&directory, output.as_deref(), &payload);
        }
        Commands::Solve {
            input,
            output,
            directory,
        } => {
            let text = read_input(&directory, input.as_deref());
            let document: LpDocument = match serde_json::from_str(&text) {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Error parsing input: {}", e);
                    std::process::exit(1);
                }
            };
            let solution = match Solver::new().solve(&document) {
                Ok(solution) => solution,
                Err(e) => {
                    eprintln!("Error solving LP: {}", e);
                    std::process::exit(1);
                }
            };
            write_output(
                &directory,
                output.as_deref(),
                &solve_report(&document, &solution),
            );
        }
        Commands::Check {
            input,
            output,
            directory,
        } => {
            let text = read_input(&directory, input.as_deref());
            let (document, assignment): (LpDocument, Assignment) =
                match serde_json::from_str(&text) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        eprintln!("Error parsing input: {}", e);
                        std::process::exit(1);
                    }
                };
            let report = match check_feasibility(&document, &assignment) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error checking solution: {}", e);
                    std::process::exit(1);
                }
            };
            let payload = match serde_json::to_value(&report) {
                Ok(payload) => payload,
                Err(e) => {
                    eprintln!("Error encoding output: {}", e);
                    std::process::exit(1);
                }
            };
            write_output(&directory, output.as_deref(), &payload);
        }
    }
}

/// Builds the solve result object: success flag, numeric status, message,
/// and, for optimal outcomes, the objective value and the assignment
/// keyed by variable name in document order.
fn solve_report(document: &LpDocument, solution: &Solution) -> serde_json::Value {
    let mut report = serde_json::Map::new();
    report.insert("success".into(), solution.status.is_success().into());
    report.insert("status".into(), solution.status.code().into());
    report.insert("message".into(), solution.message.clone().into());
    if solution.status.is_success() {
        report.insert("objective_value".into(), solution.objective_value.into());
        let mut values = serde_json::Map::new();
        for (name, value) in document.variable_names.iter().zip(&solution.values) {
            values.insert(name.clone(), (*value).into());
        }
        report.insert("variable_values".into(), values.into());
    } else {
        report.insert("objective_value".into(), serde_json::Value::Null);
        report.insert("variable_values".into(), serde_json::Value::Null);
    }
    serde_json::Value::Object(report)
}

fn read_input(directory: &Path, path: Option<&Path>) -> String {
    let result = match path {
        Some(path) => std::fs::read_to_string(directory.join(path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map(|_| buffer)
        }
    };
    match result {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    }
}

fn write_output(directory: &Path, path: Option<&Path>, payload: &serde_json::Value) {
    let rendered = match serde_json::to_string_pretty(payload) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            std::process::exit(1);
        }
    };
    match path {
        Some(path) => {
            if let Err(e) = std::fs::write(directory.join(path), format!("{rendered}\n")) {
                eprintln!("Error writing output: {}", e);
                std::process::exit(1);
            }
        }
        None => println!("{rendered}"),
    }
}
