use clap::Parser;
use payoffopt_cli::{run, OptimizerConfig};
use payoffopt_solver::SolverKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Maximize option strategy payoff over strike/expiration scenarios
#[derive(Parser)]
#[command(name = "payoffopt", version)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Option chain CSV (overrides the config file)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Result JSON path (overrides the config file)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a run report with input/output hashes
    #[arg(long)]
    report: Option<PathBuf>,

    /// Solver backend name
    #[arg(long)]
    solver: Option<String>,

    /// Solver time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// CSV column separator
    #[arg(long)]
    delimiter: Option<char>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(report) = args.report {
        config.report_path = Some(report);
    }
    if let Some(solver) = args.solver {
        config.solver.backend = solver.parse::<SolverKind>()?;
    }
    if let Some(limit) = args.time_limit {
        config.solver.time_limit_secs = Some(limit);
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }

    let outcome = run(&config)?;

    match outcome.solution() {
        Some(solution) => {
            println!("Optimal payoff: {}", solution.objective);
            println!(
                "{} positions, {} contracts written to {}",
                solution.positions().len(),
                solution.total_contracts(),
                config.output_path.display()
            );
        }
        None => println!("The problem does not have an optimal solution."),
    }

    Ok(())
}
