use payoffopt_model::{OptimizationOutcome, StrategyOptimizer};
use payoffopt_report::{
    load_strike_grid, result_records, JsonFileReporter, JsonFileWriter, Reporter, ResultWriter,
};
use payoffopt_types::Result;
use tracing::info;

use crate::config::OptimizerConfig;

/// Load the chain, solve, and write the allocation and optional report.
///
/// Results are written only for an optimal outcome; the report is written
/// either way so failed runs leave a trace.
pub fn run(config: &OptimizerConfig) -> Result<OptimizationOutcome> {
    config.validate()?;

    let grid = load_strike_grid(&config.input_path, config.delimiter_byte()?)?;
    let optimizer = StrategyOptimizer::from_config(&config.solver, config.limits.clone())?;
    info!(
        "Optimizing {} strikes with the {} backend",
        grid.len(),
        optimizer.backend_name()
    );

    let outcome = optimizer.optimize(&grid)?;

    if let Some(solution) = outcome.solution() {
        let mut writer = JsonFileWriter::new(&config.output_path);
        writer.write(&result_records(solution))?;
    }

    if let Some(report_path) = &config.report_path {
        JsonFileReporter::new(report_path).publish(&grid, &config.limits, &outcome)?;
    }

    Ok(outcome)
}
