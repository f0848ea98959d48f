use payoffopt_model::{OptimizationOutcome, SolutionSummary};
use payoffopt_solver::{MilpStatus, SolveStats};
use payoffopt_types::{PositionLimits, Result, StrikeGrid};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::hashing::{compute_json_hash, HashRef};
use crate::results::{result_records, write_json, ResultRecords};

/// Run report with input/output hashes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input_hash: HashRef,
    pub output_hash: HashRef,
    pub status: MilpStatus,
    pub report_data: ReportData,
}

/// Report data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub inputs: RunInputs,
    pub outputs: RunOutputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInputs {
    pub grid: StrikeGrid,
    pub limits: PositionLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutputs {
    /// Present only for optimal runs
    pub summary: Option<SolutionSummary>,
    pub records: ResultRecords,
    pub stats: SolveStats,
    pub message: Option<String>,
}

impl RunOutputs {
    fn from_outcome(outcome: &OptimizationOutcome) -> Self {
        match outcome {
            OptimizationOutcome::Optimal(solution) => RunOutputs {
                summary: Some(solution.summary()),
                records: result_records(solution),
                stats: solution.stats.clone(),
                message: None,
            },
            OptimizationOutcome::NoOptimalSolution {
                message, stats, ..
            } => RunOutputs {
                summary: None,
                records: ResultRecords::new(),
                stats: stats.clone(),
                message: message.clone(),
            },
        }
    }
}

/// Reporter trait
pub trait Reporter {
    fn publish(
        &self,
        grid: &StrikeGrid,
        limits: &PositionLimits,
        outcome: &OptimizationOutcome,
    ) -> Result<RunReport>;
}

fn build_report(
    grid: &StrikeGrid,
    limits: &PositionLimits,
    outcome: &OptimizationOutcome,
) -> Result<RunReport> {
    let inputs = RunInputs {
        grid: grid.clone(),
        limits: limits.clone(),
    };
    let outputs = RunOutputs::from_outcome(outcome);

    Ok(RunReport {
        input_hash: compute_json_hash(&inputs)?,
        output_hash: compute_json_hash(&outputs.records)?,
        status: outcome.status(),
        report_data: ReportData { inputs, outputs },
    })
}

/// Simple in-memory reporter
pub struct MemoryReporter;

impl MemoryReporter {
    pub fn new() -> Self {
        MemoryReporter
    }
}

impl Default for MemoryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MemoryReporter {
    fn publish(
        &self,
        grid: &StrikeGrid,
        limits: &PositionLimits,
        outcome: &OptimizationOutcome,
    ) -> Result<RunReport> {
        build_report(grid, limits, outcome)
    }
}

/// Reporter that also persists the report as JSON
pub struct JsonFileReporter {
    path: PathBuf,
}

impl JsonFileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileReporter { path: path.into() }
    }
}

impl Reporter for JsonFileReporter {
    fn publish(
        &self,
        grid: &StrikeGrid,
        limits: &PositionLimits,
        outcome: &OptimizationOutcome,
    ) -> Result<RunReport> {
        let report = build_report(grid, limits, outcome)?;
        write_json(&self.path, &report)?;
        tracing::info!("Wrote run report to {}", self.path.display());
        Ok(report)
    }
}
