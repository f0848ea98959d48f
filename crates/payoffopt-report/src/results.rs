use payoffopt_model::StrategySolution;
use payoffopt_types::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Scenario key -> [call_buy, call_sell, put_buy, put_sell]
pub type ResultRecords = BTreeMap<String, [f64; 4]>;

/// Non-zero cells of a solution keyed by "(purchase, expiration)"
pub fn result_records(solution: &StrategySolution) -> ResultRecords {
    solution
        .positions()
        .into_iter()
        .map(|position| {
            let quantities = position.quantities().map(f64::from);
            (position.key(), quantities)
        })
        .collect()
}

/// Destination for solved allocations
pub trait ResultWriter {
    fn write(&mut self, records: &ResultRecords) -> Result<()>;
}

/// Writes records as a JSON object to a file, creating parent directories
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultWriter for JsonFileWriter {
    fn write(&mut self, records: &ResultRecords) -> Result<()> {
        write_json(&self.path, records)?;
        tracing::info!("Wrote {} positions to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the last written records in memory
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub records: Option<ResultRecords>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultWriter for MemoryWriter {
    fn write(&mut self, records: &ResultRecords) -> Result<()> {
        self.records = Some(records.clone());
        Ok(())
    }
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}
