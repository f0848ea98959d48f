mod input;
mod results;
mod reporter;
mod hashing;

pub use input::{load_strike_grid, load_strike_rows, read_strike_rows, DEFAULT_DELIMITER};
pub use results::{result_records, JsonFileWriter, MemoryWriter, ResultRecords, ResultWriter};
pub use reporter::{
    JsonFileReporter, MemoryReporter, ReportData, Reporter, RunInputs, RunOutputs, RunReport,
};
pub use hashing::{compute_hash, compute_json_hash, hash_file, HashRef};

#[cfg(test)]
mod tests;
