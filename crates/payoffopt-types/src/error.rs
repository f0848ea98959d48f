use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayoffOptError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("Solver error: {0}")]
    SolverError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for PayoffOptError {
    fn from(err: std::io::Error) -> Self {
        PayoffOptError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for PayoffOptError {
    fn from(err: serde_json::Error) -> Self {
        PayoffOptError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PayoffOptError>;
