use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for every fallible payroll operation.
pub type Result<T> = std::result::Result<T, PayrollError>;
