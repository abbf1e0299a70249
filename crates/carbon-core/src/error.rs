use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CarbonError {
    #[error("failed to read input: {0}")]
    Input(String),

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("File must contain Product, Category, Units_Sold columns")]
    MissingColumns { missing: Vec<String> },

    #[error("failed to load table from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },

    #[error("invalid table: {0}")]
    TableInvalid(String),

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("No data to export")]
    NothingToExport,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
