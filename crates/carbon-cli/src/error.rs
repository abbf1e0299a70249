use carbon_core::client::ClientError;
use carbon_core::error::CarbonError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Carbon(#[from] CarbonError),

    #[error("{}", .0.alert_text())]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
