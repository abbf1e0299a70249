//! Client side of the upload protocol: request target and response decoding.

use crate::analysis::outcome::{AnalysisResult, ErrorBody};

/// Endpoint that accepts the uploaded sheet.
pub const UPLOAD_ENDPOINT: &str = "/upload-file";

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Message used when a failed response carries no `error` text.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Please select a file first.")]
    NoFileSelected,

    #[error("an analysis is already in progress")]
    AlreadyInFlight,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    /// The result arrived but could not be shown.
    #[error("{0}")]
    Render(String),
}

impl ClientError {
    /// Text shown to the user in a blocking alert.
    pub fn alert_text(&self) -> String {
        match self {
            ClientError::NoFileSelected => self.to_string(),
            other => format!("Error processing file: {other}"),
        }
    }
}

/// Absolute upload URL for a server base such as `http://127.0.0.1:5000/`.
/// An empty base gives the relative endpoint used by the page itself.
pub fn upload_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), UPLOAD_ENDPOINT)
}

/// Turn a status code and response body into an analysis result.
pub fn interpret_response(status: u16, body: &str) -> Result<AnalysisResult, ClientError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());

    Err(ClientError::Server { status, message })
}
