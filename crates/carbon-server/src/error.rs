use actix_web::http::StatusCode;
use actix_web::error::BlockingError;
use actix_web::{HttpResponse, ResponseError};
use carbon_core::analysis::ErrorBody;
use carbon_core::error::CarbonError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("File exceeds the upload limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Analysis(#[from] CarbonError),

    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Analysis worker failed: {0}")]
    Worker(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Analysis(CarbonError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Analysis(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
