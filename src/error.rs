use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;
use crate::target::UrlKind;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please provide the required information.")]
    MissingInput,

    #[error("Please enter a valid URL (YouTube video or website).")]
    InvalidUrl,

    #[error("Failed to load {} content: {message}", .kind.describe())]
    LoadFailure { kind: UrlKind, message: String },

    #[error("No content was extracted from the provided URL.")]
    EmptyContent,

    #[error("Unexpected Error: {0}")]
    SummarizationFailure(String),

    #[error("Request processing timed out")]
    Timeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput | AppError::InvalidUrl => StatusCode::BAD_REQUEST,
            AppError::LoadFailure { .. } => StatusCode::BAD_GATEWAY,
            AppError::EmptyContent => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SummarizationFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status_code(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
