use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("No candidates available for this session")]
    NoCandidates,

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Catalog timeout: {0}")]
    CatalogTimeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::CatalogTimeout(err.to_string())
        } else {
            AppError::CatalogUnavailable(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NoCandidates => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::PreconditionFailed(msg) => (StatusCode::PRECONDITION_FAILED, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::CatalogUnavailable(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::CatalogTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
