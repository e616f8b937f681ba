use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Error taxonomy for the marketplace core.
///
/// Every variant maps to a stable HTTP status so callers can tell a
/// retryable failure (`Conflict`, `Unavailable`) from a terminal one.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{0}")]
    Forbidden(String),

    /// The entity exists but is in a state that rejects the request,
    /// e.g. bidding on a gig that is no longer open.
    #[error("{0}")]
    InvalidState(String),

    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// A concurrent hire won the exclusivity gate first.
    #[error("{0}")]
    Conflict(String),

    /// Storage contention persisted through all retry attempts.
    #[error("storage is temporarily unavailable, retry later")]
    Unavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        AppError::Forbidden(reason.into())
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        AppError::Internal(cause.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyAssigned => {
                AppError::Conflict("gig is already assigned".to_string())
            }
            // A record that passed the preconditions disappeared mid-flight;
            // referential integrity should make this unreachable.
            StoreError::RecordVanished(what) => {
                AppError::internal(format!("{what} vanished during transaction"))
            }
            StoreError::Transient(cause) => AppError::internal(cause),
            StoreError::Db(e) => AppError::internal(e),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidState(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal causes stay in the logs, not the response body.
        let message = match self {
            AppError::Internal(cause) => {
                tracing::error!(%cause, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": message,
        }))
    }
}
