use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::pools::identify::NoPools;
use crate::pools::registry::RegistryError;

/// Request-level failures visible to clients. Pool-level failures never take
/// this path; they ride inside the pool result envelope and the warnings
/// array.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    BadRequest { message: String, details: String },
    #[error("authentication failed")]
    Unauthorized,
    #[error("no search pools are available")]
    NoPools,
    #[error("internal failure")]
    Internal(#[from] anyhow::Error),
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<NoPools> for ServiceError {
    fn from(_: NoPools) -> Self {
        Self::NoPools
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    details: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            Self::BadRequest { message, details } => (StatusCode::BAD_REQUEST, message, details),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication failed".to_string(),
                String::new(),
            ),
            Self::NoPools => (
                StatusCode::NOT_FOUND,
                "no search pools are available".to_string(),
                String::new(),
            ),
            Self::Internal(err) => {
                tracing::error!("Internal failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal failure".to_string(),
                    err.to_string(),
                )
            }
        };
        (status, Json(ErrorBody { message, details })).into_response()
    }
}
