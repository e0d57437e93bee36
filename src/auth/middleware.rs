use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::service::context::ServiceContext;
use crate::service::error::ServiceError;

use super::claims::{bearer_token, validate_token};

/// Verifies the bearer JWT and stores the parsed claims in request
/// extensions. Everything under /api runs behind this.
pub async fn require_auth(
    State(ctx): State<Arc<ServiceContext>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let Some(token) = bearer_token(header_value) else {
        tracing::warn!("Authentication failed: invalid Authorization header");
        return Err(ServiceError::Unauthorized);
    };

    // some clients send the literal string when their token variable is unset
    if token == "undefined" {
        tracing::warn!("Authentication failed: bearer token is undefined");
        return Err(ServiceError::Unauthorized);
    }

    match validate_token(token, &ctx.jwt_key) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::warn!("JWT validation failed: {}", err);
            Err(ServiceError::Unauthorized)
        }
    }
}
