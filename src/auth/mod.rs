//! Bearer-token authentication for the API surface.
//!
//! Token issuance and rotation live with the surrounding platform; this
//! middleware only checks equality against the configured token.
//! Readiness/liveness probes are mounted outside this middleware.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::server::AppState;

pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if !state.auth.enabled {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Some(value) = header {
        if value == format!("Bearer {}", state.auth.token) {
            return Ok(next.run(request).await);
        }
    }

    tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated API call");
    Err(StatusCode::UNAUTHORIZED)
}
