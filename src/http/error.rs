//! Mapping of handler outcomes to HTTP responses.
//!
//! # Status mapping
//! - `InProgress` → 202 (accepted, not ready)
//! - `Timeout` → 408
//! - `MalformedResult` → 500
//! - unknown request id → 404
//! - submission validation → 400
//! - backbone/storage failures → 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::analyses::resolver::ResolveError;
use crate::analyses::RequestId;
use crate::backbone::BackboneError;
use crate::storage::StoreError;

/// Everything a handler can surface to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request id was never submitted.
    #[error("invalid request ID '{0}'")]
    UnknownRequest(RequestId),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Submission failed validation.
    #[error("error processing request, {0}")]
    InvalidParams(String),

    /// The backbone did not accept the submission.
    #[error("could not process request {id}")]
    Backbone {
        id: RequestId,
        #[source]
        source: BackboneError,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownRequest(_) => StatusCode::NOT_FOUND,
            ApiError::Resolve(ResolveError::InProgress(_)) => StatusCode::ACCEPTED,
            ApiError::Resolve(ResolveError::Timeout { .. }) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Resolve(ResolveError::MalformedResult(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            ApiError::Backbone { .. } | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn id() -> RequestId {
        RequestId::new("req")
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::UnknownRequest(id()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Resolve(ResolveError::InProgress(id())).status(),
            StatusCode::ACCEPTED
        );
        assert_eq!(
            ApiError::Resolve(ResolveError::Timeout {
                id: id(),
                elapsed: Duration::from_secs(700),
            })
            .status(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            ApiError::Resolve(ResolveError::MalformedResult(id())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidParams("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_body_carries_message() {
        let err = ApiError::Resolve(ResolveError::InProgress(id()));
        assert_eq!(
            err.to_string(),
            "analysis for request ID 'req' is in progress"
        );
    }
}
