//! Relay error taxonomy.
//!
//! Every variant maps to a complete response, so the handler never hands a
//! fault to the serving layer. Upstream error statuses are not errors here;
//! they are relayed as-is.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body returned for paths outside the routing table.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Body returned when the upstream call fails. Carries no upstream detail.
pub const UPSTREAM_FAILURE_BODY: &str = "Proxy server error";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("no route for path `{path}`")]
    RouteNotFound { path: String },

    #[error("upstream request to {target} failed: {source}")]
    UpstreamDispatch {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream {target} sent no response within {after:?}")]
    UpstreamTimeout { target: String, after: Duration },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::UpstreamDispatch { .. } | RelayError::UpstreamTimeout { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::RouteNotFound { path } => {
                tracing::debug!(path = %path, "No route matched");
                (self.status_code(), NOT_FOUND_BODY).into_response()
            }
            RelayError::UpstreamDispatch { .. } | RelayError::UpstreamTimeout { .. } => {
                tracing::error!(error = %self, "Upstream request failed");
                (self.status_code(), UPSTREAM_FAILURE_BODY).into_response()
            }
        }
    }
}
