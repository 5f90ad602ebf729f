//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Check the upstream identity can actually be put on the wire
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::{RelayConfig, UpstreamConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream base URL `{0}` must be an absolute http(s) URL with a host")]
    UpstreamUrl(String),

    #[error("upstream header `{name}` has an invalid value")]
    HeaderValue { name: &'static str },

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    errors.extend(validate_upstream(&config.upstream));

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.response_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("response_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(upstream: &UpstreamConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let url_ok = Url::parse(&upstream.base_url)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);
    if !url_ok {
        errors.push(ValidationError::UpstreamUrl(upstream.base_url.clone()));
    }

    let literals = [
        ("host", &upstream.host),
        ("http-referer", &upstream.referer),
        ("x-title", &upstream.title),
        ("x-kilocode-version", &upstream.version),
        ("user-agent", &upstream.user_agent),
    ];
    for (name, value) in literals {
        if value.is_empty() || HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::HeaderValue { name });
        }
    }

    errors
}
