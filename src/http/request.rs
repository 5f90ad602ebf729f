//! Outbound request header construction.
//!
//! # Responsibilities
//! - Stamp the fixed upstream identity on every outbound request
//! - Forward `Authorization` and `Content-Type` verbatim when present
//! - Drop every other inbound header
//!
//! # Design Decisions
//! - The outbound header set is built from scratch, never copied
//! - Identity values are parsed once at construction, not per request
//! - Absent inbound headers are omitted, never sent empty

use axum::http::header::{
    InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE, HOST, USER_AGENT,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::UpstreamConfig;

/// Referer header name the upstream expects (not the standard `Referer`).
pub const HTTP_REFERER: HeaderName = HeaderName::from_static("http-referer");
pub const X_TITLE: HeaderName = HeaderName::from_static("x-title");
pub const X_KILOCODE_VERSION: HeaderName = HeaderName::from_static("x-kilocode-version");
pub const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Inbound headers that are copied to the upstream request.
pub const FORWARDED_HEADERS: [HeaderName; 2] = [AUTHORIZATION, CONTENT_TYPE];

/// Pre-parsed static headers for upstream requests.
#[derive(Debug, Clone)]
pub struct UpstreamHeaders {
    fixed: HeaderMap,
}

impl UpstreamHeaders {
    pub fn new(upstream: &UpstreamConfig) -> Result<Self, InvalidHeaderValue> {
        let mut fixed = HeaderMap::with_capacity(8);
        fixed.insert(HOST, HeaderValue::from_str(&upstream.host)?);
        fixed.insert(HTTP_REFERER, HeaderValue::from_str(&upstream.referer)?);
        fixed.insert(X_TITLE, HeaderValue::from_str(&upstream.title)?);
        fixed.insert(X_KILOCODE_VERSION, HeaderValue::from_str(&upstream.version)?);
        fixed.insert(USER_AGENT, HeaderValue::from_str(&upstream.user_agent)?);
        fixed.insert(X_ACCEL_BUFFERING, HeaderValue::from_static("no"));
        Ok(Self { fixed })
    }

    /// Build the header set for one upstream request.
    pub fn build(&self, inbound: &HeaderMap) -> HeaderMap {
        let mut headers = self.fixed.clone();
        for name in FORWARDED_HEADERS {
            if let Some(value) = inbound.get(&name) {
                headers.insert(name, value.clone());
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> UpstreamHeaders {
        UpstreamHeaders::new(&UpstreamConfig::default()).unwrap()
    }

    #[test]
    fn test_fixed_identity_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert(HOST, HeaderValue::from_static("127.0.0.1:31233"));

        let out = headers().build(&inbound);
        assert_eq!(out[HOST], "kilocode.ai");
        assert_eq!(out[HTTP_REFERER], "https://kilocode.ai");
        assert_eq!(out[X_TITLE], "Kilo Code");
        assert_eq!(out[X_KILOCODE_VERSION], "4.49.2");
        assert_eq!(out[USER_AGENT], "Kilo-Code/4.49.2");
        assert_eq!(out[X_ACCEL_BUFFERING], "no");
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_forwards_authorization_and_content_type_verbatim() {
        let mut inbound = HeaderMap::new();
        inbound.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        inbound.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let out = headers().build(&inbound);
        assert_eq!(out[AUTHORIZATION], "Bearer abc123");
        assert_eq!(out[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_absent_headers_are_omitted() {
        let out = headers().build(&HeaderMap::new());
        assert!(!out.contains_key(AUTHORIZATION));
        assert!(!out.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_other_inbound_headers_are_dropped() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-test", HeaderValue::from_static("foo"));
        inbound.insert("cookie", HeaderValue::from_static("x=y"));
        inbound.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        inbound.insert(USER_AGENT, HeaderValue::from_static("curl/8.0"));

        let out = headers().build(&inbound);
        assert!(!out.contains_key("x-test"));
        assert!(!out.contains_key("cookie"));
        assert!(!out.contains_key("x-forwarded-for"));
        assert_eq!(out[USER_AGENT], "Kilo-Code/4.49.2");
    }

    #[test]
    fn test_invalid_identity_is_rejected() {
        let mut upstream = UpstreamConfig::default();
        upstream.user_agent = "line\nbreak".into();
        assert!(UpstreamHeaders::new(&upstream).is_err());
    }
}
