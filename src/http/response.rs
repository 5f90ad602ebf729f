//! Upstream response translation.
//!
//! # Responsibilities
//! - Drop transport-framing headers the serving layer must recompute
//! - Overwrite the CORS headers with the relay's permissive values
//! - Stream the upstream body through without buffering it
//!
//! # Design Decisions
//! - Excluded headers are matched case-insensitively (`HeaderName` is
//!   lowercase by construction)
//! - CORS values replace any upstream value; they never merge
//! - Status code passes through unchanged, error statuses included
//! - A non-canonical upstream reason phrase is carried as hyper's
//!   `ReasonPhrase` extension, which the server writes back on HTTP/1

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONNECTION, CONTENT_ENCODING, TRANSFER_ENCODING,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use hyper::ext::ReasonPhrase;

/// Upstream response headers that are never relayed.
pub const EXCLUDED_HEADERS: [HeaderName; 3] = [CONNECTION, TRANSFER_ENCODING, CONTENT_ENCODING];

pub const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
pub const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");
pub const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type, Authorization");

/// Copy upstream headers minus the excluded set, then set the CORS headers.
pub fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 3);
    for (name, value) in upstream {
        if !EXCLUDED_HEADERS.contains(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    apply_cors(&mut headers);
    headers
}

/// Set the CORS headers, replacing whatever was there.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS);
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS);
}

/// Turn an upstream response into the response sent to the caller.
///
/// The body is forwarded chunk by chunk as it arrives. Dropping the returned
/// response drops the upstream stream, which closes the upstream connection.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = relay_headers(upstream.headers());
    let reason = upstream.extensions().get::<ReasonPhrase>().cloned();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    if let Some(reason) = reason {
        response.extensions_mut().insert(reason);
    }
    response
}
