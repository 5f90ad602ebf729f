//! Route matching logic.
//!
//! # Design Decisions
//! - Path matching is exact and case-sensitive
//! - No trailing-slash normalization: `/v1/models/` is a different path
//! - The method is not part of the match
//! - Query strings never take part in the match

use axum::body::Body;
use axum::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches one request path exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactPathMatcher {
    path: &'static str,
}

impl ExactPathMatcher {
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Match against a bare path rather than a full request.
    pub fn matches_path(&self, path: &str) -> bool {
        path == self.path
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}
