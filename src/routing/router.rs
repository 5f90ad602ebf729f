//! Route lookup.
//!
//! # Responsibilities
//! - Hold the static inbound → upstream path table
//! - Look up the upstream suffix for a request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Table is compiled in; immutable and shared without locks
//! - O(n) scan over two entries
//! - Explicit NoMatch rather than silent default

use axum::body::Body;
use axum::http::Request;

use crate::routing::matcher::{ExactPathMatcher, Matcher};

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Route identifier for logging.
    pub name: &'static str,
    matcher: ExactPathMatcher,
    /// Path appended to the upstream base URL.
    pub upstream_suffix: &'static str,
}

impl Route {
    pub const fn new(name: &'static str, path: &'static str, upstream_suffix: &'static str) -> Self {
        Self {
            name,
            matcher: ExactPathMatcher::new(path),
            upstream_suffix,
        }
    }

    /// The inbound path this route answers to.
    pub fn path(&self) -> &'static str {
        self.matcher.path()
    }
}

/// The fixed routing table.
pub const ROUTES: &[Route] = &[
    Route::new("models", "/v1/models", "/api/openrouter/models"),
    Route::new(
        "chat_completions",
        "/v1/chat/completions",
        "/api/openrouter/chat/completions",
    ),
];

/// Immutable route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: &'static [Route],
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: ROUTES }
    }
}

impl Router {
    /// Find the route for a request, if any.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&'static Route> {
        let routes: &'static [Route] = self.routes;
        routes.iter().find(|route| route.matcher.matches(req))
    }

    /// Find the route for a bare path, if any.
    pub fn match_path(&self, path: &str) -> Option<&'static Route> {
        let routes: &'static [Route] = self.routes;
        routes.iter().find(|route| route.matcher.matches_path(path))
    }

    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }
}
