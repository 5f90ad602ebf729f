//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup over the static table)
//!     → matcher.rs (exact path comparison)
//!     → Return: matched Route (upstream suffix) or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes fixed at build time, immutable at runtime
//! - Deterministic: same path always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use router::{Route, Router, ROUTES};
