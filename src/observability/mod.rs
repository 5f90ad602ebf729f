//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - Each request runs in a span carrying a generated request id; the id is
//!   logged only, never sent upstream or back to the caller
//! - Upstream failure detail goes to the log, never into a response

pub mod logging;

pub use logging::init_logging;
