//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace span)
//!     → relay.rs (route lookup, upstream dispatch)
//!         → request.rs (fresh outbound header set)
//!         → response.rs (filter framing headers, add CORS, stream body)
//!     → Send to client
//! ```

pub mod relay;
pub mod request;
pub mod response;
pub mod server;

pub use relay::{HandlerError, RelayHandler};
pub use server::HttpServer;
