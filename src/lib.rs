//! Streaming relay from two OpenAI-style paths to the Kilo Code OpenRouter API.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::{HttpServer, RelayHandler};
pub use lifecycle::Shutdown;
