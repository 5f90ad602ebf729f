//! Configuration schema definitions.
//!
//! Only the operational knobs (listener, timeouts, logging) are read from
//! config files. The upstream identity is compiled in and injected as a plain
//! struct, so it never changes at runtime.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream API base URL.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://kilocode.ai";

/// Value sent as the `Host` header on every upstream request.
pub const DEFAULT_UPSTREAM_HOST: &str = "kilocode.ai";

/// Client version advertised to the upstream.
pub const CLIENT_VERSION: &str = "4.49.2";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Fixed upstream identity. Never read from files or the environment.
    #[serde(skip)]
    pub upstream: UpstreamConfig,

    /// Upstream timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:31233").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:31233".to_string(),
        }
    }
}

/// The upstream the relay forwards to, plus the identification headers it
/// stamps on every outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Scheme and authority prepended to every mapped path suffix.
    pub base_url: String,

    /// Literal `Host` header value, independent of the inbound `Host`.
    pub host: String,

    /// `HTTP-Referer` header value.
    pub referer: String,

    /// `X-Title` header value.
    pub title: String,

    /// `X-KiloCode-Version` header value.
    pub version: String,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            host: DEFAULT_UPSTREAM_HOST.to_string(),
            referer: DEFAULT_UPSTREAM_BASE.to_string(),
            title: "Kilo Code".to_string(),
            version: CLIENT_VERSION.to_string(),
            user_agent: format!("Kilo-Code/{}", CLIENT_VERSION),
        }
    }
}

impl UpstreamConfig {
    /// Same identity, different base URL. Used to aim the relay at a stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full upstream URL for a mapped path suffix.
    pub fn target_url(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), suffix)
    }
}

/// Timeouts applied to upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed until upstream response headers arrive, in seconds.
    /// A body that is already streaming is never cut by this.
    pub response_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            response_secs: 60,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn response(&self) -> Duration {
        Duration::from_secs(self.response_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_deployment() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:31233");
        assert_eq!(config.upstream.base_url, "https://kilocode.ai");
        assert_eq!(config.upstream.host, "kilocode.ai");
        assert_eq!(config.upstream.user_agent, "Kilo-Code/4.49.2");
        assert_eq!(config.timeouts.connect(), Duration::from_secs(10));
        assert_eq!(config.timeouts.response(), Duration::from_secs(60));
    }

    #[test]
    fn test_target_url_joins_base_and_suffix() {
        let upstream = UpstreamConfig::default();
        assert_eq!(
            upstream.target_url("/api/openrouter/models"),
            "https://kilocode.ai/api/openrouter/models"
        );

        let stub = UpstreamConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            stub.target_url("/api/openrouter/chat/completions"),
            "http://127.0.0.1:9000/api/openrouter/chat/completions"
        );
        assert_eq!(stub.host, "kilocode.ai");
    }

    #[test]
    fn test_upstream_is_not_read_from_files() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "https://elsewhere.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream, UpstreamConfig::default());
    }
}
