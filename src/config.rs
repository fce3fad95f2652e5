//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). An empty environment yields the
//! classic setup: auction port `12346`, 60-second auctions, no HTTP status
//! surface.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::DEFAULT_QUEUE_CAPACITY;

/// Default TCP address for the auction protocol.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:12346";

/// Default auction countdown in seconds.
pub const DEFAULT_AUCTION_DURATION_SECS: u64 = 60;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable `fmt` output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the auction protocol listener binds to.
    pub listen_addr: SocketAddr,

    /// Time between auction creation and resolution.
    pub auction_duration: Duration,

    /// Optional socket address for the read-only HTTP status surface.
    pub status_addr: Option<SocketAddr>,

    /// Lines a session may have queued before it is dropped as lagging.
    pub session_queue_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 12346)),
            auction_duration: Duration::from_secs(DEFAULT_AUCTION_DURATION_SECS),
            status_addr: None,
            session_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` or `STATUS_ADDR` is set but cannot
    /// be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let status_addr = match std::env::var("STATUS_ADDR") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<SocketAddr>()?),
            _ => None,
        };

        let auction_duration = Duration::from_secs(parse_env(
            "AUCTION_DURATION_SECS",
            DEFAULT_AUCTION_DURATION_SECS,
        ));

        let session_queue_capacity =
            parse_env("SESSION_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY).max(1);

        let log_format = parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref());

        Ok(Self {
            listen_addr,
            auction_duration,
            status_addr,
            session_queue_capacity,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// `"json"` (any case) selects JSON output; everything else is text.
fn parse_log_format(raw: Option<&str>) -> LogFormat {
    match raw {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
