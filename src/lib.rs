//! Torboard: a sequential scraper for a forum reachable over an anonymizing proxy
//!
//! This crate enumerates posts within a forum subsection across paginated
//! listings and reconstructs each post's nested comment tree into a flat,
//! parent-referencing record sequence. The crawl is strictly sequential by
//! design to bound the request rate against the target site.

pub mod client;
pub mod config;
pub mod crawler;
pub mod page;
pub mod record;

use thiserror::Error;

/// Main error type for torboard operations
#[derive(Debug, Error)]
pub enum TorboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level failure that survived the single bounded retry.
    /// Fatal to the specific fetch call, not to the overall crawl.
    #[error("Transport failure for {path}: {source}")]
    Transport {
        path: String,
        source: client::TransportFailure,
    },

    /// A well-formed response carrying a non-200 status code. Never retried
    /// automatically; interpreting status codes is the caller's business.
    #[error("Unexpected HTTP status {status} for {path}")]
    Status { path: String, status: u16 },

    /// A required structural element is absent on a post page. Fatal for
    /// that post only; there is no partial post record.
    #[error("Post {post_id} is missing its {field}")]
    Extraction {
        post_id: String,
        field: &'static str,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for torboard operations
pub type Result<T> = std::result::Result<T, TorboardError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{Record, RecordKind};
