use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main configuration structure for torboard
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawl: CrawlConfig,
    pub cookies: CookiesConfig,
}

/// Target site and transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the forum, without a trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Proxy URL for the anonymizing transport (e.g. socks5h://127.0.0.1:9050).
    /// Omit to connect directly.
    #[serde(default)]
    pub proxy: Option<String>,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Subsection whose post listing is traversed
    pub subsection: String,

    /// Listing page index to start from
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Sort mode token appended to the listing URL (e.g. "new")
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Whether to follow next-page links past the first page
    #[serde(default = "default_paginate")]
    pub paginate: bool,

    /// Delay between listing page fetches, in seconds
    #[serde(rename = "inter-page-delay-secs", default = "default_page_delay")]
    pub inter_page_delay_secs: u64,

    /// Cooldown before retrying a failed fetch, in seconds
    #[serde(rename = "retry-cooldown-secs", default = "default_cooldown")]
    pub retry_cooldown_secs: u64,
}

impl CrawlConfig {
    /// Inter-page delay as a `Duration`
    pub fn page_delay(&self) -> Duration {
        Duration::from_secs(self.inter_page_delay_secs)
    }

    /// Retry cooldown as a `Duration`
    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_secs(self.retry_cooldown_secs)
    }
}

fn default_start_page() -> u32 {
    1
}

fn default_sort() -> String {
    "new".to_string()
}

fn default_paginate() -> bool {
    true
}

fn default_page_delay() -> u64 {
    1
}

fn default_cooldown() -> u64 {
    5
}

/// Session cookie values, acquired manually from a browser after the queue
/// and CAPTCHA
#[derive(Clone, Deserialize)]
pub struct CookiesConfig {
    /// Value of the session identifier cookie
    #[serde(rename = "session-id")]
    pub session_id: String,

    /// Value of the CAPTCHA clearance cookie
    #[serde(rename = "captcha-token")]
    pub captcha_token: String,
}

// Cookie values are session credentials; Debug must not leak them.
impl fmt::Debug for CookiesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookiesConfig")
            .field("session_id", &"[REDACTED]")
            .field("captcha_token", &"[REDACTED]")
            .finish()
    }
}
