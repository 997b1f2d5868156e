//! HTTP transport implementations
//!
//! [`Transport`] is the seam between the crawl core and the network. The
//! contract: a `get` either yields a received HTTP response (whatever its
//! status code) or a [`TransportFailure`] meaning no response was produced
//! at all. The two are never conflated; retry policy keys on the
//! distinction.

use crate::client::cookies::CookieSet;
use crate::config::SiteConfig;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client, Proxy};
use std::time::Duration;
use thiserror::Error;

/// A received HTTP response, reduced to what the extraction layer consumes
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response body text
    pub text: String,
}

impl Response {
    /// Whether the response carries HTTP 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A transport-level failure: the request never produced an HTTP response
///
/// Covers connection refusal, timeouts, and DNS/circuit failures inside the
/// proxy. Distinct from a [`Response`] with an error status code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportFailure {
    message: String,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportFailure {
    /// A failure with no underlying client error (adapters, tests)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // Classify error
        let message = if err.is_timeout() {
            "request timeout".to_string()
        } else if err.is_connect() {
            "connection refused or circuit failure".to_string()
        } else {
            err.to_string()
        };

        Self {
            message,
            source: Some(err),
        }
    }
}

/// The injected transport capability
///
/// Implementations decide how requests reach the network; the crawl core
/// only attaches cookies and interprets the outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET against an absolute URL with the given cookies
    async fn get(&self, url: &str, cookies: &CookieSet) -> Result<Response, TransportFailure>;
}

/// Builds the HTTP client used by [`HttpTransport`]
///
/// When `site.proxy` is configured, all requests route through it; use a
/// `socks5h://` scheme so hostname resolution also happens inside the proxy
/// (hidden-service hostnames cannot be resolved locally). Timeouts are
/// generous because circuits add seconds of latency on a bad day.
///
/// # Arguments
///
/// * `site` - The target site configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(site: &SiteConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(60))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = &site.proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }

    builder.build()
}

/// Production transport: a `reqwest` client, optionally behind the proxy
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the transport from the site configuration
    pub fn new(site: &SiteConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(site)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, cookies: &CookieSet) -> Result<Response, TransportFailure> {
        let mut request = self.client.get(url);
        if let Some(value) = cookies.header_value() {
            request = request.header(header::COOKIE, value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(Response { status, text })
    }
}
