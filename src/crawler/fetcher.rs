//! Bounded-retry fetch primitive
//!
//! Wraps a single GET through the injected transport with cookie attachment
//! and exactly one retry after a fixed cooldown. Circuits through the
//! anonymizing proxy fail transiently often enough that one retry recovers
//! most fetches; anything beyond that is the caller's policy to decide.

use crate::client::{CookieSet, Response, Transport};
use crate::TorboardError;
use std::sync::Arc;
use std::time::Duration;

/// Fetches site paths with cookie attachment and a retry budget of one
pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    base_url: String,
    cookies: CookieSet,
    cooldown: Duration,
}

impl ResilientFetcher {
    /// Creates a fetcher for the given site
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport capability requests go through
    /// * `base_url` - Site base URL; a trailing slash is stripped
    /// * `cookies` - Cookie set attached to every request
    /// * `cooldown` - Wait before the single retry after a transport failure
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        cookies: CookieSet,
        cooldown: Duration,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookies,
            cooldown,
        }
    }

    /// Replaces a cookie between crawl runs (session refresh)
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.set(name, value);
    }

    /// The cookie set currently attached to requests
    pub fn cookies(&self) -> &CookieSet {
        &self.cookies
    }

    /// Fetches `path` (joined onto the base URL) with one bounded retry
    ///
    /// A transport failure is retried exactly once after the cooldown; a
    /// second failure surfaces as [`TorboardError::Transport`] carrying the
    /// attempted path. A received response is returned as-is whatever its
    /// status code; interpreting 4xx/5xx is the caller's responsibility.
    pub async fn fetch(&self, path: &str) -> Result<Response, TorboardError> {
        let url = format!("{}{}", self.base_url, path);

        match self.transport.get(&url, &self.cookies).await {
            Ok(response) => Ok(response),
            Err(first) => {
                tracing::warn!(
                    "Transport failure for {}: {}, retrying in {:?}",
                    path,
                    first,
                    self.cooldown
                );
                tokio::time::sleep(self.cooldown).await;

                self.transport
                    .get(&url, &self.cookies)
                    .await
                    .map_err(|source| TorboardError::Transport {
                        path: path.to_string(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;

    fn fetcher(transport: ScriptedTransport) -> (Arc<ScriptedTransport>, ResilientFetcher) {
        let transport = Arc::new(transport);
        let fetcher = ResilientFetcher::new(
            transport.clone(),
            "http://forum.example",
            CookieSet::new(),
            Duration::from_millis(0),
        );
        (transport, fetcher)
    }

    #[tokio::test]
    async fn test_fetch_success_without_retry() {
        let (transport, fetcher) =
            fetcher(ScriptedTransport::new(vec![ScriptedTransport::ok("body")]));

        let response = fetcher.fetch("/d/OpSec").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text, "body");
        assert_eq!(transport.requests(), vec!["http://forum.example/d/OpSec"]);
    }

    #[tokio::test]
    async fn test_fetch_retries_once_after_failure() {
        let (transport, fetcher) = fetcher(ScriptedTransport::new(vec![
            ScriptedTransport::failure(),
            ScriptedTransport::ok("recovered"),
        ]));

        let response = fetcher.fetch("/d/OpSec").await.unwrap();
        assert_eq!(response.text, "recovered");
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_fails_after_two_failures() {
        let (transport, fetcher) = fetcher(ScriptedTransport::new(vec![
            ScriptedTransport::failure(),
            ScriptedTransport::failure(),
            // A third attempt would consume this; the fetcher must not
            ScriptedTransport::ok("never"),
        ]));

        let err = fetcher.fetch("/d/OpSec").await.unwrap_err();
        match err {
            TorboardError::Transport { path, .. } => assert_eq!(path, "/d/OpSec"),
            other => panic!("expected Transport error, got {:?}", other),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry_http_error_status() {
        let (transport, fetcher) = fetcher(ScriptedTransport::new(vec![ScriptedTransport::status(
            403, "forbidden",
        )]));

        let response = fetcher.fetch("/post/abc").await.unwrap();
        assert_eq!(response.status, 403);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_stripped() {
        let transport = Arc::new(ScriptedTransport::new(vec![ScriptedTransport::ok("")]));
        let fetcher = ResilientFetcher::new(
            transport.clone(),
            "http://forum.example/",
            CookieSet::new(),
            Duration::from_millis(0),
        );

        fetcher.fetch("/d/OpSec").await.unwrap();
        assert_eq!(transport.requests(), vec!["http://forum.example/d/OpSec"]);
    }

    #[tokio::test]
    async fn test_set_cookie_updates_the_set() {
        let (_, mut fetcher) = fetcher(ScriptedTransport::new(vec![]));
        fetcher.set_cookie("session-id", "fresh");
        assert_eq!(fetcher.cookies().get("session-id"), Some("fresh"));
    }
}
