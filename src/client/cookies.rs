//! Session cookie handling
//!
//! The target site gates content behind two cookies whose values are
//! acquired manually from a browser (queue wait plus CAPTCHA) and supplied
//! through configuration. The cookie set is read-mostly input: the only
//! mutation path is [`CookieSet::set`], invoked between crawl runs when the
//! session is refreshed, never during one.

use std::collections::BTreeMap;
use std::fmt;

/// Name of the session identifier cookie the site requires
pub const SESSION_COOKIE: &str = "session-id";

/// Name of the CAPTCHA clearance cookie the site requires
pub const CAPTCHA_COOKIE: &str = "captcha-token";

/// The cookie set attached to every request
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieSet {
    cookies: BTreeMap<String, String>,
}

impl CookieSet {
    /// An empty cookie set (connectivity probes, tests)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the cookie set the target site functionally requires
    pub fn for_session(session_id: &str, captcha_token: &str) -> Self {
        let mut cookies = Self::new();
        cookies.set(SESSION_COOKIE, session_id);
        cookies.set(CAPTCHA_COOKIE, captcha_token);
        cookies
    }

    /// Sets or replaces a cookie (the between-runs update operation)
    pub fn set(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Value of a cookie, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders the `Cookie` request header, or `None` when the set is empty
    ///
    /// Cookies are emitted in name order, so the same set always produces
    /// the same header.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }
}

// Cookie values are session credentials; Debug shows names only.
impl fmt::Debug for CookieSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSet")
            .field("names", &self.cookies.keys().collect::<Vec<_>>())
            .field("values", &"[REDACTED]")
            .finish()
    }
}
