//! Transport layer: the injected HTTP capability and the cookie set
//!
//! The crawl core composes a [`Transport`] rather than owning one, so the
//! anonymizing proxy, circuit management, and timeouts stay out of the
//! retry/extraction logic. The production transport is a `reqwest` client
//! routed through a SOCKS5 proxy; tests substitute scripted transports.

mod cookies;
mod transport;

pub use cookies::{CookieSet, CAPTCHA_COOKIE, SESSION_COOKIE};
pub use transport::{build_http_client, HttpTransport, Response, Transport, TransportFailure};

#[cfg(test)]
pub(crate) use transport::testing;
