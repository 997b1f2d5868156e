//! Transport and site connectivity diagnostics
//!
//! Two probes run before a crawl is worth starting: is traffic actually
//! leaving through the anonymizing transport, and does the target site
//! answer? Both are purely diagnostic: results go to the log and the
//! returned report; nothing here is consulted by the crawl path.

use crate::client::{CookieSet, Transport};
use crate::page::PageView;

/// URL of the transport project's self-check page
const CHECK_URL: &str = "http://check.torproject.org/";

/// Title the check page carries when requests go through the transport
const CHECK_MARKER: &str = "Congratulations. This browser is configured to use Tor.";

/// Result of the two connectivity probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Whether requests are routed through the anonymizing transport
    pub transport_ok: bool,

    /// Whether the target site root answered with HTTP 200
    pub site_ok: bool,
}

/// Probes the anonymizing transport, then the target site
///
/// The transport probe fetches the well-known check page without cookies
/// and looks for the success marker in its title. The site probe fetches
/// the forum root with the session cookies attached; a non-200 there
/// usually means the cookies have expired.
pub async fn check_connectivity(
    transport: &dyn Transport,
    base_url: &str,
    cookies: &CookieSet,
) -> ConnectivityReport {
    let transport_ok = match transport.get(CHECK_URL, &CookieSet::new()).await {
        Ok(response) if response.is_ok() => check_page_confirms(&response.text),
        Ok(response) => {
            tracing::warn!(
                "Unexpected status {} from the transport check page",
                response.status
            );
            false
        }
        Err(e) => {
            tracing::error!("Failed to reach the transport check page: {}", e);
            false
        }
    };

    let root = format!("{}/", base_url.trim_end_matches('/'));
    let site_ok = match transport.get(&root, cookies).await {
        Ok(response) if response.is_ok() => {
            tracing::info!("Connected to the site successfully");
            true
        }
        Ok(response) => {
            tracing::warn!("Unexpected status {} from the site", response.status);
            false
        }
        Err(e) => {
            tracing::error!("Failed to connect to the site: {}", e);
            false
        }
    };

    ConnectivityReport {
        transport_ok,
        site_ok,
    }
}

fn check_page_confirms(body: &str) -> bool {
    match PageView::parse(body).first_by_tag("title") {
        Some(title) if title.text() == CHECK_MARKER => {
            tracing::info!("Transport is configured correctly");
            true
        }
        Some(title) => {
            tracing::warn!("Transport check page says: {}", title.text());
            false
        }
        None => {
            tracing::warn!("Transport check page had no title");
            false
        }
    }
}
