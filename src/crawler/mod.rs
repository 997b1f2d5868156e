//! Crawl core: fetching, pagination, flattening, and post assembly
//!
//! This module contains the sequential crawl logic:
//! - bounded-retry fetching with cookie attachment
//! - listing pagination with end-of-listing detection and rate limiting
//! - comment tree flattening into parent-referencing records
//! - per-post assembly of the root record plus its comment tree
//!
//! Everything here runs on a single logical task; the fixed inter-page and
//! cooldown delays are what bound the request rate against the site.

mod assembler;
mod fetcher;
mod flatten;
mod paginator;
mod status;

pub use assembler::PostAssembler;
pub use fetcher::ResilientFetcher;
pub use flatten::flatten_comments;
pub use paginator::{ListingOptions, ListingPaginator};
pub use status::{check_connectivity, ConnectivityReport};

use crate::config::CrawlConfig;
use crate::record::Record;

impl From<&CrawlConfig> for ListingOptions {
    fn from(crawl: &CrawlConfig) -> Self {
        Self {
            start_page: crawl.start_page,
            sort: crawl.sort.clone(),
            paginate: crawl.paginate,
        }
    }
}

/// Runs a full subsection crawl: lists post ids, then assembles each post
///
/// Returns one record sequence per successfully assembled post, in listing
/// order. A post that fails to fetch or extract is skipped with a warning;
/// per-post failures never abort the run.
///
/// # Arguments
///
/// * `fetcher` - The fetch primitive carrying the session cookies
/// * `crawl` - Crawl parameters (subsection, pagination, delays)
pub async fn crawl_subsection(fetcher: &ResilientFetcher, crawl: &CrawlConfig) -> Vec<Vec<Record>> {
    let paginator = ListingPaginator::new(fetcher, crawl.page_delay(), crawl.retry_cooldown());
    let post_ids = paginator
        .list_post_ids(&crawl.subsection, &ListingOptions::from(crawl))
        .await;
    tracing::info!(
        "Listing for {} produced {} post ids",
        crawl.subsection,
        post_ids.len()
    );

    let assembler = PostAssembler::new(fetcher);
    let mut posts = Vec::new();
    for post_id in &post_ids {
        match assembler.assemble(post_id).await {
            Ok(records) => {
                tracing::info!("Assembled post {} ({} records)", post_id, records.len());
                posts.push(records);
            }
            Err(e) => {
                tracing::warn!("Skipping post {}: {}", post_id, e);
            }
        }
    }

    posts
}

/// Strips a site link down to its trailing path segment
///
/// `/post/abc123` becomes `abc123`; `/u/alice` becomes `alice`.
pub(crate) fn trailing_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Collapses extracted text to a single line
pub(crate) fn single_line(text: &str) -> String {
    text.trim().replace('\n', " ")
}
