//! Listing pagination driver
//!
//! Walks a subsection's post listing page by page, collecting post
//! identifiers until the next-page affordance disappears, pagination is
//! disabled, or the listing stops answering. Identifiers already gathered
//! are never discarded: every exit path returns the accumulator as-is.

use crate::crawler::fetcher::ResilientFetcher;
use crate::crawler::trailing_segment;
use crate::page::PageView;
use std::time::Duration;

/// Link prefix that marks an anchor as pointing at a post
const POST_LINK_PREFIX: &str = "/post/";

/// Options controlling one listing traversal
#[derive(Debug, Clone)]
pub struct ListingOptions {
    /// Listing page index to start from
    pub start_page: u32,

    /// Sort mode token appended to the listing URL
    pub sort: String,

    /// Whether to follow next-page links past the first page
    pub paginate: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            sort: "new".to_string(),
            paginate: true,
        }
    }
}

/// What one listing page contributed to the traversal
struct ListingPage {
    post_ids: Vec<String>,
    next_args: Option<String>,
}

/// Drives repeated listing fetches with an inter-page delay
pub struct ListingPaginator<'a> {
    fetcher: &'a ResilientFetcher,
    page_delay: Duration,
    retry_cooldown: Duration,
}

impl<'a> ListingPaginator<'a> {
    /// Creates a paginator over the given fetcher
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetch primitive (which already retries once itself)
    /// * `page_delay` - Sleep between listing pages, to stay under rate limits
    /// * `retry_cooldown` - Extra cooldown before re-attempting a failed advance
    pub fn new(
        fetcher: &'a ResilientFetcher,
        page_delay: Duration,
        retry_cooldown: Duration,
    ) -> Self {
        Self {
            fetcher,
            page_delay,
            retry_cooldown,
        }
    }

    /// Collects post identifiers from a subsection listing
    ///
    /// Traversal starts at `/d/{subsection}?p={start}&sort={sort}` and
    /// follows next-page links while pagination is enabled. The result is
    /// the concatenation of per-page identifiers in page order; duplicates
    /// are not suppressed. This never fails: any fetch failure or non-200
    /// page terminates the traversal with whatever has been accumulated.
    pub async fn list_post_ids(&self, subsection: &str, options: &ListingOptions) -> Vec<String> {
        let mut post_ids = Vec::new();

        let first_path = format!(
            "/d/{}?p={}&sort={}",
            subsection, options.start_page, options.sort
        );
        let mut response = match self.fetcher.fetch(&first_path).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Listing fetch for {} failed: {}", subsection, e);
                return post_ids;
            }
        };

        loop {
            // A non-200 listing page ends the traversal
            if !response.is_ok() {
                tracing::warn!(
                    "Listing for {} returned HTTP {}, stopping",
                    subsection,
                    response.status
                );
                break;
            }

            let page = extract_listing(&response.text);
            tracing::debug!(
                "Listing page contributed {} post ids",
                page.post_ids.len()
            );
            post_ids.extend(page.post_ids);

            // Follow the next-page affordance only while pagination is on
            let Some(next_args) = page.next_args else {
                break;
            };
            if !options.paginate {
                break;
            }

            let next_path = format!("/d/{}{}", subsection, next_args);
            tracing::info!("Posts found: {}, next page {}", post_ids.len(), next_path);

            // Sleep between pages to avoid tripping the site's rate limits
            tokio::time::sleep(self.page_delay).await;

            response = match self.fetcher.fetch(&next_path).await {
                Ok(response) => response,
                Err(first) => {
                    // One extra cooldown-and-retry cycle around the advance;
                    // if that also fails, return what we have
                    tracing::warn!(
                        "Advance to {} failed: {}, cooling down for {:?}",
                        next_path,
                        first,
                        self.retry_cooldown
                    );
                    tokio::time::sleep(self.retry_cooldown).await;

                    match self.fetcher.fetch(&next_path).await {
                        Ok(response) => {
                            tracing::info!("Advance recovered, continuing");
                            response
                        }
                        Err(second) => {
                            tracing::warn!(
                                "Advance failed twice ({}), returning {} collected ids",
                                second,
                                post_ids.len()
                            );
                            break;
                        }
                    }
                }
            };
        }

        tracing::info!("Posts found: {}", post_ids.len());
        post_ids
    }
}

/// Extracts post identifiers and the next-page link from one listing page
fn extract_listing(body: &str) -> ListingPage {
    let page = PageView::parse(body);

    let post_ids = page
        .find_all("a", "title")
        .into_iter()
        .filter_map(|anchor| anchor.attr("href"))
        .filter(|href| href.starts_with(POST_LINK_PREFIX))
        .map(|href| trailing_segment(href).to_string())
        .collect();

    let next_args = page
        .find_first("a", "next")
        .and_then(|anchor| anchor.attr("href"))
        .map(str::to_string);

    ListingPage {
        post_ids,
        next_args,
    }
}
