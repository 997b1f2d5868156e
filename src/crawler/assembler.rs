//! Single-post assembly
//!
//! Fetches one post page, extracts the root post record, and appends the
//! flattened comment tree. The root post is all-or-nothing: a page missing
//! its title, author link, or body is reported as an extraction failure for
//! that post rather than producing a partial record. Individual comments
//! degrade instead (see the flattener).

use crate::crawler::fetcher::ResilientFetcher;
use crate::crawler::flatten::flatten_comments;
use crate::crawler::{single_line, trailing_segment};
use crate::page::PageView;
use crate::record::Record;
use crate::TorboardError;

/// Assembles a post and its comment tree into a flat record sequence
pub struct PostAssembler<'a> {
    fetcher: &'a ResilientFetcher,
}

impl<'a> PostAssembler<'a> {
    /// Creates an assembler over the given fetcher
    pub fn new(fetcher: &'a ResilientFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches and extracts a post with its flattened comments
    ///
    /// The first record is always the Post; the remaining records are
    /// Comments in flattening order (each one after its entire subtree).
    /// Against an unchanged page, repeated calls yield identical sequences.
    ///
    /// # Errors
    ///
    /// * [`TorboardError::Transport`] - the fetch failed past its retry
    /// * [`TorboardError::Status`] - the page answered with a non-200 status
    /// * [`TorboardError::Extraction`] - a mandatory root field is missing
    pub async fn assemble(&self, post_id: &str) -> Result<Vec<Record>, TorboardError> {
        let path = format!("/post/{}", post_id);
        let response = self.fetcher.fetch(&path).await?;

        tracing::debug!("Post {} answered with status {}", post_id, response.status);
        if !response.is_ok() {
            return Err(TorboardError::Status {
                path,
                status: response.status,
            });
        }

        extract_records(post_id, &response.text)
    }
}

/// Extracts the full record sequence from a post page body
fn extract_records(post_id: &str, body: &str) -> Result<Vec<Record>, TorboardError> {
    let page = PageView::parse(body);

    let title = page
        .find_first("a", "title")
        .map(|anchor| anchor.text())
        .ok_or(TorboardError::Extraction {
            post_id: post_id.to_string(),
            field: "title",
        })?;

    // The author handle is the trailing segment of the first link inside
    // the author element
    let author = page
        .find_first("div", "author")
        .and_then(|div| div.first_by_tag("a"))
        .and_then(|anchor| anchor.attr("href"))
        .map(|href| trailing_segment(href).to_string())
        .ok_or(TorboardError::Extraction {
            post_id: post_id.to_string(),
            field: "author",
        })?;

    let content = page
        .find_first("div", "postContent")
        .map(|div| single_line(&div.text()))
        .ok_or(TorboardError::Extraction {
            post_id: post_id.to_string(),
            field: "content",
        })?;

    let mut records = vec![Record::post(post_id, title, author, content)];

    // A post without a comment container yields the root record alone
    match page.find_first("div", "postComments") {
        Some(container) => {
            let top_level = container.find_all("div", "comment", true);
            flatten_comments(&top_level, post_id, &mut records);
        }
        None => tracing::debug!("No comments found for post {}", post_id),
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;
    use crate::client::{CookieSet, Response, TransportFailure};
    use crate::record::RecordKind;
    use std::sync::Arc;
    use std::time::Duration;

    fn post_page(comments: &str) -> String {
        format!(
            r#"<html><body>
                <a class="title" href="/post/abc123">Exit scam warning</a>
                <div class="author">posted by <a href="/u/alice">alice</a></div>
                <div class="postContent">First line.
Second line.</div>
                {comments}
            </body></html>"#
        )
    }

    async fn assemble(
        steps: Vec<Result<Response, TransportFailure>>,
        post_id: &str,
    ) -> Result<Vec<Record>, TorboardError> {
        let transport = Arc::new(ScriptedTransport::new(steps));
        let fetcher = ResilientFetcher::new(
            transport,
            "http://forum.example",
            CookieSet::new(),
            Duration::from_millis(0),
        );
        PostAssembler::new(&fetcher).assemble(post_id).await
    }

    #[tokio::test]
    async fn test_post_without_comment_container_is_singleton() {
        let records = assemble(
            vec![ScriptedTransport::ok(&post_page(""))],
            "abc123",
        )
        .await
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Post);
        assert_eq!(records[0].id, "abc123");
        assert_eq!(records[0].parent_id, None);
        assert_eq!(records[0].title.as_deref(), Some("Exit scam warning"));
        assert_eq!(records[0].author, "alice");
        assert_eq!(records[0].content, "First line. Second line.");
    }

    #[tokio::test]
    async fn test_empty_comment_container_is_singleton() {
        let records = assemble(
            vec![ScriptedTransport::ok(&post_page(
                r#"<div class="postComments"></div>"#,
            ))],
            "abc123",
        )
        .await
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Post);
    }

    #[tokio::test]
    async fn test_comments_follow_the_post_record() {
        let comments = r#"<div class="postComments">
            <div class="comment" id="c1">
                <a class="username" href="/u/bob">bob</a>
                <div class="commentBody">outer</div>
                <div class="comment" id="c2">
                    <a class="username" href="/u/carol">carol</a>
                    <div class="commentBody">inner</div>
                </div>
            </div>
        </div>"#;

        let records = assemble(
            vec![ScriptedTransport::ok(&post_page(comments))],
            "abc123",
        )
        .await
        .unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["abc123", "c2", "c1"]);

        // Top-level comments link to the post; nested ones to their parent
        let c1 = records.iter().find(|r| r.id == "c1").unwrap();
        assert_eq!(c1.parent_id.as_deref(), Some("abc123"));
        let c2 = records.iter().find(|r| r.id == "c2").unwrap();
        assert_eq!(c2.parent_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_missing_title_is_fatal_for_the_post() {
        let body = r#"<html><body>
            <div class="author"><a href="/u/alice">alice</a></div>
            <div class="postContent">text</div>
        </body></html>"#;

        let err = assemble(vec![ScriptedTransport::ok(body)], "abc123")
            .await
            .unwrap_err();

        match err {
            TorboardError::Extraction { post_id, field } => {
                assert_eq!(post_id, "abc123");
                assert_eq!(field, "title");
            }
            other => panic!("expected Extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_author_is_fatal_for_the_post() {
        let body = r#"<html><body>
            <a class="title" href="/post/abc123">Title</a>
            <div class="postContent">text</div>
        </body></html>"#;

        let err = assemble(vec![ScriptedTransport::ok(body)], "abc123")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TorboardError::Extraction { field: "author", .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_content_is_fatal_for_the_post() {
        let body = r#"<html><body>
            <a class="title" href="/post/abc123">Title</a>
            <div class="author"><a href="/u/alice">alice</a></div>
        </body></html>"#;

        let err = assemble(vec![ScriptedTransport::ok(body)], "abc123")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TorboardError::Extraction {
                field: "content",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_non_200_is_a_status_error() {
        let err = assemble(
            vec![ScriptedTransport::status(404, "gone")],
            "abc123",
        )
        .await
        .unwrap_err();

        match err {
            TorboardError::Status { path, status } => {
                assert_eq!(path, "/post/abc123");
                assert_eq!(status, 404);
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_assemble_is_idempotent_against_unchanged_page() {
        let comments = r#"<div class="postComments">
            <div class="comment" id="c1">
                <a class="username" href="/u/bob">bob</a>
                <div class="commentBody">reply</div>
            </div>
        </div>"#;
        let body = post_page(comments);

        let first = assemble(vec![ScriptedTransport::ok(&body)], "abc123")
            .await
            .unwrap();
        let second = assemble(vec![ScriptedTransport::ok(&body)], "abc123")
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
