//! Flattened post and comment records
//!
//! A single crawl of a post page produces an ordered `Vec<Record>` whose
//! first element is the Post record. Every Comment record names its parent
//! (the post, or the comment whose subtree contains it), so a caller can
//! rebuild the tree from the flat sequence. Records are transient: nothing
//! here survives past the extraction call that produced it.

use serde::Serialize;

/// Distinguishes the root post from the comments attached to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Post,
    Comment,
}

/// The flattened representation of a post or comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub kind: RecordKind,

    /// Opaque identifier, unique within one post's extraction result.
    /// Uniqueness across posts is the caller's concern.
    pub id: String,

    /// Absent exactly when `kind` is `Post`
    pub parent_id: Option<String>,

    /// Present exactly when `kind` is `Post`
    pub title: Option<String>,

    pub author: String,

    /// Body text collapsed to a single line
    pub content: String,
}

impl Record {
    /// Builds the root record for a post page
    pub fn post(id: &str, title: String, author: String, content: String) -> Self {
        Self {
            kind: RecordKind::Post,
            id: id.to_string(),
            parent_id: None,
            title: Some(title),
            author,
            content,
        }
    }

    /// Builds a comment record attached to `parent_id`
    pub fn comment(id: String, parent_id: &str, author: String, content: String) -> Self {
        Self {
            kind: RecordKind::Comment,
            id,
            parent_id: Some(parent_id.to_string()),
            title: None,
            author,
            content,
        }
    }
}
