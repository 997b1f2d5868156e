//! Comment tree flattening
//!
//! Walks an arbitrarily deep, unbalanced comment tree and produces a flat
//! record sequence. Ordering invariant: a comment's own record is appended
//! strictly after every record in its subtree, and siblings are processed
//! left to right. Callers rebuilding the tree from the flat sequence rely
//! on this exact ordering, so it must not be "fixed" to parent-first.

use crate::crawler::{single_line, trailing_segment};
use crate::page::ElementView;
use crate::record::Record;

const COMMENT_TAG: &str = "div";
const COMMENT_CLASS: &str = "comment";

/// Flattens sibling comment nodes into `out`, in document order
///
/// For each node: its direct-child comment nodes are flattened first, with
/// the node's own id as their parent, and the node's own record is appended
/// last. `parent_id` names the enclosing post or comment.
///
/// A node missing its author or body degrades to an empty field rather than
/// being dropped; its descendants still need it as their parent link.
pub fn flatten_comments(nodes: &[ElementView<'_>], parent_id: &str, out: &mut Vec<Record>) {
    for node in nodes {
        let id = node.attr("id").unwrap_or_default().to_string();
        if id.is_empty() {
            tracing::warn!("Comment under {} has no id attribute", parent_id);
        }

        let author = match node
            .find_first("a", "username")
            .and_then(|anchor| anchor.attr("href"))
        {
            Some(href) => trailing_segment(href).to_string(),
            None => {
                tracing::warn!("Comment {} has no username link", id);
                String::new()
            }
        };

        let content = match node.find_first("div", "commentBody") {
            Some(body) => single_line(&body.text()),
            None => {
                tracing::warn!("Comment {} has no body", id);
                String::new()
            }
        };

        // Nested replies first; the node's own record trails its subtree
        let children = node.find_all(COMMENT_TAG, COMMENT_CLASS, true);
        if !children.is_empty() {
            tracing::debug!("Descending into {} replies under {}", children.len(), id);
            flatten_comments(&children, &id, out);
        }

        out.push(Record::comment(id, parent_id, author, content));
    }
}
