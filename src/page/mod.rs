//! Structured view over a raw HTML response body
//!
//! The extraction components never touch `scraper` types directly; this
//! adapter exposes the queries they rely on:
//! - find the first element with a given tag and class
//! - find all elements with a given tag and class, optionally restricted to
//!   direct children
//! - read an element's attribute or its concatenated text

use scraper::{ElementRef, Html, Selector};

/// A parsed page, queryable by tag and class
pub struct PageView {
    document: Html,
}

impl PageView {
    /// Parses a response body into a queryable document
    ///
    /// Parsing is lenient: malformed markup produces a best-effort tree
    /// rather than an error, matching how browsers treat the same input.
    pub fn parse(body: &str) -> Self {
        Self {
            document: Html::parse_document(body),
        }
    }

    /// First element in the document with the given tag and class
    pub fn find_first(&self, tag: &str, class: &str) -> Option<ElementView<'_>> {
        let selector = tag_class_selector(tag, class)?;
        self.document.select(&selector).next().map(ElementView)
    }

    /// All elements in the document with the given tag and class, in
    /// document order
    pub fn find_all(&self, tag: &str, class: &str) -> Vec<ElementView<'_>> {
        match tag_class_selector(tag, class) {
            Some(selector) => self.document.select(&selector).map(ElementView).collect(),
            None => Vec::new(),
        }
    }

    /// First element in the document with the given tag, regardless of class
    pub fn first_by_tag(&self, tag: &str) -> Option<ElementView<'_>> {
        let selector = Selector::parse(tag).ok()?;
        self.document.select(&selector).next().map(ElementView)
    }
}

/// A single element within a parsed page
#[derive(Clone, Copy)]
pub struct ElementView<'a>(ElementRef<'a>);

impl<'a> ElementView<'a> {
    /// Value of an attribute on this element, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Concatenated text of this element's descendants, trimmed
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    /// First descendant with the given tag and class
    pub fn find_first(&self, tag: &str, class: &str) -> Option<ElementView<'a>> {
        let selector = tag_class_selector(tag, class)?;
        self.0.select(&selector).next().map(ElementView)
    }

    /// First descendant with the given tag, regardless of class
    pub fn first_by_tag(&self, tag: &str) -> Option<ElementView<'a>> {
        let selector = Selector::parse(tag).ok()?;
        self.0.select(&selector).next().map(ElementView)
    }

    /// Descendants with the given tag and class, in document order
    ///
    /// With `direct_only` set, the scan covers immediate children only;
    /// deeper matches are left for the caller to reach by recursing. This is
    /// what lets the comment flattener walk one nesting level at a time.
    pub fn find_all(&self, tag: &str, class: &str, direct_only: bool) -> Vec<ElementView<'a>> {
        if direct_only {
            self.0
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == tag && has_class(el, class))
                .map(ElementView)
                .collect()
        } else {
            match tag_class_selector(tag, class) {
                Some(selector) => self.0.select(&selector).map(ElementView).collect(),
                None => Vec::new(),
            }
        }
    }
}

fn tag_class_selector(tag: &str, class: &str) -> Option<Selector> {
    Selector::parse(&format!("{}.{}", tag, class)).ok()
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
