//! HTML parsing.
//!
//! This module provides the [`Document`] type, which parses HTML with a
//! lenient, error-recovering parser and exposes it as an owned
//! [`DomTree`](crate::dom_tree::DomTree) for structural matching.
//!
//! # Example
//!
//! ```rust
//! use verkehr_core::parse::Document;
//! use verkehr_core::dom_tree::Matcher;
//!
//! let html = r#"<ul><li class="entry">First</li><li class="entry">Second</li></ul>"#;
//!
//! let doc = Document::parse(html);
//! let tree = doc.tree();
//! let entries = tree.find_all(tree.root().unwrap(), &Matcher::tag_class("li", "entry"));
//! assert_eq!(entries.len(), 2);
//! ```

use scraper::Html;

use crate::dom_tree::{DomTree, build_dom_tree};

/// Represents a parsed HTML document.
///
/// Parsing never fails: malformed markup is repaired the way browsers do it,
/// and an empty string yields an empty `<html><head></head><body></body></html>`.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verkehr_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><h1>Verkehr</h1></body></html>");
    /// assert!(doc.text_content().contains("Verkehr"));
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Number of recoverable parse errors the parser ran into.
    pub fn error_count(&self) -> usize {
        self.html.errors.len()
    }

    /// Builds the owned element tree, rooted at `<html>`.
    pub fn tree(&self) -> DomTree {
        build_dom_tree(self.html.root_element())
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}
