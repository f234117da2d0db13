//! Logging and debugging facilities for combo-lattice.
//!
//! This module provides:
//! - Target names for filtering `tracing` output by subsystem
//! - Debug visualization of document subtrees
//!
//! # Tracing Integration
//!
//! combo-lattice never installs a subscriber. To see logs, install one in the
//! host application or test:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("combo_lattice=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use combo_lattice_core::{Document, logging::DocumentTreeDebug};
//!
//! let mut doc = Document::new();
//! let list = doc.create_element("ul");
//! doc.append_child(doc.body(), list).unwrap();
//! doc.set_attribute(list, "id", "fruit--list").unwrap();
//!
//! let dump = DocumentTreeDebug::new().format_subtree(&doc, doc.body()).unwrap();
//! assert!(dump.contains("<ul id=\"fruit--list\">"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::document::{Document, NodeId};
use crate::error::DomResult;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "combo_lattice_core";
    /// Document mutation target.
    pub const DOCUMENT: &str = "combo_lattice_core::document";
    /// Signal emission target.
    pub const SIGNAL: &str = "combo_lattice_core::signal";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Plain indentation.
    Compact,
}

/// Configuration for document tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to print attributes after the tag name.
    pub show_attributes: bool,
    /// Whether to print text nodes.
    pub show_text: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_attributes: true,
            show_text: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Tags only, no attributes or text.
    pub fn minimal() -> Self {
        Self {
            show_attributes: false,
            show_text: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing a document subtree.
#[derive(Debug, Clone, Default)]
pub struct DocumentTreeDebug {
    options: TreeFormatOptions,
}

impl DocumentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, one node per line.
    pub fn format_subtree(&self, doc: &Document, root: NodeId) -> DomResult<String> {
        let mut output = String::new();
        self.format_into(doc, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_into(
        &self,
        doc: &Document,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> DomResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        if !doc.is_element(id) {
            if self.options.show_text {
                let text = doc.text_content(id)?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    output.push_str(&self.build_prefix(depth, is_last));
                    let _ = writeln!(output, "{trimmed:?}");
                }
            }
            return Ok(());
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push('<');
        output.push_str(doc.tag_name(id)?);
        if self.options.show_attributes {
            for (name, value) in doc.attributes(id)? {
                if value.is_empty() {
                    let _ = write!(output, " {name}");
                } else {
                    let _ = write!(output, " {name}=\"{value}\"");
                }
            }
        }
        output.push_str(">\n");

        let children = doc.children(id)?;
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(doc, child, depth + 1, i + 1 == count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => (" ", "", ""),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        doc.append_child(doc.body(), list).unwrap();
        doc.set_attribute(list, "role", "listbox").unwrap();
        doc.set_hidden(list, true).unwrap();
        let item = doc.create_element("li");
        doc.append_child(list, item).unwrap();
        doc.set_text_content(item, "Apple").unwrap();
        (doc, list)
    }

    #[test]
    fn test_tree_format_attributes_and_text() {
        let (doc, list) = sample();
        let output = DocumentTreeDebug::new().format_subtree(&doc, list).unwrap();
        assert!(output.starts_with("<ul role=\"listbox\" hidden>"));
        assert!(output.contains("\"Apple\""));
    }

    #[test]
    fn test_tree_format_minimal() {
        let (doc, list) = sample();
        let output = DocumentTreeDebug::with_options(TreeFormatOptions::minimal())
            .format_subtree(&doc, list)
            .unwrap();
        assert!(output.contains("<li>"));
        assert!(!output.contains("Apple"));
        assert!(!output.contains("role"));
    }

    #[test]
    fn test_tree_format_max_depth() {
        let (doc, _) = sample();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let output = DocumentTreeDebug::with_options(options)
            .format_subtree(&doc, doc.body())
            .unwrap();
        assert!(output.contains("<ul"));
        assert!(!output.contains("<li"));
    }
}
