//! Document model for combo-lattice.
//!
//! Provides a small, deterministic stand-in for a browser page:
//! - Stable node identifiers via arena-based storage
//! - Element and text nodes in a parent-child tree rooted at `body`
//! - Attributes (including `class`, `id` and `hidden`) with DOM-like helpers
//! - Input values, focus, and box metrics used for scrolling
//!
//! Select-control semantics (options, selectedness, value) live in
//! [`crate::controls`] as a second `impl Document` block.
//!
//! # Key Types
//!
//! - [`Document`] - The node arena and the single source of tree structure
//! - [`NodeId`] - Stable handle for a node; invalid once the node is removed
//! - [`BoxMetrics`] - Offset geometry of a laid-out element
//!
//! # Example
//!
//! ```
//! use combo_lattice_core::Document;
//!
//! let mut doc = Document::new();
//! let div = doc.create_element("div");
//! doc.append_child(doc.body(), div).unwrap();
//! doc.add_class(div, "usa-combo-box").unwrap();
//!
//! let span = doc.create_element("span");
//! doc.append_child(div, span).unwrap();
//!
//! assert_eq!(doc.closest_with_class(span, "usa-combo-box"), Some(div));
//! ```

use slotmap::{SlotMap, new_key_type};

use crate::error::{DomError, DomResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`Document`].
    ///
    /// `NodeId`s are stable handles that remain valid while the node is part
    /// of the arena, whether or not it is attached to the tree. They become
    /// invalid when the node (or one of its ancestors) is removed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Offset geometry of an element relative to its offset parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    /// Distance from the top of the offset parent's content box.
    pub offset_top: f32,
    /// Rendered height.
    pub offset_height: f32,
}

impl BoxMetrics {
    /// Create metrics from a top offset and a height.
    pub const fn new(offset_top: f32, offset_height: f32) -> Self {
        Self {
            offset_top,
            offset_height,
        }
    }

    /// The bottom edge (`offset_top + offset_height`).
    pub fn bottom(&self) -> f32 {
        self.offset_top + self.offset_height
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    /// Attributes in insertion order.
    pub(crate) attributes: Vec<(String, String)>,
    /// Current value of a text control (the property, not the attribute).
    pub(crate) value: String,
    /// Selectedness of an `option`.
    pub(crate) selected: bool,
    /// Set on a `select` once its value has been assigned explicitly.
    pub(crate) selectedness_dirty: bool,
    pub(crate) metrics: BoxMetrics,
    pub(crate) scroll_top: f32,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// The node arena standing in for a page.
///
/// A new document holds a single `body` element. Nodes are created detached
/// and become part of the page once appended under `body`.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only `body`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData {
            kind: NodeKind::Element(ElementData {
                tag: "body".to_owned(),
                ..Default::default()
            }),
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            body,
            focused: None,
        }
    }

    /// The root `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.nodes.insert(NodeData {
            kind: NodeKind::Element(ElementData {
                tag: tag.to_ascii_lowercase(),
                ..Default::default()
            }),
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::DOCUMENT, ?id, tag, "created element");
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Check if a node exists in the arena.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check if a node exists and is attached under `body`.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.nodes.get(node).and_then(|d| d.parent);
        }
        false
    }

    pub(crate) fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        match self.nodes.get(id).map(|d| &d.kind) {
            Some(NodeKind::Element(el)) => Ok(el),
            Some(NodeKind::Text(_)) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::InvalidNode(id)),
        }
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.nodes.get_mut(id).map(|d| &mut d.kind) {
            Some(NodeKind::Element(el)) => Ok(el),
            Some(NodeKind::Text(_)) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::InvalidNode(id)),
        }
    }

    /// Check whether the node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_ok()
    }

    /// Lower-case tag name of an element.
    pub fn tag_name(&self, id: NodeId) -> DomResult<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is detached from its previous parent first. Inserting a node
    /// under itself or one of its own descendants is rejected.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.element(parent)?;
        if !self.nodes.contains_key(child) {
            return Err(DomError::InvalidNode(child));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { child, parent });
        }

        self.detach(child);
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.nodes.get_mut(parent) {
            data.children.push(child);
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let old_parent = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(parent_id) = old_parent {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.retain(|&c| c != id);
            }
        }
        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = None;
        }
    }

    /// Remove a node and its whole subtree from the document.
    ///
    /// Every `NodeId` in the subtree becomes invalid. Focus inside the
    /// removed subtree is dropped.
    #[tracing::instrument(skip(self), target = "combo_lattice_core::document", level = "trace")]
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(DomError::InvalidNode(id));
        }
        self.detach(id);

        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));
        if self.focused.is_some_and(|f| doomed.contains(&f)) {
            self.focused = None;
        }
        tracing::trace!(target: targets::DOCUMENT, ?id, count = doomed.len(), "removing subtree");
        for node in doomed {
            self.nodes.remove(node);
        }
        Ok(())
    }

    /// Remove every child of a node (`innerHTML = ""`).
    pub fn clear_children(&mut self, id: NodeId) -> DomResult<()> {
        let children = self.children(id)?.to_vec();
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|d| d.parent)
    }

    /// Get the children of a node.
    pub fn children(&self, id: NodeId) -> DomResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(DomError::InvalidNode(id))
    }

    /// All descendants of `root` in document (pre-)order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let Some(data) = self.nodes.get(root) else {
            return result;
        };
        let mut stack: Vec<NodeId> = data.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            if let Some(d) = self.nodes.get(id) {
                stack.extend(d.children.iter().rev().copied());
            }
        }
        result
    }

    /// Inclusive containment: `true` if `node` is `ancestor` or lies below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|d| d.parent);
        }
        false
    }

    fn sibling_element(&self, id: NodeId, forward: bool) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent).ok()?;
        let pos = siblings.iter().position(|&c| c == id)?;
        if forward {
            siblings[pos + 1..]
                .iter()
                .copied()
                .find(|&c| self.is_element(c))
        } else {
            siblings[..pos]
                .iter()
                .rev()
                .copied()
                .find(|&c| self.is_element(c))
        }
    }

    /// The next sibling that is an element.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_element(id, true)
    }

    /// The previous sibling that is an element.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_element(id, false)
    }

    // =========================================================================
    // Attributes and classes
    // =========================================================================

    /// Get an attribute value. `None` if absent or if the node is not an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| {
            el.attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Check whether an attribute is present.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let value = value.into();
        let el = self.element_mut(id)?;
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => el.attributes.push((name.to_owned(), value)),
        }
        Ok(())
    }

    /// Remove an attribute. Removing an absent attribute is not an error.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.element_mut(id)?.attributes.retain(|(k, _)| k != name);
        Ok(())
    }

    /// All attributes of an element in insertion order.
    pub fn attributes(&self, id: NodeId) -> DomResult<&[(String, String)]> {
        self.element(id).map(|el| el.attributes.as_slice())
    }

    /// Check whether an element's class list contains `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let list = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attribute(id, "class", list)
    }

    /// Remove every occurrence of a class.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let Some(existing) = self.attribute(id, "class") else {
            self.element(id)?;
            return Ok(());
        };
        let list = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", list)
    }

    /// Whether the element carries the `hidden` attribute.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.has_attribute(id, "hidden")
    }

    /// Toggle the `hidden` attribute.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> DomResult<()> {
        if hidden {
            self.set_attribute(id, "hidden", "")
        } else {
            self.remove_attribute(id, "hidden")
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.has_class(node, class) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// First descendant of `root` (excluding `root`) carrying `class`.
    pub fn first_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    /// All descendants of `root` (excluding `root`) carrying `class`.
    pub fn all_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// First connected element whose `id` attribute equals `element_id`.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(element_id))
    }

    // =========================================================================
    // Text, values, focus
    // =========================================================================

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> DomResult<String> {
        let data = self.nodes.get(id).ok_or(DomError::InvalidNode(id))?;
        if let NodeKind::Text(text) = &data.kind {
            return Ok(text.clone());
        }
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(NodeKind::Text(text)) = self.nodes.get(node).map(|d| &d.kind) {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Replace all children with a single text node (none if `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if let Some(NodeData {
            kind: NodeKind::Text(existing),
            ..
        }) = self.nodes.get_mut(id)
        {
            *existing = text.to_owned();
            return Ok(());
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Current value of a text control.
    pub fn value(&self, id: NodeId) -> DomResult<&str> {
        self.element(id).map(|el| el.value.as_str())
    }

    /// Set the current value of a text control.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        self.element_mut(id)?.value = value.into();
        Ok(())
    }

    /// The focused element, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.nodes.contains_key(id))
    }

    /// Move focus to an element.
    pub fn focus(&mut self, id: NodeId) -> DomResult<()> {
        self.element(id)?;
        tracing::trace!(target: targets::DOCUMENT, ?id, "focus");
        self.focused = Some(id);
        Ok(())
    }

    /// Drop focus from whichever element holds it.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Offset geometry of an element.
    pub fn metrics(&self, id: NodeId) -> DomResult<BoxMetrics> {
        self.element(id).map(|el| el.metrics)
    }

    /// Set the offset geometry of an element.
    pub fn set_metrics(&mut self, id: NodeId, metrics: BoxMetrics) -> DomResult<()> {
        self.element_mut(id)?.metrics = metrics;
        Ok(())
    }

    /// Vertical scroll offset of a scroll container.
    pub fn scroll_top(&self, id: NodeId) -> DomResult<f32> {
        self.element(id).map(|el| el.scroll_top)
    }

    /// Set the vertical scroll offset. Negative offsets clamp to zero.
    pub fn set_scroll_top(&mut self, id: NodeId, scroll_top: f32) -> DomResult<()> {
        self.element_mut(id)?.scroll_top = scroll_top.max(0.0);
        Ok(())
    }
}
