//! A single enhanced combo box instance.
//!
//! A [`ComboBox`] owns the handle to its surfaces and the list state: closed,
//! or open with an optional highlight. The highlight is an index into the
//! entries produced by the last render and is dropped whenever the list is
//! re-rendered or hidden, so it can never point at an entry that no longer
//! exists.
//!
//! Rendering lives in [`renderer`](crate::renderer) and the keyboard and
//! pointer state machine in [`selection`](crate::selection); both extend this
//! type.

use std::sync::Arc;

use combo_lattice_core::{Document, NodeId};

use crate::config::{ClassNames, ComboBoxConfig};
use crate::error::Result;
use crate::registry::{ComboBoxHandle, ComboBoxId};
use crate::source::{ComboOption, OptionSource, SelectSource};

/// Whether the list is shown, and what is highlighted in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    /// The list is hidden.
    #[default]
    Closed,
    /// The list is shown.
    Open {
        /// Index of the highlighted entry.
        highlight: Option<usize>,
    },
}

impl ListState {
    /// Whether the list is shown.
    pub fn is_open(self) -> bool {
        matches!(self, ListState::Open { .. })
    }

    /// Index of the highlighted entry.
    pub fn highlight(self) -> Option<usize> {
        match self {
            ListState::Open { highlight } => highlight,
            ListState::Closed => None,
        }
    }
}

/// A selectable entry of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    /// The `li` node.
    pub node: NodeId,
    /// Option value carried by the entry.
    pub value: String,
    /// Display text.
    pub text: String,
}

/// Payload of [`ComboBoxBehavior::value_committed`](crate::ComboBoxBehavior::value_committed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCommitted {
    /// The instance whose value changed.
    pub combo_box: ComboBoxId,
    /// The source select's value before the commit.
    pub previous: String,
    /// The source select's value after the commit. Empty when cleared.
    pub value: String,
}

/// An enhanced combo box.
#[derive(Debug)]
pub struct ComboBox {
    id: ComboBoxId,
    handle: ComboBoxHandle,
    list_id: String,
    pub(crate) state: ListState,
    pub(crate) entries: Vec<RenderedEntry>,
    pub(crate) config: Arc<ComboBoxConfig>,
    pub(crate) classes: Arc<ClassNames>,
}

impl ComboBox {
    pub(crate) fn new(
        id: ComboBoxId,
        handle: ComboBoxHandle,
        list_id: String,
        config: Arc<ComboBoxConfig>,
        classes: Arc<ClassNames>,
    ) -> Self {
        Self {
            id,
            handle,
            list_id,
            state: ListState::Closed,
            entries: Vec::new(),
            config,
            classes,
        }
    }

    /// Registry id of this instance.
    pub fn id(&self) -> ComboBoxId {
        self.id
    }

    /// The surfaces of this instance.
    pub fn handle(&self) -> &ComboBoxHandle {
        &self.handle
    }

    /// Id of the list surface, the prefix of every entry id.
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// Current list state.
    pub fn state(&self) -> ListState {
        self.state
    }

    /// Whether the list is shown.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Index of the highlighted entry.
    pub fn highlighted(&self) -> Option<usize> {
        self.state.highlight()
    }

    /// The highlighted entry.
    pub fn highlighted_entry(&self) -> Option<&RenderedEntry> {
        self.highlighted().and_then(|i| self.entries.get(i))
    }

    /// Entries of the current render. Empty while closed or when nothing
    /// matched.
    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    /// Index of the rendered entry backed by `node`.
    pub fn entry_index(&self, node: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| e.node == node)
    }

    /// The source select's value.
    pub fn committed_value(&self, doc: &Document) -> Result<String> {
        SelectSource::new(doc, self.handle.select)?.value()
    }

    /// The option matching the source select's value, if it is non-empty.
    pub fn committed_option(&self, doc: &Document) -> Result<Option<ComboOption>> {
        let source = SelectSource::new(doc, self.handle.select)?;
        let value = source.value()?;
        if value.is_empty() {
            return Ok(None);
        }
        Ok(source.options().into_iter().find(|o| o.value == value))
    }

    /// The input's current text.
    pub fn input_text<'d>(&self, doc: &'d Document) -> Result<&'d str> {
        Ok(doc.value(self.handle.input)?)
    }
}
