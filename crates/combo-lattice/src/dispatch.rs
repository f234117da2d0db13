//! Routing input events to combo boxes.
//!
//! The widget does not subscribe to input itself. It exposes a static table
//! of `(event kind, target role, handler)` rows; an adapter owns the real
//! event source and calls [`ComboBoxBehavior::dispatch`] for each event.
//!
//! # Event Flow
//!
//! For each row whose kind matches the event, the row's target role is
//! resolved against the event target:
//!
//! - [`TargetRole::Input`] and [`TargetRole::ListOption`] match when the
//!   target, or one of its ancestors, carries the input or list option class.
//!   The handler receives that element.
//! - [`TargetRole::Body`] always matches and receives the document body.
//!
//! Every matching row runs, in table order. For a click the order is input,
//! list option, body, so the outside-click sweep sees the state the earlier
//! rows left behind.
//!
//! ```
//! use combo_lattice::{ComboBoxBehavior, InputEvent};
//! use combo_lattice_core::Document;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let mut behavior = ComboBoxBehavior::default();
//! behavior.init(&mut doc, body).unwrap();
//!
//! let mut event = InputEvent::click(body);
//! let result = behavior.dispatch(&mut doc, &mut event).unwrap();
//! assert!(!result.was_handled());
//! ```

use std::sync::Arc;

use combo_lattice_core::{Document, NodeId, Signal};

use crate::accessibility::aria;
use crate::combo_box::{ComboBox, ValueCommitted};
use crate::config::{ClassNames, ComboBoxConfig};
use crate::enhance::enhance;
use crate::error::{ComboBoxError, Result};
use crate::events::{EventKind, InputEvent};
use crate::locator::ComboBoxElements;
use crate::registry::{ComboBoxHandle, ComboBoxId, ComboBoxRegistry};
use crate::selection::{KeyAction, is_printable_key_code, key_action};
use crate::targets;

/// The element role a handler row is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRole {
    /// The combo box text input.
    Input,
    /// A rendered list entry.
    ListOption,
    /// The document body. Matches every target.
    Body,
}

/// A handler invoked with the element its row's role resolved to.
///
/// Returns whether the handler acted on the event.
pub type Handler =
    fn(&mut ComboBoxBehavior, &mut Document, NodeId, &mut InputEvent) -> Result<bool>;

/// A row of the handler table.
#[derive(Clone, Copy)]
pub struct HandlerEntry {
    /// Event kind the row reacts to.
    pub kind: EventKind,
    /// Role the event target must resolve to.
    pub role: TargetRole,
    /// The handler.
    pub handler: Handler,
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("kind", &self.kind)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

static HANDLERS: [HandlerEntry; 5] = [
    HandlerEntry {
        kind: EventKind::Click,
        role: TargetRole::Input,
        handler: on_input_click,
    },
    HandlerEntry {
        kind: EventKind::Click,
        role: TargetRole::ListOption,
        handler: on_list_option_click,
    },
    HandlerEntry {
        kind: EventKind::Click,
        role: TargetRole::Body,
        handler: on_body_click,
    },
    HandlerEntry {
        kind: EventKind::KeyDown,
        role: TargetRole::Input,
        handler: on_input_key_down,
    },
    HandlerEntry {
        kind: EventKind::KeyUp,
        role: TargetRole::Input,
        handler: on_input_key_up,
    },
];

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// This many handlers acted on the event.
    Handled(usize),
    /// No handler acted on the event.
    Ignored,
}

impl DispatchResult {
    /// Returns true if any handler acted on the event.
    pub fn was_handled(&self) -> bool {
        matches!(self, DispatchResult::Handled(_))
    }
}

/// The combo box behavior for a document: configuration, the registry of
/// enhanced instances and the commit signal.
pub struct ComboBoxBehavior {
    config: Arc<ComboBoxConfig>,
    classes: Arc<ClassNames>,
    registry: ComboBoxRegistry,
    /// Emitted whenever a commit changes a source select's value.
    pub value_committed: Signal<ValueCommitted>,
}

impl Default for ComboBoxBehavior {
    fn default() -> Self {
        Self::new(ComboBoxConfig::default())
    }
}

impl std::fmt::Debug for ComboBoxBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboBoxBehavior")
            .field("prefix", &self.config.prefix)
            .field("instances", &self.registry.len())
            .field("value_committed", &self.value_committed)
            .finish()
    }
}

impl ComboBoxBehavior {
    /// Create a behavior with the given configuration.
    pub fn new(config: ComboBoxConfig) -> Self {
        let classes = Arc::new(config.classes());
        Self {
            config: Arc::new(config),
            classes,
            registry: ComboBoxRegistry::new(),
            value_committed: Signal::new(),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &ComboBoxConfig {
        &self.config
    }

    /// The class names derived from the configuration prefix.
    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    /// The registry of enhanced instances.
    pub fn registry(&self) -> &ComboBoxRegistry {
        &self.registry
    }

    /// Look up an instance.
    pub fn combo_box(&self, id: ComboBoxId) -> Option<&ComboBox> {
        self.registry.get(id)
    }

    /// Look up an instance mutably.
    pub fn combo_box_mut(&mut self, id: ComboBoxId) -> Option<&mut ComboBox> {
        self.registry.get_mut(id)
    }

    /// The handler table.
    pub fn handler_table() -> &'static [HandlerEntry] {
        &HANDLERS
    }

    /// Enhance every source select under `root` (inclusive) that is not
    /// enhanced yet, returning the new instances in document order.
    #[tracing::instrument(target = "combo_lattice::dispatch", skip_all, fields(root = ?root))]
    pub fn init(&mut self, doc: &mut Document, root: NodeId) -> Result<Vec<ComboBoxId>> {
        let mut selects = Vec::new();
        if doc.has_class(root, &self.classes.select) {
            selects.push(root);
        }
        selects.extend(doc.all_with_class(root, &self.classes.select));

        let mut created = Vec::new();
        for select in selects {
            let elements = ComboBoxElements::locate(doc, select, &self.classes)?;
            if elements.input.is_some()
                || self.registry.id_for_container(elements.container).is_some()
            {
                tracing::debug!(
                    target: targets::DISPATCH,
                    container = ?elements.container,
                    "skipping already enhanced combo box"
                );
                continue;
            }
            let handle = enhance(doc, select, &self.config, &self.classes)?;
            created.push(self.register(doc, handle));
        }
        tracing::debug!(target: targets::DISPATCH, count = created.len(), "initialized combo boxes");
        Ok(created)
    }

    fn register(&mut self, doc: &Document, handle: ComboBoxHandle) -> ComboBoxId {
        let list_id = doc.attribute(handle.list, "id").unwrap_or_default().to_owned();
        let config = self.config.clone();
        let classes = self.classes.clone();
        self.registry
            .insert_with_key(|id| ComboBox::new(id, handle, list_id, config, classes))
    }

    /// The instance owning `node`.
    ///
    /// A container that was enhanced outside this behavior (its surfaces are
    /// present but it is not registered) is adopted. A container without
    /// surfaces yields [`ComboBoxError::NotEnhanced`].
    pub fn instance_for(&mut self, doc: &Document, node: NodeId) -> Result<ComboBoxId> {
        let elements = ComboBoxElements::locate(doc, node, &self.classes)?;
        if let Some(id) = self.registry.id_for_container(elements.container) {
            return Ok(id);
        }

        let not_enhanced = ComboBoxError::NotEnhanced {
            container: elements.container,
        };
        let (Some(input), Some(list), Some(status)) =
            (elements.input, elements.list, elements.status)
        else {
            return Err(not_enhanced);
        };
        let hint = doc
            .attribute(input, aria::DESCRIBED_BY)
            .and_then(|id| doc.element_by_id(id))
            .ok_or(not_enhanced)?;

        tracing::debug!(target: targets::DISPATCH, container = ?elements.container, "adopting combo box");
        Ok(self.register(
            doc,
            ComboBoxHandle {
                container: elements.container,
                select: elements.select,
                input,
                list,
                status,
                hint,
            },
        ))
    }

    fn instance_mut(&mut self, doc: &Document, node: NodeId) -> Result<&mut ComboBox> {
        let id = self.instance_for(doc, node)?;
        self.registry
            .get_mut(id)
            .ok_or(ComboBoxError::NotEnhanced { container: node })
    }

    /// Drop instances whose surfaces were removed from `doc`.
    pub fn prune(&mut self, doc: &Document) -> usize {
        self.registry.prune(doc)
    }

    /// Resolve `role` against an event target.
    pub fn resolve_target(&self, doc: &Document, role: TargetRole, target: NodeId) -> Option<NodeId> {
        match role {
            TargetRole::Input => doc.closest_with_class(target, &self.classes.input),
            TargetRole::ListOption => doc.closest_with_class(target, &self.classes.list_option),
            TargetRole::Body => Some(doc.body()),
        }
    }

    /// Deliver an event to every matching handler row.
    pub fn dispatch(&mut self, doc: &mut Document, event: &mut InputEvent) -> Result<DispatchResult> {
        let mut handled = 0;
        for entry in Self::handler_table() {
            if entry.kind != event.kind() {
                continue;
            }
            let Some(node) = self.resolve_target(doc, entry.role, event.target()) else {
                continue;
            };
            if (entry.handler)(self, doc, node, event)? {
                handled += 1;
            }
        }
        tracing::trace!(
            target: targets::DISPATCH,
            kind = ?event.kind(),
            target_node = ?event.target(),
            handled,
            "dispatched event"
        );
        Ok(if handled > 0 {
            DispatchResult::Handled(handled)
        } else {
            DispatchResult::Ignored
        })
    }

    fn emit(&self, committed: Option<ValueCommitted>) {
        if let Some(committed) = committed {
            self.value_committed.emit(committed);
        }
    }
}

fn on_input_click(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    input: NodeId,
    _event: &mut InputEvent,
) -> Result<bool> {
    if doc.has_attribute(input, "disabled") {
        return Ok(false);
    }
    behavior.instance_mut(doc, input)?.render_filtered(doc)?;
    Ok(true)
}

fn on_list_option_click(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    option: NodeId,
    _event: &mut InputEvent,
) -> Result<bool> {
    if doc.has_attribute(option, "disabled") {
        return Ok(false);
    }
    let combo = behavior.instance_mut(doc, option)?;
    if combo.entry_index(option).is_none() && !doc.has_attribute(option, "data-option-value") {
        return Ok(false);
    }
    let committed = combo.select_entry(doc, option)?;
    behavior.emit(committed);
    Ok(true)
}

/// Settle and close every instance the click landed outside of.
///
/// Closed instances are swept too: a list closed by moving up past the first
/// entry, or input edited by a non-printable key, can leave text that does
/// not name the committed option.
fn on_body_click(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    _body: NodeId,
    event: &mut InputEvent,
) -> Result<bool> {
    let target = event.target();
    let mut settled = 0;
    for id in behavior.registry.ids() {
        let Some(combo) = behavior.registry.get_mut(id) else {
            continue;
        };
        let handle = *combo.handle();
        if !handle.is_live(doc) {
            tracing::warn!(target: targets::DISPATCH, combo_box = ?id, "skipping stale combo box");
            continue;
        }
        if doc.contains(handle.container, target) {
            continue;
        }
        let result = match combo.complete_selection(doc) {
            Ok(committed) => combo.hide(doc).map(|()| committed),
            Err(err) => Err(err),
        };
        match result {
            Ok(committed) => {
                settled += 1;
                behavior.emit(committed);
            }
            Err(err) => {
                tracing::warn!(target: targets::DISPATCH, combo_box = ?id, %err, "skipping combo box");
            }
        }
    }
    Ok(settled > 0)
}

fn on_input_key_down(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    input: NodeId,
    event: &mut InputEvent,
) -> Result<bool> {
    let Some(action) = event.chord().and_then(key_action) else {
        return Ok(false);
    };
    let combo = behavior.instance_mut(doc, input)?;
    let committed = match action {
        KeyAction::Up => {
            combo.handle_up(doc, event)?;
            None
        }
        KeyAction::Down => {
            combo.handle_down(doc, event)?;
            None
        }
        KeyAction::Escape => {
            combo.handle_escape(doc)?;
            None
        }
        KeyAction::Enter => combo.handle_enter(doc, event)?,
        KeyAction::Tab => combo.handle_tab(doc)?,
    };
    behavior.emit(committed);
    Ok(true)
}

fn on_input_key_up(
    behavior: &mut ComboBoxBehavior,
    doc: &mut Document,
    input: NodeId,
    event: &mut InputEvent,
) -> Result<bool> {
    if !event.key_code().is_some_and(is_printable_key_code) {
        return Ok(false);
    }
    behavior.instance_mut(doc, input)?.render_filtered(doc)?;
    Ok(true)
}
