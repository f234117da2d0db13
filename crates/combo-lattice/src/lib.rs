//! Combo Lattice - an accessible, filterable combo box.
//!
//! A combo box is progressively enhanced from a plain select: the select is
//! demoted to a hidden value store, and a text input, a filtered list, a
//! polite live status region and an assistive hint are injected next to it.
//! The selection engine keeps those surfaces consistent under typing,
//! clicking and keyboard navigation.
//!
//! # Example
//!
//! ```
//! use combo_lattice::{ComboBoxBehavior, InputEvent, Key};
//! use combo_lattice_core::Document;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let container = doc.create_element("div");
//! doc.add_class(container, "usa-combo-box").unwrap();
//! doc.append_child(body, container).unwrap();
//! let select = doc.create_element("select");
//! doc.set_attribute(select, "id", "fruit").unwrap();
//! doc.add_class(select, "usa-combo-box__select").unwrap();
//! doc.append_child(container, select).unwrap();
//! doc.add_option(select, Some(""), "Select a fruit").unwrap();
//! doc.add_option(select, Some("ba"), "Banana").unwrap();
//!
//! let mut behavior = ComboBoxBehavior::default();
//! let id = behavior.init(&mut doc, body).unwrap()[0];
//! let input = behavior.combo_box(id).unwrap().handle().input;
//!
//! behavior.dispatch(&mut doc, &mut InputEvent::key_down(input, Key::ArrowDown)).unwrap();
//! behavior.dispatch(&mut doc, &mut InputEvent::key_down(input, Key::Enter)).unwrap();
//!
//! assert_eq!(doc.select_value(select).unwrap(), "ba");
//! assert_eq!(doc.value(input).unwrap(), "Banana");
//! ```
//!
//! # Modules
//!
//! - [`enhance`]: one-time injection of the combo box surfaces
//! - [`renderer`]: the filtered list and status announcements
//! - [`selection`]: highlight movement and committing values
//! - [`dispatch`]: the handler table and event routing
//! - [`registry`]: per-instance handles
//! - [`locator`]: resolving a node to its combo box

pub mod accessibility;
pub mod combo_box;
pub mod config;
pub mod dispatch;
pub mod enhance;
mod error;
pub mod events;
pub mod locator;
pub mod prelude;
pub mod registry;
pub mod renderer;
pub mod selection;
pub mod source;

pub use accessibility::{AriaRole, Politeness};
pub use combo_box::{ComboBox, ListState, RenderedEntry, ValueCommitted};
pub use config::{ClassNames, ComboBoxConfig, DEFAULT_HINT_TEXT};
pub use dispatch::{ComboBoxBehavior, DispatchResult, Handler, HandlerEntry, TargetRole};
pub use enhance::{SurfaceIds, enhance};
pub use error::{ComboBoxError, Result};
pub use events::{EventKind, InputEvent, Key, KeyChord, KeyboardModifiers};
pub use locator::ComboBoxElements;
pub use registry::{ComboBoxHandle, ComboBoxId, ComboBoxRegistry};
pub use renderer::status_message;
pub use selection::{KeyAction, is_printable_key_code, scroll_into_view};
pub use source::{ComboOption, OptionList, OptionSource, SelectSource};

/// Target names for log filtering.
///
/// ```ignore
/// tracing_subscriber::fmt()
///     .with_env_filter("combo_lattice::selection=trace")
///     .init();
/// ```
pub mod targets {
    /// Enhancement of source selects.
    pub const ENHANCE: &str = "combo_lattice::enhance";
    /// List rendering.
    pub const RENDERER: &str = "combo_lattice::renderer";
    /// Highlight movement and commits.
    pub const SELECTION: &str = "combo_lattice::selection";
    /// Event routing and the outside-click sweep.
    pub const DISPATCH: &str = "combo_lattice::dispatch";
    /// Instance registration.
    pub const REGISTRY: &str = "combo_lattice::registry";
}
