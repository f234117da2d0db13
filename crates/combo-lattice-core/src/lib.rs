//! Core systems for combo-lattice.
//!
//! This crate provides the foundation the combo box widget is written against:
//!
//! - **Document Model**: an arena of element and text nodes standing in for a
//!   page, with attributes, classes, focus and box metrics
//! - **Form Controls**: select/option semantics (ordered options, selectedness,
//!   value assignment)
//! - **Signals**: direct-invocation notifications for committed state changes
//! - **Logging**: tracing targets and document tree visualization
//!
//! # Example
//!
//! ```
//! use combo_lattice_core::Document;
//!
//! let mut doc = Document::new();
//! let select = doc.create_element("select");
//! doc.append_child(doc.body(), select).unwrap();
//! doc.add_option(select, Some("ap"), "Apple").unwrap();
//! doc.add_option(select, Some("ba"), "Banana").unwrap();
//!
//! doc.set_select_value(select, "ba").unwrap();
//! assert_eq!(doc.select_value(select).unwrap(), "ba");
//! ```

mod controls;
pub mod document;
mod error;
pub mod logging;
pub mod signal;

pub use document::{BoxMetrics, Document, NodeId};
pub use error::{DomError, DomResult};
pub use logging::{DocumentTreeDebug, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal};
