//! Prelude module for Combo Lattice.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use combo_lattice::prelude::*;
//! ```
//!
//! This provides access to:
//! - The document model (`Document`, `NodeId`)
//! - Behavior and dispatch (`ComboBoxBehavior`, `InputEvent`, `Key`)
//! - Instances and their state (`ComboBox`, `ListState`)
//! - Configuration and errors

// ============================================================================
// Document Model
// ============================================================================

pub use combo_lattice_core::{BoxMetrics, Document, NodeId, Signal};

// ============================================================================
// Behavior and Dispatch
// ============================================================================

pub use crate::dispatch::{ComboBoxBehavior, DispatchResult, TargetRole};
pub use crate::events::{EventKind, InputEvent, Key, KeyboardModifiers};

// ============================================================================
// Instances
// ============================================================================

pub use crate::combo_box::{ComboBox, ListState, ValueCommitted};
pub use crate::registry::{ComboBoxHandle, ComboBoxId};
pub use crate::source::{ComboOption, OptionSource};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::{ClassNames, ComboBoxConfig};
pub use crate::error::ComboBoxError;
