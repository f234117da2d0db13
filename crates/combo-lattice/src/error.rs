//! Error types for combo boxes.

use std::path::PathBuf;

use combo_lattice_core::{DomError, NodeId};

/// Result type alias for combo box operations.
pub type Result<T> = std::result::Result<T, ComboBoxError>;

/// Errors raised by combo box operations.
///
/// The structural variants are integration errors: the markup handed to the
/// widget does not have the expected shape. They are returned to the caller
/// rather than recovered from.
#[derive(Debug, thiserror::Error)]
pub enum ComboBoxError {
    /// The node does not sit inside any combo box container.
    #[error("element is missing outer .{container_class}")]
    MissingContainer {
        /// Class the container was looked up by.
        container_class: String,
    },

    /// The container has no source select.
    #[error(".{container_class} is missing inner .{select_class}")]
    MissingSelect {
        /// Class of the container.
        container_class: String,
        /// Class the select was looked up by.
        select_class: String,
    },

    /// The source select has no usable `id` to derive surface ids from.
    #[error("source select {select:?} has an empty id")]
    MissingSelectId {
        /// The offending select.
        select: NodeId,
    },

    /// The container was never enhanced and lacks the injected surfaces.
    #[error("combo box {container:?} has not been enhanced")]
    NotEnhanced {
        /// The container.
        container: NodeId,
    },

    /// The document rejected an operation (usually a stale node id).
    #[error(transparent)]
    Dom(#[from] DomError),

    /// Configuration TOML could not be parsed.
    #[error("invalid combo box configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ComboBoxError {
    /// Whether this is one of the markup-shape errors.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingContainer { .. }
                | Self::MissingSelect { .. }
                | Self::MissingSelectId { .. }
                | Self::NotEnhanced { .. }
        )
    }
}
