//! Registry-level error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while building a [`crate::NodeTypeRegistry`] from
/// external data.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("cannot read node-type registry '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry document is not a JSON object of string pairs.
    #[error("invalid node-type registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry maps a node type onto a tag outside the trigger vocabulary.
    #[error("node type '{node_type}' maps to unknown trigger type '{tag}'")]
    UnknownTriggerType { node_type: String, tag: String },
}
