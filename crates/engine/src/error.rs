//! Engine-level error types.
//!
//! Classification and form extraction never fail; these errors only cover
//! getting workflow data and configuration into the engine.

use thiserror::Error;

/// Errors produced while loading inputs for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The workflow document is not valid JSON or matches no known shape.
    #[error("invalid workflow document: {0}")]
    InvalidWorkflow(#[from] serde_json::Error),

    /// An input modality other than `text` or `voice` was requested.
    #[error("unknown input kind '{0}' (expected 'text' or 'voice')")]
    UnknownInputKind(String),

    /// The node-type registry could not be built.
    #[error("registry error: {0}")]
    Registry(#[from] nodes::RegistryError),
}
