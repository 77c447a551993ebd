//! `nodes` crate — the node-type vocabulary shared by the classifier.
//!
//! Holds the closed [`TriggerType`] tag, the extendable [`NodeTypeRegistry`]
//! that maps upstream node-type strings onto it, and the [`DiagnosticSink`]
//! seam the engine reports its decisions through.

pub mod error;
pub mod mock;
pub mod registry;
pub mod traits;
pub mod trigger_type;

pub use error::RegistryError;
pub use registry::NodeTypeRegistry;
pub use traits::{Diagnostic, DiagnosticSink, NullSink, Resolution, TracingSink};
pub use trigger_type::TriggerType;
