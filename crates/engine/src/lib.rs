//! `engine` crate — trigger classification and form field extraction.
//!
//! Both operations are pure functions of an in-memory [`Workflow`]: no I/O,
//! no shared mutable state, and no failure path. Anything malformed degrades
//! to the `unknown` trigger or the default message field.

pub mod capability;
pub mod classifier;
pub mod error;
pub mod form;
pub mod models;
pub mod webhook;

pub use capability::{capability_of, BadgeTone, CapabilityProfile, TriggerCapability};
pub use classifier::{ClassifierConfig, TriggerClassifier};
pub use error::EngineError;
pub use form::{default_message_field, initial_form_values, FormFieldExtractor};
pub use models::{FieldType, FormField, InputKind, Node, Workflow, WorkflowDocument};
pub use webhook::{has_form_trigger, webhook_url, WebhookPayload};

/// Classify with the builtin registry and `tracing` diagnostics.
pub fn classify(workflow: &Workflow) -> TriggerCapability {
    TriggerClassifier::default().classify(workflow)
}

/// [`TriggerClassifier::incompatibility_reason`] with the default classifier.
pub fn incompatibility_reason(workflow: &Workflow, kind: InputKind) -> Option<String> {
    TriggerClassifier::default().incompatibility_reason(workflow, kind)
}

/// [`FormFieldExtractor::extract`] with the default classifier.
pub fn extract_form_fields(workflow: &Workflow) -> Option<Vec<FormField>> {
    FormFieldExtractor::default().extract(workflow)
}
