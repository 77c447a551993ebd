//! The `DiagnosticSink` trait — where the classifier reports what it decided.
//!
//! Diagnostics are for operators troubleshooting a workflow, never for
//! program logic. The engine holds the sink as a trait object so callers can
//! route events to `tracing`, drop them, or record them in tests.

use serde_json::Value;
use tracing::{debug, warn};

use crate::TriggerType;

/// Which rule produced a [`TriggerType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Case-sensitive hit in the registry.
    Exact,
    /// Registry hit after case folding.
    CaseInsensitive,
    /// Ends in "trigger" and names no built-in trigger kind.
    AppSpecific,
    /// Keyword found in the lowercased, unversioned node type.
    Substring,
    /// Nothing matched.
    Default,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Exact => "exact",
            Resolution::CaseInsensitive => "case-insensitive",
            Resolution::AppSpecific => "app-specific",
            Resolution::Substring => "substring",
            Resolution::Default => "default",
        }
    }
}

/// A single event emitted during classification or form extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The workflow has no nodes at all.
    FirstNodeMissing { workflow: String },
    /// The entry node's type was resolved.
    TriggerResolved {
        workflow: String,
        node_type: String,
        trigger: TriggerType,
        resolution: Resolution,
    },
    /// Form extraction was asked for a workflow that is not a form trigger.
    NotAFormTrigger {
        workflow: String,
        trigger: TriggerType,
    },
    /// A parameter layout produced a non-empty field list.
    FormLayoutMatched {
        workflow: String,
        layout: &'static str,
        fields: usize,
    },
    /// No layout matched; the default message field is used instead.
    FormLayoutFallback {
        workflow: String,
        reason: &'static str,
        parameters: Option<Value>,
    },
}

/// Receives diagnostics from the engine.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Routes diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::FirstNodeMissing { workflow } => {
                warn!(%workflow, "workflow has no nodes; trigger type unknown");
            }
            Diagnostic::TriggerResolved { workflow, node_type, trigger, resolution } => {
                if *resolution == Resolution::Default {
                    warn!(%workflow, %node_type, "unrecognised trigger node type");
                } else {
                    debug!(
                        %workflow,
                        %node_type,
                        trigger = trigger.as_str(),
                        resolution = resolution.as_str(),
                        "trigger resolved"
                    );
                }
            }
            Diagnostic::NotAFormTrigger { workflow, trigger } => {
                debug!(%workflow, trigger = trigger.as_str(), "not a form trigger; no fields");
            }
            Diagnostic::FormLayoutMatched { workflow, layout, fields } => {
                debug!(%workflow, layout, fields, "form fields extracted");
            }
            Diagnostic::FormLayoutFallback { workflow, reason, parameters } => {
                let parameters = parameters
                    .as_ref()
                    .map(Value::to_string)
                    .unwrap_or_else(|| "<absent>".to_owned());
                warn!(%workflow, reason, %parameters, "using default message field");
            }
        }
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock::RecordingSink;

    fn resolved(resolution: Resolution) -> Diagnostic {
        Diagnostic::TriggerResolved {
            workflow: "wf".into(),
            node_type: "acme.thing".into(),
            trigger: TriggerType::Unknown,
            resolution,
        }
    }

    #[test]
    fn sinks_are_usable_as_trait_objects() {
        let recorder = RecordingSink::new();
        let sinks: [Arc<dyn DiagnosticSink>; 3] = [
            Arc::new(TracingSink) as Arc<dyn DiagnosticSink>,
            Arc::new(NullSink),
            Arc::new(recorder.clone()),
        ];

        for sink in &sinks {
            sink.record(&resolved(Resolution::Default));
            sink.record(&Diagnostic::FormLayoutFallback {
                workflow: "wf".into(),
                reason: "no field layout matched",
                parameters: Some(serde_json::json!({ "path": "x" })),
            });
        }

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.last_resolution(), Some(Resolution::Default));
    }

    #[test]
    fn last_resolution_skips_other_events() {
        let recorder = RecordingSink::new();
        recorder.record(&resolved(Resolution::Exact));
        recorder.record(&Diagnostic::FirstNodeMissing { workflow: "wf".into() });
        assert_eq!(recorder.last_resolution(), Some(Resolution::Exact));
        assert!(!recorder.is_empty());
    }
}
