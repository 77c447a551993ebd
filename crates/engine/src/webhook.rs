//! Webhook addressing and payload shape.
//!
//! Pure helpers for whoever performs the actual POST: where a workflow's
//! webhook lives and what body it expects. No network I/O happens here.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{InputKind, Workflow};

pub const WEBHOOK_NODE: &str = "n8n-nodes-base.webhook";
pub const FORM_TRIGGER_NODE: &str = "n8n-nodes-base.formTrigger";

/// Whether any node in the workflow is a form trigger.
pub fn has_form_trigger(workflow: &Workflow) -> bool {
    workflow.nodes.iter().any(|n| n.node_type == FORM_TRIGGER_NODE)
}

/// Production webhook URL: `<base>/webhook/<path>`, where `path` comes from
/// the first webhook or form-trigger node. `None` when there is no such node
/// or it has no path.
pub fn webhook_url(workflow: &Workflow, base_url: &str) -> Option<String> {
    let node = workflow
        .nodes
        .iter()
        .find(|n| n.node_type == WEBHOOK_NODE || n.node_type == FORM_TRIGGER_NODE)?;

    let path = node.parameters.as_ref()?.get("path")?.as_str()?;
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return None;
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    Some(format!("{base}/webhook/{path}"))
}

/// Body POSTed to a workflow webhook.
///
/// `chatInput` duplicates `message` for agent nodes that read that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub chat_input: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Map<String, Value>>,
}

impl WebhookPayload {
    /// Payload stamped with the current time.
    pub fn new(message: impl Into<String>, kind: InputKind) -> Self {
        Self::at(message, kind, Utc::now().timestamp_millis())
    }

    pub fn at(message: impl Into<String>, kind: InputKind, timestamp: i64) -> Self {
        let message = message.into();
        Self {
            chat_input: message.clone(),
            message,
            kind,
            timestamp,
            form_data: None,
        }
    }

    /// Attach submitted form values. Form submissions are always text.
    pub fn with_form_data(mut self, form_data: Map<String, Value>) -> Self {
        self.kind = InputKind::Text;
        self.form_data = Some(form_data);
        self
    }
}
