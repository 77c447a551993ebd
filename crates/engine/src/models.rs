//! Core domain models for trigger inspection.
//!
//! `Workflow` and `Node` mirror the upstream automation platform's REST
//! representation (camelCase JSON) and are read-only inputs. `FormField` is
//! derived output for a form renderer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EngineError;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single step in the workflow graph.
///
/// `node_type` is free-form and may carry a version suffix (`"...@2"`);
/// `parameters` is an untyped bag whose shape depends on type and version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_version: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
}

impl Node {
    /// Convenience constructor for testing.
    pub fn new(name: impl Into<String>, node_type: impl Into<String>, parameters: Option<Value>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            parameters,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// A workflow definition as listed by the upstream REST API.
///
/// Only `nodes[0]` matters for classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nodes_or_empty")]
    pub nodes: Vec<Node>,
}

impl Workflow {
    /// Convenience constructor for testing.
    pub fn new(id: impl Into<String>, name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            nodes,
            ..Self::default()
        }
    }

    /// The entry node, if there is one.
    pub fn first_node(&self) -> Option<&Node> {
        self.nodes.first()
    }
}

/// `"nodes": null` is treated like an absent list.
fn nodes_or_empty<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Node>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// WorkflowDocument
// ---------------------------------------------------------------------------

/// One page of the upstream `GET /workflows` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowsPage {
    pub data: Vec<Workflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Any of the shapes a workflow file is found in on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowDocument {
    Page(WorkflowsPage),
    List(Vec<Workflow>),
    Single(Workflow),
}

impl WorkflowDocument {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_workflows(self) -> Vec<Workflow> {
        match self {
            WorkflowDocument::Page(page) => page.data,
            WorkflowDocument::List(list) => list,
            WorkflowDocument::Single(workflow) => vec![workflow],
        }
    }
}

/// Keep only active workflows, preserving order.
pub fn filter_active(workflows: Vec<Workflow>) -> Vec<Workflow> {
    workflows.into_iter().filter(|w| w.active).collect()
}

// ---------------------------------------------------------------------------
// InputKind
// ---------------------------------------------------------------------------

/// The modality a user is trying to send to a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Voice,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Voice => "voice",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(InputKind::Text),
            "voice" => Ok(InputKind::Voice),
            _ => Err(EngineError::UnknownInputKind(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// FormField
// ---------------------------------------------------------------------------

/// Input widget kind for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Select,
    Textarea,
    Checkbox,
}

impl FieldType {
    /// Map an upstream field-type string onto the closed vocabulary.
    /// Case-insensitive; anything unrecognised (or absent) is `Text`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return FieldType::Text;
        };
        match raw.to_lowercase().as_str() {
            "text" | "input" => FieldType::Text,
            "number" => FieldType::Number,
            "email" => FieldType::Email,
            "select" | "dropdown" => FieldType::Select,
            "textarea" | "multiline" => FieldType::Textarea,
            "checkbox" | "boolean" => FieldType::Checkbox,
            _ => FieldType::Text,
        }
    }
}

/// One renderable form input.
///
/// `options: None` means no options were configured; `Some(vec![])` means
/// they were configured but empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_workflow_json_deserializes() {
        let wf: Workflow = serde_json::from_value(json!({
            "id": "wf1",
            "name": "Inbox",
            "active": true,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T10:00:00.000Z",
            "tags": [{ "id": "t1", "name": "prod" }],
            "nodes": [{
                "name": "Webhook",
                "type": "n8n-nodes-base.webhook",
                "typeVersion": 2,
                "parameters": { "path": "inbox" },
                "webhookId": "abc"
            }]
        }))
        .expect("valid workflow");

        assert_eq!(wf.first_node().unwrap().node_type, "n8n-nodes-base.webhook");
        assert_eq!(wf.first_node().unwrap().webhook_id.as_deref(), Some("abc"));
        assert_eq!(wf.tags.len(), 1);
        assert!(wf.created_at.is_some());
    }

    #[test]
    fn missing_or_null_nodes_become_empty() {
        let absent: Workflow = serde_json::from_value(json!({ "id": "a", "name": "A" })).unwrap();
        let null: Workflow =
            serde_json::from_value(json!({ "id": "b", "name": "B", "nodes": null })).unwrap();
        assert!(absent.first_node().is_none());
        assert!(null.nodes.is_empty());
    }

    #[test]
    fn document_accepts_page_list_and_single() {
        let page = WorkflowDocument::from_json_str(
            r#"{"data": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}], "nextCursor": "x"}"#,
        )
        .unwrap();
        assert_eq!(page.into_workflows().len(), 2);

        let list = WorkflowDocument::from_json_str(r#"[{"id": "1", "name": "a"}]"#).unwrap();
        assert_eq!(list.into_workflows().len(), 1);

        let single = WorkflowDocument::from_json_str(r#"{"id": "1", "name": "a"}"#).unwrap();
        assert_eq!(single.into_workflows()[0].name, "a");
    }

    #[test]
    fn filter_active_drops_inactive() {
        let mut off = Workflow::new("2", "off", vec![]);
        off.active = false;
        let kept = filter_active(vec![Workflow::new("1", "on", vec![]), off]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "on");
    }

    #[test]
    fn field_type_normalizer_is_case_insensitive_and_total() {
        assert_eq!(FieldType::normalize(Some("Dropdown")), FieldType::Select);
        assert_eq!(FieldType::normalize(Some("MULTILINE")), FieldType::Textarea);
        assert_eq!(FieldType::normalize(Some("boolean")), FieldType::Checkbox);
        assert_eq!(FieldType::normalize(Some("input")), FieldType::Text);
        assert_eq!(FieldType::normalize(Some("password")), FieldType::Text);
        assert_eq!(FieldType::normalize(None), FieldType::Text);
    }

    #[test]
    fn input_kind_parses_case_insensitively() {
        assert_eq!("Voice".parse::<InputKind>().unwrap(), InputKind::Voice);
        assert!(matches!(
            "smoke".parse::<InputKind>(),
            Err(EngineError::UnknownInputKind(_))
        ));
    }
}
