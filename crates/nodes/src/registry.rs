//! `NodeTypeRegistry` — the exact-match table from upstream node-type
//! strings to [`TriggerType`].
//!
//! Node types are an open, versioned vocabulary, so the table is data: the
//! builtin entries can be extended in code or merged from a JSON file of the
//! form `{ "vendor.someTrigger": "webhook", ... }`.

use std::collections::HashMap;
use std::path::Path;

use crate::{RegistryError, TriggerType};

/// Node types the upstream automation platform ships with.
const BUILTIN_NODE_TYPES: &[(&str, TriggerType)] = &[
    ("n8n-nodes-base.webhook", TriggerType::Webhook),
    ("@n8n/n8n-nodes-langchain.chatTrigger", TriggerType::Chat),
    ("n8n-nodes-base.formTrigger", TriggerType::Form),
    ("n8n-nodes-base.scheduleTrigger", TriggerType::Schedule),
    ("n8n-nodes-base.cron", TriggerType::Schedule),
    ("n8n-nodes-base.interval", TriggerType::Schedule),
    ("n8n-nodes-base.manualTrigger", TriggerType::Manual),
    ("n8n-nodes-base.start", TriggerType::Manual),
    ("n8n-nodes-base.executeWorkflowTrigger", TriggerType::Manual),
    ("n8n-nodes-base.emailReadImap", TriggerType::Email),
    ("n8n-nodes-base.mqttTrigger", TriggerType::Mqtt),
    ("n8n-nodes-base.awsSqsTrigger", TriggerType::Sqs),
    ("n8n-nodes-base.rabbitmqTrigger", TriggerType::Rabbitmq),
    ("n8n-nodes-base.redisTrigger", TriggerType::Redis),
    ("n8n-nodes-base.kafkaTrigger", TriggerType::Kafka),
    ("n8n-nodes-base.rssFeedReadTrigger", TriggerType::Rss),
    ("n8n-nodes-base.localFileTrigger", TriggerType::File),
    ("n8n-nodes-base.errorTrigger", TriggerType::Error),
    // Would otherwise hit the "form" exclusion and substring rules.
    ("n8n-nodes-base.typeformTrigger", TriggerType::AppSpecific),
    ("n8n-nodes-base.formstackTrigger", TriggerType::AppSpecific),
];

/// Exact and case-insensitive lookup over known node types.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    exact: HashMap<String, TriggerType>,
    /// Lowercased key → original key, for the case-insensitive pass.
    folded: HashMap<String, String>,
}

impl NodeTypeRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry pre-populated with the platform's own node types.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.extend(
            BUILTIN_NODE_TYPES
                .iter()
                .map(|(node_type, trigger)| (node_type.to_string(), *trigger)),
        );
        registry
    }

    /// Add or replace a single mapping.
    pub fn insert(&mut self, node_type: impl Into<String>, trigger: TriggerType) {
        let node_type = node_type.into();
        self.folded
            .insert(node_type.to_lowercase(), node_type.clone());
        self.exact.insert(node_type, trigger);
    }

    /// Add or replace many mappings.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, TriggerType)>,
    {
        for (node_type, trigger) in entries {
            self.insert(node_type, trigger);
        }
    }

    /// Case-sensitive lookup.
    pub fn lookup_exact(&self, node_type: &str) -> Option<TriggerType> {
        self.exact.get(node_type).copied()
    }

    /// Lookup ignoring ASCII/Unicode case. Returns the registered key that
    /// matched, so callers can derive anything else from it exactly as they
    /// would after [`Self::lookup_exact`] on that key.
    pub fn lookup_case_insensitive(&self, node_type: &str) -> Option<(&str, TriggerType)> {
        let original = self.folded.get(&node_type.to_lowercase())?;
        self.lookup_exact(original)
            .map(|trigger| (original.as_str(), trigger))
    }

    /// Every registered mapping, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, TriggerType)> + '_ {
        self.exact
            .iter()
            .map(|(node_type, trigger)| (node_type.as_str(), *trigger))
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Parse a JSON object of `node type → trigger tag` pairs.
    ///
    /// # Errors
    /// - [`RegistryError::Parse`] if the document is not a string-to-string object.
    /// - [`RegistryError::UnknownTriggerType`] if a tag is outside the vocabulary.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let mut registry = Self::empty();
        for (node_type, tag) in raw {
            let trigger = tag
                .parse::<TriggerType>()
                .map_err(|_| RegistryError::UnknownTriggerType {
                    node_type: node_type.clone(),
                    tag: tag.clone(),
                })?;
            registry.insert(node_type, trigger);
        }
        Ok(registry)
    }

    /// Read a registry document from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Merge the entries of a registry file on top of this one. File entries
    /// win on conflict.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), RegistryError> {
        let extra = Self::load(path)?;
        tracing::debug!(
            path = %path.display(),
            entries = extra.len(),
            "merging node-type registry"
        );
        self.extend(extra.exact);
        Ok(())
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_resolves_core_trigger_nodes() {
        let registry = NodeTypeRegistry::builtin();
        assert_eq!(
            registry.lookup_exact("n8n-nodes-base.webhook"),
            Some(TriggerType::Webhook)
        );
        assert_eq!(
            registry.lookup_exact("@n8n/n8n-nodes-langchain.chatTrigger"),
            Some(TriggerType::Chat)
        );
        assert_eq!(
            registry.lookup_exact("n8n-nodes-base.formTrigger"),
            Some(TriggerType::Form)
        );
        assert_eq!(registry.len(), BUILTIN_NODE_TYPES.len());
    }

    #[test]
    fn exact_lookup_is_case_sensitive() {
        let registry = NodeTypeRegistry::builtin();
        assert_eq!(registry.lookup_exact("N8N-NODES-BASE.WEBHOOK"), None);
        assert_eq!(
            registry.lookup_case_insensitive("N8N-NODES-BASE.WEBHOOK"),
            Some(("n8n-nodes-base.webhook", TriggerType::Webhook))
        );
    }

    #[test]
    fn insert_replaces_existing_mapping() {
        let mut registry = NodeTypeRegistry::empty();
        registry.insert("acme.hook", TriggerType::Webhook);
        registry.insert("acme.hook", TriggerType::Chat);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup_case_insensitive("ACME.HOOK"),
            Some(("acme.hook", TriggerType::Chat))
        );
    }

    #[test]
    fn case_insensitive_lookup_reports_the_registered_key() {
        let registry = NodeTypeRegistry::builtin();
        assert_eq!(
            registry.lookup_case_insensitive("N8N-NODES-BASE.TYPEFORMTRIGGER"),
            Some(("n8n-nodes-base.typeformTrigger", TriggerType::AppSpecific))
        );
        assert_eq!(registry.entries().count(), BUILTIN_NODE_TYPES.len());
    }

    #[test]
    fn json_document_is_parsed() {
        let registry =
            NodeTypeRegistry::from_json_str(r#"{"acme.inbound": "webhook", "acme.Ticker": "schedule"}"#)
                .expect("valid registry");
        assert_eq!(registry.lookup_exact("acme.inbound"), Some(TriggerType::Webhook));
        assert_eq!(registry.lookup_exact("acme.Ticker"), Some(TriggerType::Schedule));
    }

    #[test]
    fn unknown_tag_in_json_is_rejected() {
        let err = NodeTypeRegistry::from_json_str(r#"{"acme.inbound": "telepathy"}"#).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownTriggerType { ref tag, .. } if tag == "telepathy"
        ));
    }

    #[test]
    fn non_object_json_is_a_parse_error() {
        assert!(matches!(
            NodeTypeRegistry::from_json_str("[1, 2, 3]"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NodeTypeRegistry::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
