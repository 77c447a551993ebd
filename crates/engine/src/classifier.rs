//! Trigger classification.
//!
//! `TriggerClassifier` looks at a workflow's entry node and decides which
//! [`TriggerType`] it is, then attaches the capability row for that type.
//! Rules, first match wins:
//! 1. No first node → `unknown`.
//! 2. Exact (case-sensitive) registry hit.
//! 3. Case-insensitive registry hit.
//!    Steps 2-3 are retried without a trailing `@<digits>` version.
//! 4. App trigger: the local node name ends in "trigger" and mentions none
//!    of the built-in trigger kinds.
//! 5. Keyword in the lowercased, unversioned node type.
//! 6. `unknown`.
//!
//! Never fails: malformed input degrades to `unknown`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use nodes::{Diagnostic, DiagnosticSink, NodeTypeRegistry, Resolution, TracingSink, TriggerType};

use crate::capability::TriggerCapability;
use crate::models::{InputKind, Workflow};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Retry the registry ignoring case after an exact miss.
    pub case_insensitive_match: bool,
    /// Classify unlisted `*Trigger` nodes as app-specific.
    pub detect_app_triggers: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            case_insensitive_match: true,
            detect_app_triggers: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Matching vocabulary
// ---------------------------------------------------------------------------

/// Local names containing any of these are never app triggers.
const APP_TRIGGER_EXCLUSIONS: &[&str] = &[
    "webhook", "chat", "form", "schedule", "manual", "email", "mqtt", "sqs", "rabbitmq", "redis",
    "kafka", "rss", "cron", "interval", "imap", "sse", "error", "activation", "local", "n8n",
    "workflow",
];

/// Substring fallback, checked in order.
const SUBSTRING_RULES: &[(&[&str], TriggerType)] = &[
    (&["webhook"], TriggerType::Webhook),
    (&["chat"], TriggerType::Chat),
    (&["form"], TriggerType::Form),
    (&["schedule", "cron", "interval"], TriggerType::Schedule),
    (&["manual", "start"], TriggerType::Manual),
    (&["email", "imap"], TriggerType::Email),
    (&["mqtt"], TriggerType::Mqtt),
    (&["sqs"], TriggerType::Sqs),
    (&["rabbitmq"], TriggerType::Rabbitmq),
    (&["redis"], TriggerType::Redis),
    (&["kafka"], TriggerType::Kafka),
];

/// Drop a trailing `@<digits>` version marker.
pub fn strip_version_suffix(node_type: &str) -> &str {
    match node_type.rfind('@') {
        Some(at) => {
            let version = &node_type[at + 1..];
            if !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit()) {
                &node_type[..at]
            } else {
                node_type
            }
        }
        None => node_type,
    }
}

/// The node name without its vendor package, e.g.
/// `"n8n-nodes-base.slackTrigger@2"` → `"slackTrigger"`.
fn local_name(node_type: &str) -> &str {
    let unversioned = strip_version_suffix(node_type);
    match unversioned.rfind('.') {
        Some(dot) => &unversioned[dot + 1..],
        None => unversioned,
    }
}

/// Display name for an app trigger: vendor package and the trailing
/// "trigger" dropped, first letter capitalised. Best effort; may be empty.
pub fn app_name_of(node_type: &str) -> String {
    let local = local_name(node_type);
    let cut = local.len().saturating_sub("trigger".len());
    let stem = match local.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case("trigger") => &local[..cut],
        _ => local,
    };

    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn looks_like_app_trigger(node_type: &str) -> bool {
    let local = local_name(node_type).to_lowercase();
    local.ends_with("trigger") && !APP_TRIGGER_EXCLUSIONS.iter().any(|word| local.contains(word))
}

// ---------------------------------------------------------------------------
// TriggerClassifier
// ---------------------------------------------------------------------------

/// Outcome of resolving one node-type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub trigger: TriggerType,
    pub resolution: Resolution,
    /// Set for app-specific triggers with a non-empty derived name.
    pub app_name: Option<String>,
}

/// Stateless classifier over an immutable registry.
///
/// Cheap to clone; clones share the registry and the diagnostic sink.
#[derive(Clone)]
pub struct TriggerClassifier {
    registry: Arc<NodeTypeRegistry>,
    config: ClassifierConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for TriggerClassifier {
    fn default() -> Self {
        Self::new(
            NodeTypeRegistry::builtin(),
            ClassifierConfig::default(),
            Arc::new(TracingSink),
        )
    }
}

impl fmt::Debug for TriggerClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerClassifier")
            .field("registry_entries", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TriggerClassifier {
    /// Create a new classifier.
    pub fn new(
        registry: NodeTypeRegistry,
        config: ClassifierConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
            sink,
        }
    }

    /// Builtin registry with the entries of `path` merged on top.
    ///
    /// # Errors
    /// [`EngineError::Registry`] if the file cannot be read or parsed.
    pub fn with_registry_file(
        path: &Path,
        config: ClassifierConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, EngineError> {
        let mut registry = NodeTypeRegistry::builtin();
        registry.merge_file(path)?;
        info!(
            path = %path.display(),
            entries = registry.len(),
            "classifier registry loaded"
        );
        Ok(Self::new(registry, config, sink))
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    pub(crate) fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Registry hit for `node_type`, with the key that matched.
    fn lookup<'a>(&'a self, node_type: &'a str) -> Option<(&'a str, TriggerType, Resolution)> {
        if let Some(trigger) = self.registry.lookup_exact(node_type) {
            return Some((node_type, trigger, Resolution::Exact));
        }
        if self.config.case_insensitive_match {
            if let Some((key, trigger)) = self.registry.lookup_case_insensitive(node_type) {
                return Some((key, trigger, Resolution::CaseInsensitive));
            }
        }
        None
    }

    /// Resolve a raw node-type string to a trigger type.
    ///
    /// Registry lookups try the raw string first, then the string without
    /// its `@<digits>` version marker, before any heuristic runs.
    pub fn resolve(&self, node_type: &str) -> Resolved {
        let resolved = |key: &str, trigger: TriggerType, resolution: Resolution| {
            let app_name = (trigger == TriggerType::AppSpecific)
                .then(|| app_name_of(key))
                .filter(|name| !name.is_empty());
            Resolved { trigger, resolution, app_name }
        };

        let unversioned = strip_version_suffix(node_type);
        let hit = self.lookup(node_type).or_else(|| {
            (unversioned != node_type)
                .then(|| self.lookup(unversioned))
                .flatten()
        });
        if let Some((key, trigger, resolution)) = hit {
            return resolved(key, trigger, resolution);
        }

        if self.config.detect_app_triggers && looks_like_app_trigger(node_type) {
            return resolved(node_type, TriggerType::AppSpecific, Resolution::AppSpecific);
        }

        let normalized = unversioned.to_lowercase();
        for (keywords, trigger) in SUBSTRING_RULES {
            if keywords.iter().any(|k| normalized.contains(k)) {
                return resolved(node_type, *trigger, Resolution::Substring);
            }
        }

        resolved(node_type, TriggerType::Unknown, Resolution::Default)
    }

    /// Classify a workflow by its first node.
    pub fn classify(&self, workflow: &Workflow) -> TriggerCapability {
        let Some(first) = workflow.first_node() else {
            self.sink.record(&Diagnostic::FirstNodeMissing {
                workflow: workflow.name.clone(),
            });
            let mut capability = TriggerCapability::from_type(TriggerType::Unknown);
            capability.recommendation = "Check your workflow configuration in N8N".to_owned();
            return capability;
        };

        let resolved = self.resolve(&first.node_type);
        self.sink.record(&Diagnostic::TriggerResolved {
            workflow: workflow.name.clone(),
            node_type: first.node_type.clone(),
            trigger: resolved.trigger,
            resolution: resolved.resolution,
        });

        let mut capability = TriggerCapability::from_type(resolved.trigger);
        match resolved.trigger {
            TriggerType::Unknown => {
                capability.description = format!("Unknown trigger type: {}", first.node_type);
            }
            TriggerType::AppSpecific => {
                if let Some(app) = &resolved.app_name {
                    capability.description = format!("{app} trigger - activated by events in {app}");
                }
                capability.app_name = resolved.app_name;
            }
            _ => {}
        }
        capability
    }

    /// Why `workflow` cannot take `kind` input, or `None` if it can.
    pub fn incompatibility_reason(&self, workflow: &Workflow, kind: InputKind) -> Option<String> {
        let capability = self.classify(workflow);
        let name = &workflow.name;
        let trigger = capability.trigger_type;

        if !capability.can_receive_input {
            return Some(format!(
                "Cannot send to \"{name}\". This workflow uses {trigger} trigger which cannot receive external input. {}",
                capability.recommendation
            ));
        }

        match kind {
            InputKind::Voice if !capability.can_receive_voice => Some(format!(
                "Voice not supported for \"{name}\". This workflow's {trigger} trigger doesn't support voice input. Please type your message instead."
            )),
            InputKind::Text if !capability.can_receive_text => Some(format!(
                "Text not supported for \"{name}\". This workflow's {trigger} trigger doesn't support text input."
            )),
            _ => None,
        }
    }

    /// Accepts input through at least one modality.
    pub fn is_compatible(&self, workflow: &Workflow) -> bool {
        self.classify(workflow).is_compatible()
    }
}
