//! What each trigger type can accept.
//!
//! Type resolution lives in the classifier; this table only answers "given a
//! trigger type, what can it receive". Either side can change without the
//! other.

use serde::{Deserialize, Serialize};

use nodes::TriggerType;

/// Static capability row for one trigger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityProfile {
    pub can_receive_input: bool,
    pub can_receive_text: bool,
    pub can_receive_voice: bool,
    pub setup_required: bool,
    pub description: &'static str,
    pub recommendation: &'static str,
}

const NO_INPUT: &str = "Cannot receive external input. Use webhook or chat trigger instead.";
const TEXT_AND_VOICE: &str = "Compatible with text and voice input";

const fn passive(description: &'static str, recommendation: &'static str) -> CapabilityProfile {
    CapabilityProfile {
        can_receive_input: false,
        can_receive_text: false,
        can_receive_voice: false,
        setup_required: false,
        description,
        recommendation,
    }
}

const UNKNOWN_PROFILE: CapabilityProfile = passive(
    "Unable to determine workflow trigger type",
    "Use webhook or chat trigger for text/voice input",
);

/// The capability contract. Send gating in every client depends on these
/// flags.
pub const CAPABILITY_TABLE: &[(TriggerType, CapabilityProfile)] = &[
    (
        TriggerType::Webhook,
        CapabilityProfile {
            can_receive_input: true,
            can_receive_text: true,
            can_receive_voice: true,
            setup_required: false,
            description: "Webhook trigger - accepts HTTP POST requests",
            recommendation: TEXT_AND_VOICE,
        },
    ),
    (
        TriggerType::Chat,
        CapabilityProfile {
            can_receive_input: true,
            can_receive_text: true,
            can_receive_voice: true,
            setup_required: false,
            description: "Chat trigger - accepts chat messages",
            recommendation: TEXT_AND_VOICE,
        },
    ),
    (
        TriggerType::Form,
        CapabilityProfile {
            can_receive_input: true,
            can_receive_text: true,
            can_receive_voice: false,
            setup_required: true,
            description: "Form trigger - accepts form submissions",
            recommendation: "Compatible with text input only (no voice)",
        },
    ),
    (TriggerType::Schedule, passive("Schedule trigger - runs on a timer", NO_INPUT)),
    (
        TriggerType::Manual,
        passive("Manual trigger - requires manual execution in N8N", NO_INPUT),
    ),
    (
        TriggerType::Email,
        passive(
            "Email trigger - activated by incoming emails",
            "Not compatible with text/voice input from this app",
        ),
    ),
    (
        TriggerType::Mqtt,
        passive("MQTT trigger - activated by messages on an MQTT topic", NO_INPUT),
    ),
    (
        TriggerType::Sqs,
        passive("SQS trigger - activated by messages in an AWS SQS queue", NO_INPUT),
    ),
    (
        TriggerType::Rabbitmq,
        passive("RabbitMQ trigger - activated by messages in a RabbitMQ queue", NO_INPUT),
    ),
    (
        TriggerType::Redis,
        passive("Redis trigger - activated by messages on a Redis channel", NO_INPUT),
    ),
    (
        TriggerType::Kafka,
        passive("Kafka trigger - activated by messages on a Kafka topic", NO_INPUT),
    ),
    (TriggerType::Rss, passive("RSS trigger - activated by new feed items", NO_INPUT)),
    (
        TriggerType::File,
        passive("File trigger - activated by local file changes", NO_INPUT),
    ),
    (
        TriggerType::Error,
        passive("Error trigger - runs when another workflow fails", NO_INPUT),
    ),
    (
        TriggerType::AppSpecific,
        CapabilityProfile {
            can_receive_input: false,
            can_receive_text: false,
            can_receive_voice: false,
            setup_required: true,
            description: "App trigger - activated by events in an external app",
            recommendation: "Cannot receive text/voice input from this app. Use webhook or chat trigger instead.",
        },
    ),
    (TriggerType::Unknown, UNKNOWN_PROFILE),
];

/// Capability row for `trigger`. Total: a type missing from the table gets
/// the `unknown` row.
pub fn capability_of(trigger: TriggerType) -> CapabilityProfile {
    CAPABILITY_TABLE
        .iter()
        .find(|(t, _)| *t == trigger)
        .map(|(_, profile)| *profile)
        .unwrap_or(UNKNOWN_PROFILE)
}

// ---------------------------------------------------------------------------
// TriggerCapability
// ---------------------------------------------------------------------------

/// Capability descriptor for one workflow. Built fresh per classification;
/// callers may cache it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerCapability {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub can_receive_input: bool,
    pub can_receive_text: bool,
    pub can_receive_voice: bool,
    pub setup_required: bool,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

/// How a workflow badge should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Compatible,
    Incompatible,
    Unknown,
}

impl TriggerCapability {
    /// Descriptor straight from the table row for `trigger`.
    pub fn from_type(trigger: TriggerType) -> Self {
        let profile = capability_of(trigger);
        Self {
            trigger_type: trigger,
            can_receive_input: profile.can_receive_input,
            can_receive_text: profile.can_receive_text,
            can_receive_voice: profile.can_receive_voice,
            setup_required: profile.setup_required,
            description: profile.description.to_owned(),
            recommendation: profile.recommendation.to_owned(),
            app_name: None,
        }
    }

    /// Accepts input at all, through at least one modality.
    pub fn is_compatible(&self) -> bool {
        self.can_receive_input && (self.can_receive_text || self.can_receive_voice)
    }

    pub fn badge_tone(&self) -> BadgeTone {
        if self.can_receive_input {
            BadgeTone::Compatible
        } else if self.trigger_type == TriggerType::Unknown {
            BadgeTone::Unknown
        } else {
            BadgeTone::Incompatible
        }
    }

    /// Badge text, e.g. `"Webhook"` or the app name.
    pub fn label(&self) -> String {
        self.trigger_type.label(self.app_name.as_deref())
    }
}
