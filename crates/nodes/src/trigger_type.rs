//! The closed set of trigger kinds a workflow's entry node can resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a workflow is started, as far as an external client is concerned.
///
/// Serialized in kebab-case (`"app-specific"`). Tags this build does not
/// know deserialize to [`TriggerType::Unknown`] so cached descriptors from a
/// newer vocabulary still load; [`FromStr`] is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerType {
    Webhook,
    Chat,
    Form,
    Schedule,
    Manual,
    Email,
    Mqtt,
    Sqs,
    Rabbitmq,
    Redis,
    Kafka,
    Rss,
    File,
    Error,
    AppSpecific,
    #[serde(other)]
    Unknown,
}

/// Returned by [`TriggerType::from_str`] for a tag outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger type '{0}'")]
pub struct ParseTriggerTypeError(pub String);

impl TriggerType {
    /// Every variant, in declaration order.
    pub const ALL: [TriggerType; 16] = [
        TriggerType::Webhook,
        TriggerType::Chat,
        TriggerType::Form,
        TriggerType::Schedule,
        TriggerType::Manual,
        TriggerType::Email,
        TriggerType::Mqtt,
        TriggerType::Sqs,
        TriggerType::Rabbitmq,
        TriggerType::Redis,
        TriggerType::Kafka,
        TriggerType::Rss,
        TriggerType::File,
        TriggerType::Error,
        TriggerType::AppSpecific,
        TriggerType::Unknown,
    ];

    /// The wire tag, e.g. `"app-specific"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerType::Webhook => "webhook",
            TriggerType::Chat => "chat",
            TriggerType::Form => "form",
            TriggerType::Schedule => "schedule",
            TriggerType::Manual => "manual",
            TriggerType::Email => "email",
            TriggerType::Mqtt => "mqtt",
            TriggerType::Sqs => "sqs",
            TriggerType::Rabbitmq => "rabbitmq",
            TriggerType::Redis => "redis",
            TriggerType::Kafka => "kafka",
            TriggerType::Rss => "rss",
            TriggerType::File => "file",
            TriggerType::Error => "error",
            TriggerType::AppSpecific => "app-specific",
            TriggerType::Unknown => "unknown",
        }
    }

    /// Short badge label. App-specific triggers show their app name when one
    /// was derived.
    pub fn label(self, app_name: Option<&str>) -> String {
        let label = match self {
            TriggerType::Webhook => "Webhook",
            TriggerType::Chat => "Chat",
            TriggerType::Form => "Form",
            TriggerType::Schedule => "Schedule",
            TriggerType::Manual => "Manual",
            TriggerType::Email => "Email",
            TriggerType::Mqtt => "MQTT",
            TriggerType::Sqs => "SQS",
            TriggerType::Rabbitmq => "RabbitMQ",
            TriggerType::Redis => "Redis",
            TriggerType::Kafka => "Kafka",
            TriggerType::Rss => "RSS",
            TriggerType::File => "File",
            TriggerType::Error => "Error",
            TriggerType::AppSpecific => match app_name {
                Some(name) if !name.is_empty() => return name.to_owned(),
                _ => "App",
            },
            TriggerType::Unknown => "Unknown",
        };
        label.to_owned()
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = ParseTriggerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriggerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTriggerTypeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_match_serde_names() {
        for t in TriggerType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, serde_json::Value::String(t.as_str().to_owned()));
            assert_eq!(t.as_str().parse::<TriggerType>().unwrap(), t);
        }
    }

    #[test]
    fn unrecognised_tag_deserializes_to_unknown_but_fails_strict_parse() {
        let t: TriggerType = serde_json::from_str("\"carrier-pigeon\"").unwrap();
        assert_eq!(t, TriggerType::Unknown);
        assert!("carrier-pigeon".parse::<TriggerType>().is_err());
    }

    #[test]
    fn app_specific_label_prefers_app_name() {
        assert_eq!(TriggerType::AppSpecific.label(Some("Slack")), "Slack");
        assert_eq!(TriggerType::AppSpecific.label(Some("")), "App");
        assert_eq!(TriggerType::AppSpecific.label(None), "App");
        assert_eq!(TriggerType::Rabbitmq.label(None), "RabbitMQ");
    }
}
