//! Hook configuration model.
//!
//! Configuration is stored per entity type as a JSON document carrying a
//! `hook` discriminator. Only the notification hook is recognized; any
//! other discriminator parses into [`HookConfiguration::Unrecognized`] so
//! the engine can reject it with a structured error instead of guessing.

use crate::projection::Projection;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const NOTIFICATION_HOOK: &str = "notification";

/// Configuration of the change-notification hook for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHookConfiguration {
    /// Which fields are watched for changes
    #[serde(default = "Projection::all_fields")]
    pub watch_projection: Projection,
    /// Which fields the payload carries beyond identity fields
    #[serde(default = "Projection::no_fields")]
    pub include_projection: Projection,
    /// Whether array element reorders alone fire a notification
    #[serde(default, skip_serializing_if = "is_false")]
    pub array_ordering_significant: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NotificationHookConfiguration {
    pub fn new(watch: Projection, include: Projection, array_ordering_significant: bool) -> Self {
        Self {
            watch_projection: watch,
            include_projection: include,
            array_ordering_significant,
        }
    }
}

impl Default for NotificationHookConfiguration {
    /// Watch everything, include nothing beyond identity fields
    fn default() -> Self {
        Self::new(Projection::all_fields(), Projection::no_fields(), false)
    }
}

/// A stored hook configuration document
#[derive(Debug, Clone, PartialEq)]
pub enum HookConfiguration {
    Notification(NotificationHookConfiguration),
    /// A configuration whose `hook` discriminator names some other hook
    Unrecognized { hook: String },
}

impl Serialize for HookConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HookConfiguration::Notification(config) => {
                let mut value =
                    serde_json::to_value(config).map_err(serde::ser::Error::custom)?;
                if let Some(fields) = value.as_object_mut() {
                    fields.insert(
                        "hook".to_string(),
                        Value::String(NOTIFICATION_HOOK.to_string()),
                    );
                }
                value.serialize(serializer)
            }
            HookConfiguration::Unrecognized { hook } => {
                serde_json::json!({ "hook": hook }).serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for HookConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let hook = value
            .get("hook")
            .and_then(Value::as_str)
            .unwrap_or(NOTIFICATION_HOOK)
            .to_string();
        if hook != NOTIFICATION_HOOK {
            return Ok(HookConfiguration::Unrecognized { hook });
        }
        if let Some(fields) = value.as_object_mut() {
            fields.remove("hook");
        }
        let config =
            NotificationHookConfiguration::deserialize(value).map_err(D::Error::custom)?;
        Ok(HookConfiguration::Notification(config))
    }
}
