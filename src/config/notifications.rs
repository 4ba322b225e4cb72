use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NotificationsConfig {
    /// Show a notification after each action that reports something.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How long notifications stay up, in milliseconds. `-1` lets the
    /// notification server decide.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: i32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_ms() -> i32 {
    -1
}
