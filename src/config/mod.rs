//! Configuration schema definitions and loading.
//!
//! Defines the configuration structure for mpris-remote. All sections are
//! optional in the TOML file and fall back to defaults.

mod discovery;
mod general;
mod loading;
mod notifications;
mod paths;

#[cfg(test)]
mod tests;

pub use discovery::DiscoveryConfig;
pub use general::{GeneralConfig, LogLevel};
pub use notifications::NotificationsConfig;
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Which players to probe for.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Desktop notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Config {
    /// JSON schema of the configuration file, pretty-printed.
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized
    pub fn schema_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&schemars::schema_for!(Config))
    }
}
