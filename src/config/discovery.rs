use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::mpris::DEFAULT_CANDIDATES;

/// Player discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DiscoveryConfig {
    /// Player ids probed on the session bus, in order.
    ///
    /// Each id is appended to `org.mpris.MediaPlayer2.` to form the bus name.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(ToString::to_string).collect()
}
