use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::{Config, ConfigPaths};
use crate::{MprisRemoteError, Result};

impl Config {
    /// Load the configuration at `path`; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(MprisRemoteError::io(e, path)),
        };

        Self::parse(&content, Some(path))
    }

    /// Load the configuration from its standard location.
    ///
    /// # Errors
    /// Returns error if the location cannot be determined, or as [`Config::load`]
    pub fn load_default() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load(&path)
    }

    /// Parse configuration text.
    ///
    /// # Errors
    /// Returns `MprisRemoteError::TomlParseError` for invalid TOML or values
    pub fn parse(content: &str, path: Option<&Path>) -> Result<Config> {
        toml::from_str(content).map_err(|e| MprisRemoteError::toml_parse(e, path))
    }
}
