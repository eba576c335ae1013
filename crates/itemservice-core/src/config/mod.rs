mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ItemServiceError;
use defaults::*;

/// Top-level item service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// General service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Character encoding of the message resource files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "UTF-8", alias = "utf8")]
    Utf8,
    /// Java's historical `.properties` encoding; non-Latin text goes through `\uXXXX`.
    #[serde(rename = "iso-8859-1", alias = "ISO-8859-1", alias = "latin1")]
    Latin1,
}

impl Encoding {
    /// Canonical label, as written in config files.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "iso-8859-1",
        }
    }
}

/// Message source settings -- which resource bundles to load and how to resolve them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Directory holding `{basename}[_{locale}].properties` files.
    /// When it does not exist the bundled resources are used.
    #[serde(default = "default_messages_dir")]
    pub dir: String,
    /// Bundle basenames, searched in order.
    #[serde(default = "default_basenames")]
    pub basenames: Vec<String>,
    #[serde(default)]
    pub encoding: Encoding,
    /// Locale used when a caller does not supply one (e.g. "ko-KR").
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locales with their own resource files, in addition to the base files.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Search the default locale's files before the base files when the
    /// requested locale has no entry.
    #[serde(default = "default_true")]
    pub fallback_to_default_locale: bool,
    /// Return the key itself instead of failing when nothing matches.
    #[serde(default)]
    pub use_code_as_default_message: bool,
    /// Apply quote/placeholder parsing even when no arguments are given.
    #[serde(default)]
    pub always_use_message_format: bool,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            dir: default_messages_dir(),
            basenames: default_basenames(),
            encoding: Encoding::default(),
            default_locale: default_locale(),
            locales: default_locales(),
            fallback_to_default_locale: true,
            use_code_as_default_message: false,
            always_use_message_format: false,
        }
    }
}

impl MessagesConfig {
    /// Reject settings that cannot produce a usable catalog.
    pub fn validate(&self) -> Result<(), ItemServiceError> {
        if self.basenames.is_empty() {
            return Err(ItemServiceError::Config(
                "messages.basenames must name at least one bundle".into(),
            ));
        }
        if let Some(bad) = self
            .basenames
            .iter()
            .find(|b| b.trim().is_empty() || b.contains(['/', '\\']))
        {
            return Err(ItemServiceError::Config(format!(
                "invalid message basename '{bad}'"
            )));
        }
        if self.default_locale.trim().is_empty() {
            return Err(ItemServiceError::Config(
                "messages.default_locale must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file did not exist; every value is a default.
    Defaults,
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Nothing is logged here
/// so callers can load before the subscriber is installed and report the
/// [`ConfigSource`] afterwards.
pub fn load(path: &str) -> Result<(Config, ConfigSource), ItemServiceError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok((Config::default(), ConfigSource::Defaults));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ItemServiceError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| ItemServiceError::Config(format!("failed to parse config: {}", e)))?;
    config.messages.validate()?;

    Ok((config, ConfigSource::File))
}
