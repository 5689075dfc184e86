//! Engine configuration

use crate::error::{MasqueError, Result};
use crate::models::{EntityKind, ReplacementStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-category detection switches
///
/// A missing field deserializes to `true`, so callers can persist a partial
/// map and only list the categories they turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledKinds {
    pub person: bool,
    pub company: bool,
    pub location: bool,
    pub email: bool,
    pub phone: bool,
    pub identifier: bool,
}

impl Default for EnabledKinds {
    fn default() -> Self {
        Self {
            person: true,
            company: true,
            location: true,
            email: true,
            phone: true,
            identifier: true,
        }
    }
}

impl EnabledKinds {
    /// All categories disabled
    pub fn none() -> Self {
        Self {
            person: false,
            company: false,
            location: false,
            email: false,
            phone: false,
            identifier: false,
        }
    }

    /// Whether a category may run
    pub fn allows(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Person => self.person,
            EntityKind::Company => self.company,
            EntityKind::Location => self.location,
            EntityKind::Email => self.email,
            EntityKind::Phone => self.phone,
            EntityKind::Identifier => self.identifier,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-category detection switches
    #[serde(default)]
    pub enabled: EnabledKinds,

    /// Replacement style for generated values
    #[serde(default)]
    pub style: ReplacementStyle,

    /// Optional lexicon TOML file overriding the embedded tables
    pub lexicon_file: Option<PathBuf>,
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.lexicon_file {
            if !path.exists() {
                return Err(MasqueError::Configuration(format!(
                    "Lexicon file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(MasqueError::Configuration(format!(
                    "Lexicon file must be a TOML file: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MASQUE_STYLE") {
            self.style = match val.to_lowercase().as_str() {
                "french" => ReplacementStyle::French,
                "neutral" => ReplacementStyle::Neutral,
                "labels" => ReplacementStyle::Labels,
                _ => {
                    return Err(MasqueError::Configuration(format!(
                        "Invalid MASQUE_STYLE: {val}"
                    )))
                }
            };
        }

        if let Ok(val) = std::env::var("MASQUE_LEXICON_FILE") {
            self.lexicon_file = Some(PathBuf::from(val));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = EngineConfig::default();
        for kind in EntityKind::ALL {
            assert!(config.enabled.allows(kind));
        }
        assert_eq!(config.style, ReplacementStyle::French);
        assert!(config.lexicon_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_enabled_map_deserializes() {
        let enabled: EnabledKinds = serde_json::from_str(r#"{"email": false}"#).unwrap();
        assert!(!enabled.email);
        assert!(enabled.person);
        assert!(enabled.identifier);
    }

    #[test]
    fn test_missing_lexicon_file_rejected() {
        let config = EngineConfig {
            lexicon_file: Some(PathBuf::from("/nonexistent/lexicon.toml")),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_toml_lexicon_file_rejected() {
        let file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        let config = EngineConfig {
            lexicon_file: Some(file.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
