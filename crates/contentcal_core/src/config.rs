//! Application configuration loaded from TOML.
//!
//! # Invariants
//! - Every field has a default; a missing file means "all defaults".
//! - `storage_key` is never empty after a successful load.

use crate::calendar::WeekStart;
use crate::logging::normalize_level;
use crate::store::{CorruptStatePolicy, DEFAULT_STORAGE_KEY};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    InvalidValue { field: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::InvalidValue { field, message } => {
                write!(f, "invalid config value for `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// User configuration.
///
/// ```toml
/// data_dir = "/home/me/.local/share/contentcal"
/// storage_key = "contentItems"
/// week_start = "monday"
/// corrupt_state = "reset_to_empty"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the database and logs; front ends pick a platform default.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub week_start: WeekStart,
    pub corrupt_state: CorruptStatePolicy,
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            week_start: WeekStart::default(),
            corrupt_state: CorruptStatePolicy::default(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_key",
                message: "cannot be empty".to_string(),
            });
        }
        if let Some(level) = &self.log_level {
            normalize_level(level).map_err(|err| ConfigError::InvalidValue {
                field: "log_level",
                message: err.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::calendar::WeekStart;
    use crate::store::CorruptStatePolicy;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage_key, "contentItems");
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.corrupt_state, CorruptStatePolicy::FailFast);
    }

    #[test]
    fn parses_every_field() {
        let config = AppConfig::from_toml_str(
            r#"
            data_dir = "/tmp/contentcal"
            storage_key = "plan"
            week_start = "monday"
            corrupt_state = "reset_to_empty"
            log_level = "WARN"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "plan");
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.corrupt_state, CorruptStatePolicy::ResetToEmpty);
        assert_eq!(config.log_level.as_deref(), Some("WARN"));
    }

    #[test]
    fn rejects_blank_storage_key_and_unknown_level() {
        let err = AppConfig::from_toml_str(r#"storage_key = " ""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "storage_key", .. }));

        let err = AppConfig::from_toml_str(r#"log_level = "loud""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "log_level", .. }));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = AppConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
