//! Watch-face runtime configuration.
//!
//! # Responsibility
//! - Hold the settings that may differ between deployments: window title,
//!   resource location, badge routing mode and logging.
//! - Load from JSON and `ANALOGWATCH_*` environment overrides.
//!
//! # Invariants
//! - Layout part names, signals, message ids and app ids are constants and
//!   never configurable.
//! - A config returned by a loader has passed `validate()`.

use crate::lifecycle::badge::AppIdMatch;
use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_PACKAGE: &str = "ANALOGWATCH_PACKAGE";
pub const ENV_RESOURCE_DIR: &str = "ANALOGWATCH_RESOURCE_DIR";
pub const ENV_BADGE_MATCH: &str = "ANALOGWATCH_BADGE_MATCH";
pub const ENV_LOG_LEVEL: &str = "ANALOGWATCH_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ANALOGWATCH_LOG_DIR";

const DEFAULT_PACKAGE: &str = "org.example.analogwatch";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidPackage(String),
    InvalidLogLevel(String),
    InvalidBadgeMatch(String),
    RelativePath { field: &'static str, path: PathBuf },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "config parse failed: {details}"),
            Self::InvalidPackage(value) => write!(f, "invalid package name: `{value}`"),
            Self::InvalidLogLevel(details) => write!(f, "{details}"),
            Self::InvalidBadgeMatch(value) => {
                write!(f, "invalid badge_match `{value}`; expected exact|prefix")
            }
            Self::RelativePath { field, path } => {
                write!(f, "{field} must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Deployment settings for one watch-face process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Package name; also used as the window title.
    pub package: String,
    /// Overrides the host resource directory when set.
    pub resource_dir: Option<PathBuf>,
    /// How badge source app ids are compared with companion app ids.
    pub badge_match: AppIdMatch,
    pub log_level: String,
    /// Rolling log directory. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            resource_dir: None,
            badge_match: AppIdMatch::Exact,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl WatchConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `ANALOGWATCH_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(package) = read(ENV_PACKAGE) {
            self.package = package;
        }
        if let Some(dir) = read(ENV_RESOURCE_DIR) {
            self.resource_dir = Some(PathBuf::from(dir));
        }
        if let Some(mode) = read(ENV_BADGE_MATCH) {
            self.badge_match = mode.parse()?;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let package = self.package.trim();
        if package.is_empty() || package.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidPackage(self.package.clone()));
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        check_absolute("resource_dir", self.resource_dir.as_ref())?;
        check_absolute("log_dir", self.log_dir.as_ref())?;
        Ok(())
    }
}

fn check_absolute(field: &'static str, path: Option<&PathBuf>) -> Result<(), ConfigError> {
    match path {
        Some(path) if !path.is_absolute() => Err(ConfigError::RelativePath {
            field,
            path: path.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, WatchConfig, ENV_BADGE_MATCH, ENV_LOG_LEVEL, ENV_PACKAGE};
    use crate::lifecycle::badge::AppIdMatch;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = WatchConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.package, "org.example.analogwatch");
        assert_eq!(config.badge_match, AppIdMatch::Exact);
    }

    #[test]
    fn overrides_replace_fields_and_skip_blank_values() {
        let config = WatchConfig::default()
            .with_overrides(lookup(&[
                (ENV_PACKAGE, " org.example.face "),
                (ENV_BADGE_MATCH, "prefix"),
                (ENV_LOG_LEVEL, "  "),
            ]))
            .expect("overrides apply");
        assert_eq!(config.package, "org.example.face");
        assert_eq!(config.badge_match, AppIdMatch::Prefix);
        assert_eq!(config.log_level, WatchConfig::default().log_level);
    }

    #[test]
    fn overrides_reject_unknown_badge_mode() {
        let err = WatchConfig::default()
            .with_overrides(lookup(&[(ENV_BADGE_MATCH, "fuzzy")]))
            .expect_err("unknown mode must fail");
        assert_eq!(err, ConfigError::InvalidBadgeMatch("fuzzy".to_string()));
    }

    #[test]
    fn validate_rejects_relative_resource_dir() {
        let config = WatchConfig {
            resource_dir: Some("res".into()),
            ..WatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RelativePath {
                field: "resource_dir",
                ..
            })
        ));
    }
}
