#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Retrospec Configuration
//!
//! Settings for a scaffold run, stored as TOML:
//!
//! ```toml
//! [generation]
//! module_path = "modules/tomcat"
//! manifest_extension = "pp"
//! spec_extension = "rb"
//! dumper = "full"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional. Missing keys take their defaults, and a missing default
//! file means the defaults are used as-is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written
    #[error("Failed to access config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// The file is not valid TOML for [`Config`]
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A setting parsed but holds an unusable value
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid {
        /// Dotted key of the offending setting
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `[generation]` table
    #[serde(default)]
    pub generation: GenerationConfig,
    /// `[logging]` table
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scaffold generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Module root to scaffold (the directory containing `manifests/`)
    pub module_path: PathBuf,
    /// Extension of manifest files, without the dot
    pub manifest_extension: String,
    /// Extension of generated spec files, without the dot
    pub spec_extension: String,
    /// Content dumper used to render scaffolds (`full` or `summary`)
    pub dumper: String,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level, one of [`LOG_LEVELS`]
    pub level: String,
}

impl Config {
    /// Load and validate the configuration stored at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_file`](Self::from_file), but an absent file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write this configuration to `path` as pretty-printed TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject settings that would produce unusable paths or filters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extension("generation.manifest_extension", &self.generation.manifest_extension)?;
        check_extension("generation.spec_extension", &self.generation.spec_extension)?;

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                key: "logging.level",
                reason: format!("'{}' is not one of {}", self.logging.level, LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// Default location of the config file: `{config_dir()}/retrospec/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?;
        Ok(dir.join("retrospec").join("config.toml"))
    }

    /// Default module path: the current directory
    pub fn default_module_path() -> PathBuf {
        Self::default_module_path_internal(std::env::current_dir().ok())
    }

    fn default_module_path_internal(current_dir: Option<PathBuf>) -> PathBuf {
        current_dir.unwrap_or_else(|| PathBuf::from("."))
    }
}

fn check_extension(key: &'static str, extension: &str) -> Result<(), ConfigError> {
    let reason = if extension.is_empty() {
        "must not be empty"
    } else if extension.starts_with('.') {
        "must be given without the leading dot"
    } else if extension.contains(|c: char| c == '/' || c == '\\') {
        "must not contain path separators"
    } else {
        return Ok(());
    };
    Err(ConfigError::Invalid { key, reason: reason.to_string() })
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            module_path: Config::default_module_path(),
            manifest_extension: "pp".to_string(),
            spec_extension: "rb".to_string(),
            dumper: "full".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).expect("Failed to write config");
        path
    }

    #[test]
    fn full_file_is_loaded() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = write_config(
            &dir,
            "[generation]\nmodule_path = \"modules/tomcat\"\ndumper = \"summary\"\n\n[logging]\nlevel = \"debug\"\n",
        );

        let config = Config::from_file(&path).expect("config should load");
        assert_eq!(config.generation.module_path, PathBuf::from("modules/tomcat"));
        assert_eq!(config.generation.dumper, "summary");
        assert_eq!(config.generation.spec_extension, "rb");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn read_and_parse_failures_are_distinguished() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        match Config::from_file(dir.path().join("absent.toml")) {
            Err(ConfigError::FileRead(_)) => {}
            other => panic!("expected FileRead, got {:?}", other),
        }

        let path = write_config(&dir, "generation = [");
        match Config::from_file(&path) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn bad_values_are_rejected() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = write_config(&dir, "[generation]\nspec_extension = \".rb\"\n");
        match Config::from_file(&path) {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "generation.spec_extension"),
            other => panic!("expected Invalid, got {:?}", other),
        }

        let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");
        match Config::from_file(&path) {
            Err(ConfigError::Invalid { key, reason }) => {
                assert_eq!(key, "logging.level");
                assert!(reason.contains("loud"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let mut config = Config::default();
        config.generation.module_path = PathBuf::from("/srv/modules/ntp");
        config.logging.level = "warn".into();

        let path = dir.path().join("saved.toml");
        config.save(&path).expect("config should save");
        assert_eq!(Config::from_file(&path).expect("config should reload"), config);

        let nested = dir.path().join("missing").join("config.toml");
        assert!(matches!(config.save(&nested), Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let config = Config::load_or_default(dir.path().join("absent.toml"))
            .expect("missing config should fall back to defaults");
        assert_eq!(config.generation.manifest_extension, "pp");
        assert_eq!(config.generation.dumper, "full");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn default_path_is_under_retrospec() {
        let path = Config::default_path().expect("config dir should be available");
        assert!(path.ends_with("retrospec/config.toml"));
    }

    #[test]
    fn module_path_falls_back_to_dot() {
        assert_eq!(
            Config::default_module_path_internal(Some(PathBuf::from("/tmp/current"))),
            PathBuf::from("/tmp/current")
        );
        assert_eq!(Config::default_module_path_internal(None), PathBuf::from("."));
    }
}
