//! Configuration file support for the syllabus tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/syllabus/config.toml`.

use crate::ics::DEFAULT_CALENDAR_NAME;
use crate::weights::{DEFAULT_DECIMALS, DEFAULT_TOLERANCE, MAX_DECIMALS};
use crate::{Error, Normalizer, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub normalization: NormalizationConfig,
}

/// Export destination and naming
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            calendar_name: default_calendar_name(),
        }
    }
}

/// Weight normalization parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            tolerance: default_tolerance(),
        }
    }
}

impl NormalizationConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.decimals)
    }
}

// Default value functions
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            other => {
                tracing::info!("No config file found at {:?}, using defaults", other);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if a config directory is known
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("syllabus").join("config.toml"))
    }

    /// Reject values the normalizer and report cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.normalization.decimals > MAX_DECIMALS {
            return Err(Error::Config(format!(
                "normalization.decimals must be at most {}, got {}",
                MAX_DECIMALS, self.normalization.decimals
            )));
        }
        let tolerance = self.normalization.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::Config(format!(
                "normalization.tolerance must be a non-negative number, got {}",
                tolerance
            )));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()
            .ok_or_else(|| Error::Config("No config directory available".into()))?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.export.calendar_name, "Syllabus Events");
        assert_eq!(config.normalization.decimals, 2);
        assert_eq!(config.normalization.tolerance, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("syllabus").join("config.toml");

        let mut config = Config::default();
        config.export.calendar_name = "MATH 201".into();
        config.normalization.tolerance = 1.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.export.calendar_name, "MATH 201");
        assert_eq!(loaded.normalization.tolerance, 1.0);
        assert_eq!(loaded.normalization.decimals, 2);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[normalization]
decimals = 1
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.normalization.decimals, 1);
        assert_eq!(config.normalization.tolerance, 0.5); // default
        assert_eq!(config.export.calendar_name, "Syllabus Events"); // default
        assert_eq!(config.normalization.normalizer().decimals(), 1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        std::fs::write(&path, "[normalization]\ndecimals = 9\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[normalization]\ntolerance = -1.0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[export\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
