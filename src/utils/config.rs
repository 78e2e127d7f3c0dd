use crate::core::{PositionOptions, DEFAULT_THRESHOLD_M};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Shortest timeout accepted for a position request (ms)
pub const MIN_TIMEOUT_MS: u64 = 100;
/// Longest timeout accepted for a position request (ms)
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Verification settings loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Proximity radius around the reference (meters)
    pub threshold_m: f64,
    /// Options sent with every position request
    pub position: PositionOptions,
    /// Enable debug logging
    pub debug_logging: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_THRESHOLD_M,
            position: PositionOptions::default(),
            debug_logging: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("{message}")]
    IoError { message: String },
    #[error("{message}")]
    SerializationError { message: String },
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Main configuration manager
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: VerifierConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: VerifierConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        let validation = Self::validate_config(&config);
        for warning in &validation.warnings {
            warn!("{}: {}", path_str, warning);
        }
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }

        debug!(path = %path_str, "configuration loaded");
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Set the proximity threshold in meters
    pub fn set_threshold(&mut self, threshold_m: f64) -> Result<f64, ConfigError> {
        check_threshold(threshold_m)?;
        let old = self.config.threshold_m;
        self.config.threshold_m = threshold_m;
        self.is_modified = true;
        Ok(old)
    }

    /// Set the position request timeout in milliseconds
    pub fn set_timeout(&mut self, timeout_ms: u64) -> Result<u64, ConfigError> {
        check_timeout(timeout_ms)?;
        let old = self.config.position.timeout_ms;
        self.config.position.timeout_ms = timeout_ms;
        self.is_modified = true;
        Ok(old)
    }

    /// Validate a configuration without applying it
    pub fn validate_config(config: &VerifierConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = check_threshold(config.threshold_m) {
            errors.push(e);
        } else if config.threshold_m < 1.0 {
            warnings.push(format!(
                "threshold of {} m is below typical consumer GPS accuracy",
                config.threshold_m
            ));
        }

        if let Err(e) = check_timeout(config.position.timeout_ms) {
            errors.push(e);
        }

        if config.position.maximum_age_ms != 0 {
            warnings.push(format!(
                "maximum_age_ms = {} allows cached readings to be compared",
                config.position.maximum_age_ms
            ));
        }

        if !config.position.enable_high_accuracy {
            warnings.push("high accuracy disabled, fixes may be too coarse for the threshold".to_string());
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

fn check_threshold(threshold_m: f64) -> Result<(), ConfigError> {
    if !threshold_m.is_finite() || threshold_m <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            parameter: "threshold_m".to_string(),
            value: threshold_m.to_string(),
            reason: "threshold must be a positive number of meters".to_string(),
        });
    }
    Ok(())
}

fn check_timeout(timeout_ms: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
        return Err(ConfigError::InvalidParameter {
            parameter: "position.timeout_ms".to_string(),
            value: timeout_ms.to_string(),
            reason: format!("timeout must be between {} and {} ms", MIN_TIMEOUT_MS, MAX_TIMEOUT_MS),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let manager = ConfigurationManager::new();
        let config = manager.config();
        assert_eq!(config.threshold_m, 5.0);
        assert_eq!(config.position.timeout_ms, 10_000);
        assert_eq!(config.position.maximum_age_ms, 0);
        assert!(!manager.is_modified());

        let validation = ConfigurationManager::validate_config(config);
        assert!(validation.is_valid);
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = VerifierConfig {
            threshold_m: -1.0,
            position: PositionOptions::default().with_timeout_ms(10),
            debug_logging: false,
        };
        let validation = ConfigurationManager::validate_config(&config);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors.len(), 2);
    }

    #[test]
    fn test_cached_readings_warn() {
        let mut config = VerifierConfig::default();
        config.position.maximum_age_ms = 30_000;

        let validation = ConfigurationManager::validate_config(&config);
        assert!(validation.is_valid);
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_setters() {
        let mut manager = ConfigurationManager::new();
        assert_eq!(manager.set_threshold(10.0), Ok(5.0));
        assert!(manager.is_modified());
        assert!(manager.set_threshold(0.0).is_err());
        assert!(manager.set_threshold(f64::NAN).is_err());

        assert_eq!(manager.set_timeout(2_000), Ok(10_000));
        assert!(manager.set_timeout(MAX_TIMEOUT_MS + 1).is_err());
        assert_eq!(manager.config().position.timeout_ms, 2_000);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"threshold_m": 7.5, "position": {{"timeout_ms": 3000}}}}"#).unwrap();

        let manager = ConfigurationManager::from_file(file.path()).unwrap();
        assert_eq!(manager.config().threshold_m, 7.5);
        assert_eq!(manager.config().position.timeout_ms, 3000);
        assert!(manager.config().position.enable_high_accuracy);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"threshold_m": 0}}"#).unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(file.path()),
            Err(ConfigError::InvalidParameter { .. })
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(file.path()),
            Err(ConfigError::SerializationError { .. })
        ));

        assert!(matches!(
            ConfigurationManager::from_file("/nonexistent/geoverify.json"),
            Err(ConfigError::IoError { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geoverify.json");

        let mut manager = ConfigurationManager::new();
        manager.set_threshold(12.0).unwrap();
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let reloaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(reloaded.config(), manager.config());
    }

    #[test]
    fn test_save_without_path() {
        let mut manager = ConfigurationManager::new();
        assert!(matches!(manager.save(), Err(ConfigError::IoError { .. })));
    }
}
