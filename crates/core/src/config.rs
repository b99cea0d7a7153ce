use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Settings;

/// Configuration manager for engine settings
/// Separates the schema (valid ranges, descriptions) from the persisted values. Stored as
/// pretty JSON, by default under the platform config directory
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

/// Available configuration options with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub general: GeneralConfigSchema,
    pub topology: TopologyConfigSchema,
    pub presets: PresetConfigSchema,
    pub transition: TransitionConfigSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfigSchema {
    pub target_fps: ConfigOption<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfigSchema {
    pub visual_count: ConfigOption<usize>,
    pub output_count: ConfigOption<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetConfigSchema {
    pub preset_count: ConfigOption<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfigSchema {
    pub fade_time_ms: ConfigOption<u32>,
    pub random_interval_ms: ConfigOption<u32>,
}

/// Configuration option with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption<T> {
    pub default: T,
    pub valid_range: Option<(T, T)>,
    pub description: String,
    pub requires_restart: bool,
}

impl<T: PartialOrd + Copy + std::fmt::Display> ConfigOption<T> {
    fn check(&self, name: &str, value: T, errors: &mut Vec<String>) {
        if let Some((min, max)) = self.valid_range {
            if value < min || value > max {
                errors.push(format!("{} must be between {} and {}", name, min, max));
            }
        }
    }
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
    #[error("Config validation errors: {}", .0.join(", "))]
    ValidationError(Vec<String>),
}

impl ConfigManager {
    /// Create a new configuration manager
    /// If no path is provided, defaults to `default_config_path()`
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_config_path);

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    /// `<config dir>/pixelmix/config.json`, or `config.json` in the working directory when the
    /// platform has no config dir
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("pixelmix").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Load settings from configuration file
    /// Writes a default config file if none exists yet
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            self.save()?;
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Config file version {} doesn't match application version {}",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Self::validate_settings(&config_file.settings).map_err(ConfigError::ValidationError)?;

        self.settings = config_file.settings;
        Ok(self.settings.clone())
    }

    /// Save current settings to configuration file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at: now.clone(),
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Validate, update and save settings
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
        self.settings = settings;
        self.save()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get configuration schema with available options
    pub fn schema() -> ConfigSchema {
        ConfigSchema {
            general: GeneralConfigSchema {
                target_fps: ConfigOption {
                    default: 25,
                    valid_range: Some((1, 120)),
                    description: "Engine update rate in frames per second".to_string(),
                    requires_restart: true,
                },
            },
            topology: TopologyConfigSchema {
                visual_count: ConfigOption {
                    default: 3,
                    valid_range: Some((1, 32)),
                    description: "Number of visual slots".to_string(),
                    requires_restart: true,
                },
                output_count: ConfigOption {
                    default: 2,
                    valid_range: Some((1, 32)),
                    description: "Number of physical outputs".to_string(),
                    requires_restart: true,
                },
            },
            presets: PresetConfigSchema {
                preset_count: ConfigOption {
                    default: 128,
                    valid_range: Some((1, 1024)),
                    description: "Number of preset slots".to_string(),
                    requires_restart: true,
                },
            },
            transition: TransitionConfigSchema {
                fade_time_ms: ConfigOption {
                    default: 1500,
                    valid_range: Some((0, 60_000)),
                    description: "Duration of animated output transitions".to_string(),
                    requires_restart: false,
                },
                random_interval_ms: ConfigOption {
                    default: 4000,
                    valid_range: Some((100, 600_000)),
                    description: "Time between shuffles while random mode is on".to_string(),
                    requires_restart: false,
                },
            },
        }
    }

    /// Validate settings against schema
    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let schema = Self::schema();

        schema
            .general
            .target_fps
            .check("target_fps", settings.target_fps, &mut errors);
        schema
            .topology
            .visual_count
            .check("visual_count", settings.visual_count, &mut errors);
        schema
            .topology
            .output_count
            .check("output_count", settings.output_count, &mut errors);
        schema
            .presets
            .preset_count
            .check("preset_count", settings.preset_count, &mut errors);
        schema
            .transition
            .fade_time_ms
            .check("fade_time_ms", settings.fade_time_ms, &mut errors);
        schema.transition.random_interval_ms.check(
            "random_interval_ms",
            settings.random_interval_ms,
            &mut errors,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_manager_new() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.json");

        let manager = ConfigManager::new(Some(config_path.clone()));
        assert_eq!(manager.config_path(), config_path);
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));
        let settings = manager.load().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(config_path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.json");

        let mut manager = ConfigManager::new(Some(config_path.clone()));

        let mut settings = Settings::default();
        settings.visual_count = 5;
        settings.initial_tint = (10, 20, 30);
        manager.update_settings(settings).unwrap();

        let mut manager2 = ConfigManager::new(Some(config_path));
        let loaded_settings = manager2.load().unwrap();

        assert_eq!(loaded_settings.visual_count, 5);
        assert_eq!(loaded_settings.initial_tint, (10, 20, 30));
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        assert!(ConfigManager::validate_settings(&settings).is_ok());

        settings.visual_count = 0;
        assert!(ConfigManager::validate_settings(&settings).is_err());

        settings.visual_count = 3;
        settings.target_fps = 500;
        let errors = ConfigManager::validate_settings(&settings).unwrap_err();
        assert_eq!(errors, vec!["target_fps must be between 1 and 120".to_string()]);
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::new(Some(temp_dir.path().join("config.json")));

        let mut settings = Settings::default();
        settings.output_count = 100;

        assert!(matches!(
            manager.update_settings(settings),
            Err(ConfigError::ValidationError(_))
        ));
        assert_eq!(manager.settings(), &Settings::default());
    }
}
