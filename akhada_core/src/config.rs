//! Configuration file support for Health Akhada.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/akhada/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings read from `config.toml`; every section is optional
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub nutrition: NutritionConfig,
}

/// Where the record store lives
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Ring sync configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl SyncConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Nutrition tracking defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default = "default_daily_calorie_goal")]
    pub daily_calorie_goal: u32,

    #[serde(default = "default_water_serving_liters")]
    pub default_water_serving_liters: f64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            daily_calorie_goal: default_daily_calorie_goal(),
            default_water_serving_liters: default_water_serving_liters(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("akhada")
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_daily_calorie_goal() -> u32 {
    2500
}

fn default_water_serving_liters() -> f64 {
    0.25
}

impl Config {
    /// Read the user config file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path();
        if !path.exists() {
            tracing::debug!("{:?} not present, running with built-in settings", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: Config = toml::from_str(&raw)?;
        parsed.validate()?;
        tracing::info!("Settings read from {:?}", path);
        Ok(parsed)
    }

    /// Reject values the scheduler and trackers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.sync.refresh_interval_secs == 0 {
            return Err(Error::Config(
                "sync.refresh_interval_secs must be greater than zero".into(),
            ));
        }
        if !(self.nutrition.default_water_serving_liters > 0.0) {
            return Err(Error::Config(
                "nutrition.default_water_serving_liters must be positive".into(),
            ));
        }
        Ok(())
    }

    /// `<config dir>/akhada/config.toml`
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("akhada").join("config.toml")
    }

    /// Write these settings as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let rendered = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Cannot render settings as TOML: {}", e)))?;
        std::fs::write(path, rendered)?;
        tracing::info!("Settings written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_settings() {
        let settings = Config::default();
        assert_eq!(settings.sync.refresh_interval_secs, 300);
        assert_eq!(settings.sync.refresh_interval(), Duration::from_secs(300));
        assert_eq!(settings.nutrition.daily_calorie_goal, 2500);
        assert!(settings.data.data_dir.ends_with("akhada"));
    }

    #[test]
    fn test_saved_settings_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sync.refresh_interval_secs = 60;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.sync.refresh_interval_secs, 60);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let toml_str = r#"
[nutrition]
daily_calorie_goal = 2200
"#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.nutrition.daily_calorie_goal, 2200);
        assert_eq!(parsed.nutrition.default_water_serving_liters, 0.25);
        assert_eq!(parsed.sync.refresh_interval_secs, 300);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sync]\nrefresh_interval_secs = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
