use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Directory holding the JSON payloads (`projects.json`, `schedule.json`, ...)
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// IANA zone used to decide which week is "this week"
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Denver".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CREWDESK__DATA__DIR, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("data.dir", "data")?
            .set_default("schedule.timezone", default_timezone())?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json", false)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file leaves the defaults in place
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CREWDESK")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy variable without prefix
        if let Ok(data_dir) = env::var("DATA_DIR") {
            builder = builder.set_override("data.dir", data_dir)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data.dir.as_os_str().is_empty() {
            return Err("Data directory must not be empty".to_string());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        if self.schedule.timezone.trim().is_empty() {
            return Err("Schedule timezone must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &str) -> Config {
        Config {
            data: DataConfig {
                dir: PathBuf::from(dir),
            },
            schedule: ScheduleConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_empty_data_dir() {
        assert!(config("").validate().is_err());
    }

    #[test]
    fn test_validation_empty_log_level() {
        let mut config = config("data");
        config.observability.log_level = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_timezone() {
        let mut config = config("data");
        config.schedule.timezone = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config("data");

        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.timezone, "America/Denver");
        assert!(!config.observability.json);
    }
}
