use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DashboardSettings;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub proximity: ProximitySettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ProximitySettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
    #[serde(default = "default_radius_options_km")]
    pub radius_options_km: Vec<f64>,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
            radius_options_km: default_radius_options_km(),
        }
    }
}

fn default_radius_km() -> f64 { 5.0 }
fn default_max_radius_km() -> f64 { 25.0 }
fn default_radius_options_km() -> Vec<f64> { vec![1.0, 2.0, 5.0, 10.0, 25.0] }

impl From<ProximitySettings> for DashboardSettings {
    fn from(settings: ProximitySettings) -> Self {
        DashboardSettings {
            default_radius_km: settings.default_radius_km,
            max_radius_km: settings.max_radius_km,
            radius_options_km: settings.radius_options_km,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    /// JSON file of issues to serve instead of the bundled mock set
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl LoggingSettings {
    /// Human-readable output instead of one JSON object per line
    pub fn is_pretty(&self) -> bool {
        self.format == "pretty"
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CIVIC_)
    /// 5. Plain `HOST` / `PORT`, as set by most container platforms, and
    ///    `LOG_LEVEL` / `LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CIVIC__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CIVIC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CIVIC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject radius settings the dashboard cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let proximity = &self.proximity;

        if !proximity.max_radius_km.is_finite() || proximity.max_radius_km <= 0.0 {
            return Err(ConfigError::Message(format!(
                "proximity.max_radius_km must be a positive number, got {}",
                proximity.max_radius_km
            )));
        }

        if !(0.0..=proximity.max_radius_km).contains(&proximity.default_radius_km) {
            return Err(ConfigError::Message(format!(
                "proximity.default_radius_km ({}) must lie within [0, {}]",
                proximity.default_radius_km, proximity.max_radius_km
            )));
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigError::Message(format!(
                "logging.format must be \"json\" or \"pretty\", got {:?}",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Apply the unprefixed platform variables on top of everything else
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(host) = env::var("HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|e| ConfigError::Message(format!("PORT must be a port number: {}", e)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_proximity() {
        let proximity = ProximitySettings::default();
        assert_eq!(proximity.default_radius_km, 5.0);
        assert_eq!(proximity.max_radius_km, 25.0);
        assert_eq!(proximity.radius_options_km, vec![1.0, 2.0, 5.0, 10.0, 25.0]);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut settings = Settings::default();
        assert!(!settings.logging.is_pretty());

        settings.logging.format = "pretty".to_string();
        assert!(settings.validate().is_ok());
        assert!(settings.logging.is_pretty());

        settings.logging.format = "xml".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_logging_section() {
        let path = std::env::temp_dir().join("civic_proximity_logging_test.toml");
        std::fs::write(&path, "[logging]\nlevel = \"civic_proximity=debug\"\nformat = \"pretty\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.logging.level, "civic_proximity=debug");
        assert!(settings.logging.is_pretty());
    }

    #[test]
    fn test_validate_rejects_default_above_max() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.proximity.default_radius_km = 50.0;
        assert!(settings.validate().is_err());

        settings.proximity.default_radius_km = 5.0;
        settings.proximity.max_radius_km = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("civic_proximity_settings_test.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[proximity]\ndefault_radius_km = 2.0\nmax_radius_km = 10.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.proximity.default_radius_km, 2.0);
        assert_eq!(settings.proximity.radius_options_km.len(), 5);
        assert_eq!(settings.logging.level, "info");
    }
}
