use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{ScoringWeights, DEFAULT_MAX_DISTANCE_MILES};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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
pub struct RecommendationSettings {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_max_distance_miles")]
    pub default_max_distance_miles: f64,
    /// JSON or TOML catalog; the reference catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl RecommendationSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            default_max_distance_miles: default_max_distance_miles(),
            catalog_path: None,
        }
    }
}

fn default_latency_ms() -> u64 { 1000 }
fn default_max_distance_miles() -> f64 { DEFAULT_MAX_DISTANCE_MILES }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_max")]
    pub distance_max: f64,
    #[serde(default = "default_distance_decay")]
    pub distance_decay: f64,
    #[serde(default = "default_rating_max")]
    pub rating_max: f64,
    #[serde(default = "default_neutral_rating")]
    pub neutral_rating: f64,
    #[serde(default = "default_availability_bonus")]
    pub availability_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance_max: default_distance_max(),
            distance_decay: default_distance_decay(),
            rating_max: default_rating_max(),
            neutral_rating: default_neutral_rating(),
            availability_bonus: default_availability_bonus(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            distance_max: config.distance_max,
            distance_decay: config.distance_decay,
            rating_max: config.rating_max,
            neutral_rating: config.neutral_rating,
            availability_bonus: config.availability_bonus,
        }
    }
}

fn default_distance_max() -> f64 { 40.0 }
fn default_distance_decay() -> f64 { 8.0 }
fn default_rating_max() -> f64 { 30.0 }
fn default_neutral_rating() -> f64 { 15.0 }
fn default_availability_bonus() -> f64 { 30.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of `full`, `compact` or `pretty`
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
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NEARBY__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEARBY__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("NEARBY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights_match_scoring_defaults() {
        let weights = WeightsConfig::default();
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "full");
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
port = 9090

[recommendations]
latency_ms = 250

[scoring.weights]
availability_bonus = 20.0
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.recommendations.latency(), Duration::from_millis(250));
        assert_eq!(settings.recommendations.default_max_distance_miles, 5.0);
        assert!(settings.recommendations.catalog_path.is_none());
        assert_eq!(settings.scoring_weights().availability_bonus, 20.0);
        assert_eq!(settings.scoring_weights().distance_max, 40.0);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "full");
    }
}
