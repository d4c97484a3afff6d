//! # Rate Configuration
//!
//! Where the rate comes from, how long it stays fresh and where it is cached.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LIRA_RATE_URL=https://example.org/usd.json                         │
//! │     LIRA_RATE_FRESHNESS_SECS=3600                                      │
//! │     LIRA_RATE_TIMEOUT_SECS=5                                           │
//! │     LIRA_RATE_CACHE_PATH=/tmp/syp_usd_rate.json                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/companion/rates.toml (Linux)                             │
//! │     ~/Library/Application Support/com.lira.companion/rates.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     public currency feed, 12 h freshness, 10 s timeout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # rates.toml
//! [source]
//! endpoint = "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json"
//! timeout_secs = 10
//!
//! [cache]
//! freshness_secs = 43200
//! path = "/var/lib/lira/syp_usd_rate.json"  # optional
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{RateError, RateResult};

/// Public USD feed that carries the SYP rate under `usd.syp`.
pub const DEFAULT_ENDPOINT: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json";

/// File name of the on-disk rate cache.
pub const CACHE_FILE_NAME: &str = "syp_usd_rate.json";

const CONFIG_FILE_NAME: &str = "rates.toml";

// =============================================================================
// Sections
// =============================================================================

/// Rate provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Feed URL (http or https).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Rate cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long a cached rate is used without refetching.
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,

    /// Cache file location. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_freshness_secs() -> u64 {
    12 * 60 * 60
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            freshness_secs: default_freshness_secs(),
            path: None,
        }
    }
}

// =============================================================================
// RatesConfig
// =============================================================================

/// Complete rate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Provider settings.
    #[serde(default)]
    pub source: SourceSettings,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheSettings,
}

impl RatesConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (rates.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RateResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading rate config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load rate config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> RateResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RateError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Rate config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RateResult<()> {
        let url = Url::parse(&self.source.endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RateError::InvalidUrl(format!(
                "Rate endpoint must use http:// or https://, got: {}",
                self.source.endpoint
            )));
        }

        if self.source.timeout_secs == 0 {
            return Err(RateError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.cache.freshness_secs == 0 {
            return Err(RateError::InvalidConfig(
                "freshness_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `LIRA_RATE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable numbers are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("LIRA_RATE_URL") {
            debug!(url = %url, "Overriding rate endpoint from environment");
            self.source.endpoint = url;
        }

        if let Some(secs) = lookup("LIRA_RATE_FRESHNESS_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.cache.freshness_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring invalid LIRA_RATE_FRESHNESS_SECS"),
            }
        }

        if let Some(secs) = lookup("LIRA_RATE_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.source.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring invalid LIRA_RATE_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("LIRA_RATE_CACHE_PATH") {
            debug!(path = %path, "Overriding rate cache path from environment");
            self.cache.path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "lira", "companion")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed feed URL.
    pub fn endpoint_url(&self) -> RateResult<Url> {
        Ok(Url::parse(&self.source.endpoint)?)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    /// Freshness window of a cached rate.
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.cache.freshness_secs)
    }

    /// Cache file path: the configured one, else the platform data dir.
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache.path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join(CACHE_FILE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lira-rates-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = RatesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.freshness(), Duration::from_secs(43_200));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RatesConfig::default();

        config.source.endpoint = "ftp://example.org/usd.json".to_string();
        assert!(matches!(config.validate(), Err(RateError::InvalidUrl(_))));

        config.source.endpoint = "not a url".to_string();
        assert!(config.validate().unwrap_err().is_config_error());

        config.source.endpoint = "http://localhost:8080/usd.json".to_string();
        assert!(config.validate().is_ok());

        config.cache.freshness_secs = 0;
        assert!(matches!(config.validate(), Err(RateError::InvalidConfig(_))));

        config.cache.freshness_secs = 60;
        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LIRA_RATE_URL", "https://rates.example.org/usd.json"),
            ("LIRA_RATE_FRESHNESS_SECS", "600"),
            ("LIRA_RATE_TIMEOUT_SECS", "soon"),
            ("LIRA_RATE_CACHE_PATH", "/tmp/rate.json"),
        ]
        .into_iter()
        .collect();

        let mut config = RatesConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.endpoint, "https://rates.example.org/usd.json");
        assert_eq!(config.cache.freshness_secs, 600);
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.cache_path(), Some(PathBuf::from("/tmp/rate.json")));
    }

    #[test]
    fn test_toml_sections() {
        let config: RatesConfig = toml::from_str(
            r#"
            [cache]
            freshness_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.freshness_secs, 60);
        assert_eq!(config.source, SourceSettings::default());

        let toml_str = toml::to_string_pretty(&RatesConfig::default()).unwrap();
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[cache]"));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("rates.toml");
        let mut config = RatesConfig::default();
        config.source.timeout_secs = 3;
        config.save(Some(path.clone())).unwrap();

        let loaded = RatesConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.source.timeout_secs, 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let path = temp_path("broken.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[source\nendpoint = ").unwrap();

        assert!(RatesConfig::load(Some(path.clone())).is_err());
        assert_eq!(
            RatesConfig::load_or_default(Some(path.clone())),
            RatesConfig::default()
        );

        std::fs::remove_file(&path).ok();
    }
}
