//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MICROSHOP_API_URL=https://api.microshop.app                        │
//! │     MICROSHOP_STRIPE_PUBLISHABLE_KEY=pk_test_...                       │
//! │     MICROSHOP_DB_PATH=/tmp/microshop.db                                │
//! │     MICROSHOP_PAYMENT_DELAY_MS=0                                       │
//! │     MICROSHOP_AUTH_DELAY_MS=0                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/microshop/microshop.toml (Linux)                         │
//! │     ~/Library/Application Support/app.microshop.microshop/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! stripe_publishable_key = ""
//!
//! [storage]
//! database_path = "/home/me/microshop.db"   # optional
//!
//! [simulation]
//! auth_delay_ms = 1500
//! payment_delay_ms = 2000
//! onboarding_delay_ms = 2000
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use microshop_client::ApiConfig;
use microshop_core::Money;

use crate::error::{AppError, AppResult};

pub const CONFIG_FILE_NAME: &str = "microshop.toml";
pub const DATABASE_FILE_NAME: &str = "microshop.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub stripe_publishable_key: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    microshop_client::config::DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            stripe_publishable_key: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Artificial latency of the flows that have no backend yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_auth_delay")]
    pub auth_delay_ms: u64,

    #[serde(default = "default_payment_delay")]
    pub payment_delay_ms: u64,

    #[serde(default = "default_onboarding_delay")]
    pub onboarding_delay_ms: u64,
}

fn default_auth_delay() -> u64 {
    1500
}

fn default_payment_delay() -> u64 {
    2000
}

fn default_onboarding_delay() -> u64 {
    2000
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            auth_delay_ms: default_auth_delay(),
            payment_delay_ms: default_payment_delay(),
            onboarding_delay_ms: default_onboarding_delay(),
        }
    }
}

impl SimulationSettings {
    /// No artificial latency at all.
    pub fn instant() -> Self {
        SimulationSettings {
            auth_delay_ms: 0,
            payment_delay_ms: 0,
            onboarding_delay_ms: 0,
        }
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn onboarding_delay(&self) -> Duration {
        Duration::from_millis(self.onboarding_delay_ms)
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl AppConfig {
    /// Defaults ← config file (if present) ← environment, then validated.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
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

    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> AppResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MICROSHOP_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(key) = std::env::var("MICROSHOP_STRIPE_PUBLISHABLE_KEY") {
            self.api.stripe_publishable_key = key;
        }

        if let Ok(path) = std::env::var("MICROSHOP_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(ms) = env_millis("MICROSHOP_PAYMENT_DELAY_MS") {
            self.simulation.payment_delay_ms = ms;
        }

        if let Some(ms) = env_millis("MICROSHOP_AUTH_DELAY_MS") {
            self.simulation.auth_delay_ms = ms;
            self.simulation.onboarding_delay_ms = ms;
        }
    }

    /// Client settings derived from `[api]`.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone())
            .stripe_publishable_key(self.api.stripe_publishable_key.clone())
            .timeout(Duration::from_secs(self.api.request_timeout_secs))
    }

    /// Database file: configured path, else the platform data directory
    /// (created if missing).
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".into()))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "microshop", "microshop")
}

fn env_millis(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            warn!(name, value = %raw, "Ignoring non-numeric delay");
            None
        }
    }
}

/// `$12.50` style price for listings, receipts and the CLI.
pub fn format_currency(cents: i64) -> String {
    Money::from_cents(cents).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.simulation.payment_delay_ms, 2000);
        assert_eq!(config.simulation.auth_delay_ms, 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.microshop.app"

            [simulation]
            payment_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.microshop.app");
        assert_eq!(config.simulation.payment_delay_ms, 0);
        assert_eq!(config.simulation.auth_delay_ms, 1500);
        assert_eq!(config.storage.database_path, None);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ws://localhost:3000".into();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let mut config = AppConfig::default();
        config.storage.database_path = Some(PathBuf::from("/tmp/x.db"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1250), "$12.50");
        assert_eq!(format_currency(0), "$0.00");
    }
}
