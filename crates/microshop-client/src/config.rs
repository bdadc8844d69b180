//! # Client Configuration
//!
//! Where the backend lives and the payment-processor constants shared by
//! every screen. The app fills this from its own config layers; the
//! defaults match a developer running the backend locally.

use std::time::Duration;

use microshop_core::PLATFORM_FEE_BPS;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend origin, optionally with a path prefix.
    pub base_url: String,

    /// Publishable (client-side) payment key. Empty when unset.
    pub stripe_publishable_key: String,

    /// Platform fee in basis points.
    pub platform_fee_bps: u32,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            stripe_publishable_key: String::new(),
            platform_fee_bps: PLATFORM_FEE_BPS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn stripe_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.stripe_publishable_key = key.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fee as a fraction (0.05 for 500 bps), for display.
    pub fn platform_fee_percent(&self) -> f64 {
        self.platform_fee_bps as f64 / 10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.stripe_publishable_key.is_empty());
        assert!((config.platform_fee_percent() - 0.05).abs() < f64::EPSILON);
    }
}
