//! Pump.fun adapter configuration.

use std::time::Duration;

/// Public pump.fun frontend API host.
pub const DEFAULT_API_BASE: &str = "https://frontend-api.pump.fun";

/// Configuration for the pump.fun adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpConfig {
    /// API base URL, without a trailing slash.
    pub api_base: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Serve synthetic coins when the upstream answers 530.
    pub fallback_enabled: bool,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            fallback_enabled: true,
        }
    }
}

impl PumpConfig {
    /// Point the adapter at another host (tests, proxies).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable the synthetic fallback.
    #[must_use]
    pub const fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }
}
