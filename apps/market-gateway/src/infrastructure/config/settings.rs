//! Gateway Configuration Settings
//!
//! Loaded from environment variables. Every setting has a default, and
//! unparseable numbers or flags fall back to it. Values are read through a
//! lookup function so tests can supply a map instead of the process
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::UpstreamSource;
use crate::infrastructure::cookies::CookieSources;
use crate::infrastructure::pump::PumpConfig;
use crate::infrastructure::xueqiu::XueqiuConfig;

/// Inbound server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// HTTP API port.
    pub http_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { http_port: 8000 }
    }
}

/// Startup cookie locations per source.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// pump.fun cookie file and env value.
    pub pump: CookieSources,
    /// Xueqiu cookie file and env value.
    pub xueqiu: CookieSources,
}

impl CookieSettings {
    /// Locations for `source`.
    #[must_use]
    pub const fn for_source(&self, source: UpstreamSource) -> &CookieSources {
        match source {
            UpstreamSource::PumpFun => &self.pump,
            UpstreamSource::Xueqiu => &self.xueqiu,
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server settings.
    pub server: ServerSettings,
    /// pump.fun adapter settings.
    pub pump: PumpConfig,
    /// Xueqiu adapter settings.
    pub xueqiu: XueqiuConfig,
    /// Startup cookie locations.
    pub cookies: CookieSettings,
    /// Path of the persisted JSON config store.
    pub config_store_path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A base URL is not an http(s) URL.
    #[error("environment variable {key} must be an http(s) URL, got {value:?}")]
    InvalidUrl {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let pump_defaults = PumpConfig::default();
        let pump = PumpConfig {
            timeout: env.duration_secs("PUMP_TIMEOUT_SECS", pump_defaults.timeout),
            ..pump_defaults.clone()
        }
        .with_api_base(env.url("PUMP_API_BASE", &pump_defaults.api_base)?)
        .with_fallback(env.flag("PUMP_FALLBACK_ENABLED", pump_defaults.fallback_enabled));

        let xueqiu_defaults = XueqiuConfig::default();
        let xueqiu = XueqiuConfig {
            quote_timeout: env
                .duration_secs("XUEQIU_QUOTE_TIMEOUT_SECS", xueqiu_defaults.quote_timeout),
            kline_timeout: env
                .duration_secs("XUEQIU_KLINE_TIMEOUT_SECS", xueqiu_defaults.kline_timeout),
            ..xueqiu_defaults.clone()
        }
        .with_base_url(env.url("XUEQIU_BASE_URL", &xueqiu_defaults.base_url)?);

        let cookies = CookieSettings {
            pump: CookieSources {
                file: env.path("PUMP_COOKIE_FILE", "config/pump_cookies.txt"),
                env_value: env.text("PUMP_FUN_COOKIE"),
            },
            xueqiu: CookieSources {
                file: env.path("XUEQIU_COOKIE_FILE", "config/xueqiu_cookies.txt"),
                env_value: env.text("XUEQIU_COOKIE"),
            },
        };

        Ok(Self {
            server: ServerSettings {
                http_port: env.parse("HTTP_PORT", ServerSettings::default().http_port),
            },
            pump,
            xueqiu,
            cookies,
            config_store_path: env.path("CONFIG_STORE_PATH", "config/system_config.json"),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn text(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        self.text(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn duration_secs(&self, key: &str, default: Duration) -> Duration {
        self.text(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(default, Duration::from_secs)
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        match self.text(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("true" | "1" | "yes" | "on") => true,
            Some("false" | "0" | "no" | "off") => false,
            _ => default,
        }
    }

    fn path(&self, key: &str, default: &str) -> PathBuf {
        PathBuf::from(self.text(key).unwrap_or_else(|| default.to_string()))
    }

    fn url(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        let Some(value) = self.text(key) else {
            return Ok(default.to_string());
        };
        let value = value.trim().to_string();
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(value)
        } else {
            Err(ConfigError::InvalidUrl {
                key: key.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.pump.api_base, "https://frontend-api.pump.fun");
        assert_eq!(config.pump.timeout, Duration::from_secs(30));
        assert!(config.pump.fallback_enabled);
        assert_eq!(config.xueqiu.base_url, "https://stock.xueqiu.com");
        assert_eq!(config.xueqiu.quote_timeout, Duration::from_secs(10));
        assert_eq!(config.xueqiu.kline_timeout, Duration::from_secs(15));
        assert_eq!(config.cookies.pump.file, PathBuf::from("config/pump_cookies.txt"));
        assert_eq!(config.cookies.xueqiu.env_value, None);
        assert_eq!(config.config_store_path, PathBuf::from("config/system_config.json"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config(&[
            ("HTTP_PORT", "9100"),
            ("PUMP_API_BASE", "http://localhost:4000/"),
            ("PUMP_TIMEOUT_SECS", "5"),
            ("PUMP_FALLBACK_ENABLED", "off"),
            ("XUEQIU_KLINE_TIMEOUT_SECS", "3"),
            ("XUEQIU_COOKIE", "xq_a_token=abc"),
            ("XUEQIU_COOKIE_FILE", "/etc/gateway/xq.txt"),
        ])
        .unwrap();

        assert_eq!(config.server.http_port, 9100);
        assert_eq!(config.pump.api_base, "http://localhost:4000");
        assert_eq!(config.pump.timeout, Duration::from_secs(5));
        assert!(!config.pump.fallback_enabled);
        assert_eq!(config.xueqiu.kline_timeout, Duration::from_secs(3));
        assert_eq!(
            config.cookies.for_source(UpstreamSource::Xueqiu).env_value.as_deref(),
            Some("xq_a_token=abc")
        );
        assert_eq!(config.cookies.xueqiu.file, PathBuf::from("/etc/gateway/xq.txt"));
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = config(&[
            ("HTTP_PORT", "eighty"),
            ("PUMP_TIMEOUT_SECS", "-1"),
            ("PUMP_FALLBACK_ENABLED", "maybe"),
        ])
        .unwrap();
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.pump.timeout, Duration::from_secs(30));
        assert!(config.pump.fallback_enabled);
    }

    #[test]
    fn blank_cookie_env_is_unset() {
        let config = config(&[("PUMP_FUN_COOKIE", "  ")]).unwrap();
        assert_eq!(config.cookies.pump.env_value, None);
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = config(&[("XUEQIU_BASE_URL", "stock.xueqiu.com")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidUrl {
                key: "XUEQIU_BASE_URL".to_string(),
                value: "stock.xueqiu.com".to_string(),
            }
        );
    }
}
