//! Xueqiu adapter configuration.

use std::time::Duration;

/// Public Xueqiu stock API host.
pub const DEFAULT_BASE_URL: &str = "https://stock.xueqiu.com";

/// Configuration for the Xueqiu adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XueqiuConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Timeout for the quote endpoint.
    pub quote_timeout: Duration,
    /// Timeout for the kline endpoint.
    pub kline_timeout: Duration,
}

impl Default for XueqiuConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            quote_timeout: Duration::from_secs(10),
            kline_timeout: Duration::from_secs(15),
        }
    }
}

impl XueqiuConfig {
    /// Point the adapter at another host (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Quote endpoint URL.
    #[must_use]
    pub fn quote_url(&self) -> String {
        format!("{}/v5/stock/quote.json", self.base_url)
    }

    /// Kline endpoint URL.
    #[must_use]
    pub fn kline_url(&self) -> String {
        format!("{}/v5/stock/chart/kline.json", self.base_url)
    }
}
