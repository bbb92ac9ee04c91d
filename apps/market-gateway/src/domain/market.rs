//! Market tags, upstream sources, and market status.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Tag value selecting the coin-market upstream.
pub const COIN_MARKET_TAG: &str = "PUMP";

/// Which upstream answers a request.
///
/// `"PUMP"` (any case, no surrounding whitespace) selects the coin market.
/// Every other value is an equity exchange code and is kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketTag {
    /// Meme-coin market (pump.fun).
    CoinMarket,
    /// Equity market addressed by an exchange code (e.g. "US", "HK").
    Equity(String),
}

impl MarketTag {
    /// Parse a market tag. Never fails.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case(COIN_MARKET_TAG) {
            Self::CoinMarket
        } else {
            Self::Equity(tag.to_string())
        }
    }

    /// Check if this tag selects the coin market.
    #[must_use]
    pub const fn is_coin_market(&self) -> bool {
        matches!(self, Self::CoinMarket)
    }
}

impl std::fmt::Display for MarketTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoinMarket => f.write_str(COIN_MARKET_TAG),
            Self::Equity(code) => f.write_str(code),
        }
    }
}

/// Upstream data provider. One cookie slot exists per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamSource {
    /// pump.fun coin-market API.
    PumpFun,
    /// Xueqiu equity quote API.
    Xueqiu,
}

impl UpstreamSource {
    /// All known sources.
    pub const ALL: [Self; 2] = [Self::PumpFun, Self::Xueqiu];

    /// Stable name used in URLs, metrics labels, and config keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PumpFun => "pump_fun",
            Self::Xueqiu => "xueqiu",
        }
    }

    /// Parse a source name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trading session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Always-open market.
    Open,
    /// Inside the approximated exchange session.
    Trading,
    /// Outside the approximated exchange session.
    Closed,
}

/// Market status as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    /// Session state.
    pub market_status: SessionState,
    /// Market display name (always-open markets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
    /// Trading hours description (always-open markets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_hours: Option<String>,
    /// Symbol the status was computed for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Epoch milliseconds when the status was computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Exchange-local time when the status was computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<DateTime<FixedOffset>>,
}

impl MarketStatus {
    /// The fixed status of the coin market, which trades 24/7.
    #[must_use]
    pub fn always_open() -> Self {
        Self {
            market_status: SessionState::Open,
            market_name: Some("coin-market".to_string()),
            trading_hours: Some("24/7".to_string()),
            symbol: None,
            timestamp: None,
            current_time: None,
        }
    }

    /// A session-based status for an equity symbol.
    #[must_use]
    pub fn session(symbol: &str, state: SessionState, at: DateTime<FixedOffset>) -> Self {
        Self {
            market_status: state,
            market_name: None,
            trading_hours: None,
            symbol: Some(symbol.to_string()),
            timestamp: Some(at.timestamp_millis()),
            current_time: Some(at),
        }
    }

    /// Check if this is the always-open coin-market constant.
    #[must_use]
    pub fn is_always_open(&self) -> bool {
        *self == Self::always_open()
    }
}
