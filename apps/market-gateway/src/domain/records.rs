//! Normalized market data records.
//!
//! Every record is built per request and dropped once the response is sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::numeric::{
    lenient_bool, lenient_f64, lenient_i64, lenient_opt_string, string_or_default,
};

/// Supply assumed for a coin whose upstream record omits `total_supply`.
pub const DEFAULT_TOTAL_SUPPLY: f64 = 1_000_000_000.0;

/// Latest price for a symbol on a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Symbol or mint address.
    pub symbol: String,
    /// Market tag the price was resolved through.
    pub market: String,
    /// Latest price, always positive.
    pub price: f64,
    /// When the price was resolved.
    pub timestamp: DateTime<Utc>,
}

/// One OHLCV bucket. Fields the upstream omits stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    /// Bucket start in epoch milliseconds.
    pub timestamp: Option<i64>,
    /// Bucket start as a UTC datetime, derived from `timestamp`.
    pub datetime: Option<DateTime<Utc>>,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
    /// Traded amount (turnover).
    pub amount: Option<f64>,
    /// Absolute price change.
    pub change: Option<f64>,
    /// Percentage price change.
    pub change_percent: Option<f64>,
}

/// A coin listed on the coin market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Mint address, unique within the coin market.
    #[serde(rename = "mint")]
    pub mint_address: String,
    /// Display name.
    #[serde(default, deserialize_with = "string_or_default")]
    pub name: String,
    /// Ticker symbol.
    #[serde(default, deserialize_with = "string_or_default")]
    pub symbol: String,
    /// Free-form description.
    #[serde(default, deserialize_with = "string_or_default")]
    pub description: String,
    /// Image URL. Non-string values are dropped.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub image_uri: Option<String>,
    /// Market capitalization in USD.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd_market_cap: Option<f64>,
    /// Total token supply.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_supply: Option<f64>,
    /// Creation time (upstream units).
    #[serde(default, deserialize_with = "lenient_i64")]
    pub created_timestamp: Option<i64>,
    /// Last trade time (upstream units).
    #[serde(default, deserialize_with = "lenient_i64")]
    pub last_trade_timestamp: Option<i64>,
    /// Flagged as not safe for work.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub nsfw: bool,
    /// Bonding curve completed.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub complete: bool,
}

impl CoinRecord {
    /// Price implied by market cap over supply.
    ///
    /// Returns `None` when the market cap is missing or the supply is not
    /// positive. A missing supply counts as [`DEFAULT_TOTAL_SUPPLY`].
    #[must_use]
    pub fn implied_price(&self) -> Option<f64> {
        let market_cap = self.usd_market_cap?;
        let supply = self.total_supply.unwrap_or(DEFAULT_TOTAL_SUPPLY);
        (supply > 0.0).then(|| market_cap / supply)
    }
}

/// An upstream trade entry, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(pub Value);

/// Sort field for coin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSort {
    /// Most recently traded.
    #[default]
    LastTradeTimestamp,
    /// Market capitalization.
    MarketCap,
    /// Creation time.
    CreatedTimestamp,
}

impl CoinSort {
    /// Upstream query value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LastTradeTimestamp => "last_trade_timestamp",
            Self::MarketCap => "market_cap",
            Self::CreatedTimestamp => "created_timestamp",
        }
    }
}

/// Sort direction for coin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Upstream query value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Parameters for a coin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinListQuery {
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
    /// Sort field.
    pub sort: CoinSort,
    /// Sort direction.
    pub order: SortOrder,
    /// Include NSFW coins.
    pub include_nsfw: bool,
}

impl Default for CoinListQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            sort: CoinSort::default(),
            order: SortOrder::default(),
            include_nsfw: false,
        }
    }
}

impl CoinListQuery {
    /// First page of `limit` coins sorted by `sort` descending.
    #[must_use]
    pub fn top(limit: u32, sort: CoinSort) -> Self {
        Self {
            limit,
            sort,
            order: SortOrder::Desc,
            ..Self::default()
        }
    }
}
