//! HTTP Request Types
//!
//! Query strings and bodies accepted by the gateway routes. Numeric
//! parameters are read as signed integers so out-of-range values reach
//! validation and produce a 422 rather than a deserialization error.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{CoinListQuery, CoinSort, SortOrder};

/// A query parameter outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending parameter.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<u32, ValidationError> {
    if (min..=max).contains(&value) {
        u32::try_from(value).map_err(|_| ValidationError {
            field,
            message: format!("must be between {min} and {max}"),
        })
    } else {
        Err(ValidationError {
            field,
            message: format!("must be between {min} and {max}, got {value}"),
        })
    }
}

fn check_offset(value: i64) -> Result<u32, ValidationError> {
    check_range("offset", value, 0, i64::from(u32::MAX))
}

const fn default_coin_limit() -> i64 {
    50
}

const fn default_trade_limit() -> i64 {
    100
}

const fn default_short_limit() -> i64 {
    20
}

const fn default_candle_count() -> i64 {
    100
}

fn default_period() -> String {
    "1d".to_string()
}

// =============================================================================
// Coin Market
// =============================================================================

/// Query for `GET /api/v1/pump/coins`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinListParams {
    /// Page size.
    #[serde(default = "default_coin_limit")]
    pub limit: i64,
    /// Page offset.
    #[serde(default)]
    pub offset: i64,
    /// Sort field.
    #[serde(default)]
    pub sort: CoinSort,
    /// Sort direction.
    #[serde(default)]
    pub order: SortOrder,
    /// Include NSFW coins.
    #[serde(default)]
    pub include_nsfw: bool,
}

impl CoinListParams {
    /// Validate into a listing query. Limit 1 to 100, offset non-negative.
    pub fn into_query(self) -> Result<CoinListQuery, ValidationError> {
        Ok(CoinListQuery {
            limit: check_range("limit", self.limit, 1, 100)?,
            offset: check_offset(self.offset)?,
            sort: self.sort,
            order: self.order,
            include_nsfw: self.include_nsfw,
        })
    }
}

/// Query for `GET /api/v1/pump/coins/{mint}/trades`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeParams {
    /// Page size.
    #[serde(default = "default_trade_limit")]
    pub limit: i64,
    /// Page offset.
    #[serde(default)]
    pub offset: i64,
}

impl TradeParams {
    /// Validated `(limit, offset)`. Limit 1 to 500.
    pub fn validate(&self) -> Result<(u32, u32), ValidationError> {
        Ok((
            check_range("limit", self.limit, 1, 500)?,
            check_offset(self.offset)?,
        ))
    }
}

/// Query for the trending, new and top listings.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitParams {
    /// Number of coins.
    #[serde(default = "default_short_limit")]
    pub limit: i64,
}

impl LimitParams {
    /// Validated limit, 1 to 50.
    pub fn validate(&self) -> Result<u32, ValidationError> {
        check_range("limit", self.limit, 1, 50)
    }
}

/// Query for `GET /api/v1/pump/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Search text.
    #[serde(default)]
    pub q: Option<String>,
    /// Maximum matches.
    #[serde(default = "default_short_limit")]
    pub limit: i64,
}

impl SearchParams {
    /// Validated `(query, limit)`. The query must be 1 to 100 characters.
    pub fn validate(self) -> Result<(String, u32), ValidationError> {
        let limit = check_range("limit", self.limit, 1, 50)?;
        let query = self.q.unwrap_or_default();
        let len = query.chars().count();
        if !(1..=100).contains(&len) {
            return Err(ValidationError {
                field: "q",
                message: format!("must be 1 to 100 characters, got {len}"),
            });
        }
        Ok((query, limit))
    }
}

// =============================================================================
// Market Data
// =============================================================================

/// Query for `GET /api/v1/market/{market}/{symbol}/candles`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleParams {
    /// Candle period, e.g. `1d` or `1m`.
    #[serde(default = "default_period")]
    pub period: String,
    /// Number of candles.
    #[serde(default = "default_candle_count")]
    pub count: i64,
}

impl CandleParams {
    /// Validated count, 1 to 1000.
    pub fn validate(&self) -> Result<i64, ValidationError> {
        check_range("count", self.count, 1, 1000).map(i64::from)
    }
}

// =============================================================================
// Cookies
// =============================================================================

/// Body for `PUT /api/v1/cookies/{source}`. A blank cookie clears the slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieUpdateRequest {
    /// Raw cookie string.
    pub cookie: String,
}
