//! Equity Market Port (Driven Port)
//!
//! Quotes, candles and session status for exchange-listed symbols.

use async_trait::async_trait;

use crate::domain::{CandleRecord, MarketStatus};

/// Equity source failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EquityError {
    /// Neither the quote nor the candle fallback produced a positive price.
    #[error("No price available for {symbol}")]
    NoPriceAvailable {
        /// Requested symbol.
        symbol: String,
    },

    /// The upstream answered but carried no usable rows.
    #[error("No data available for {symbol}: {reason}")]
    NoDataAvailable {
        /// Requested symbol.
        symbol: String,
        /// What the upstream reported.
        reason: String,
    },

    /// Transport failure or unexpected upstream status.
    #[error("Equity upstream unavailable: {message}")]
    UpstreamUnavailable {
        /// Error details.
        message: String,
    },
}

/// Port for an equity quote provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquityMarketPort: Send + Sync {
    /// Latest positive price, from the quote endpoint or the last daily close.
    async fn get_latest_price(&self, symbol: &str) -> Result<f64, EquityError>;

    /// The most recent `count` candles for `period`, in upstream order.
    async fn get_candles(
        &self,
        symbol: &str,
        period: &str,
        count: i64,
    ) -> Result<Vec<CandleRecord>, EquityError>;

    /// Approximate session status for `symbol` at the current time.
    fn market_status(&self, symbol: &str) -> MarketStatus;
}
