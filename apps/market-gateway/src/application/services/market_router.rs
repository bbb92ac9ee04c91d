//! Market Router
//!
//! Chooses the coin-market or the equity source from a market tag and turns
//! source failures into one error type. The coin-market source never fails
//! on its own, so a price that is not positive is treated as a failure here,
//! whichever source produced it.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::application::ports::{CoinMarketPort, EquityError, EquityMarketPort};
use crate::domain::{CandleRecord, MarketStatus, MarketTag, QuoteRecord};

/// Why a source could not answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceFailure {
    /// The equity source failed.
    #[error(transparent)]
    Equity(#[from] EquityError),

    /// The coin-market source derived a zero or negative price.
    #[error("derived price {price} is not positive")]
    NonPositivePrice {
        /// The derived value.
        price: f64,
    },
}

/// Router error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    /// No usable price for the symbol.
    #[error("Price unavailable for {symbol} on {market}: {cause}")]
    PriceUnavailable {
        /// Market tag as requested.
        market: String,
        /// Requested symbol.
        symbol: String,
        /// Underlying failure.
        #[source]
        cause: SourceFailure,
    },

    /// No candles for the symbol.
    #[error("Candles unavailable for {symbol} on {market}: {cause}")]
    CandlesUnavailable {
        /// Market tag as requested.
        market: String,
        /// Requested symbol.
        symbol: String,
        /// Underlying failure.
        #[source]
        cause: SourceFailure,
    },
}

impl RouterError {
    /// The underlying source failure.
    #[must_use]
    pub const fn cause(&self) -> &SourceFailure {
        match self {
            Self::PriceUnavailable { cause, .. } | Self::CandlesUnavailable { cause, .. } => cause,
        }
    }
}

/// Dispatches market requests to the source selected by the market tag.
pub struct MarketRouter<E, C>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    equity: Arc<E>,
    coins: Arc<C>,
}

impl<E, C> MarketRouter<E, C>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    /// Create a router over the two sources.
    pub const fn new(equity: Arc<E>, coins: Arc<C>) -> Self {
        Self { equity, coins }
    }

    /// Latest positive price for `symbol` on `market`.
    pub async fn get_last_price(&self, symbol: &str, market: &str) -> Result<f64, RouterError> {
        let result = match MarketTag::parse(market) {
            MarketTag::CoinMarket => Ok(self.coins.derive_price(symbol).await),
            MarketTag::Equity(_) => self
                .equity
                .get_latest_price(symbol)
                .await
                .map_err(SourceFailure::from),
        }
        .and_then(|price| {
            if price > 0.0 {
                Ok(price)
            } else {
                Err(SourceFailure::NonPositivePrice { price })
            }
        });

        result.map_err(|cause| {
            tracing::warn!(symbol, market, error = %cause, "Price lookup failed");
            RouterError::PriceUnavailable {
                market: market.to_string(),
                symbol: symbol.to_string(),
                cause,
            }
        })
    }

    /// Latest price wrapped as a quote stamped with the current time.
    pub async fn get_quote(&self, symbol: &str, market: &str) -> Result<QuoteRecord, RouterError> {
        let price = self.get_last_price(symbol, market).await?;
        Ok(QuoteRecord {
            symbol: symbol.to_string(),
            market: market.to_string(),
            price,
            timestamp: Utc::now(),
        })
    }

    /// Candles for `symbol`. The coin market has none and yields an empty list.
    pub async fn get_candles(
        &self,
        symbol: &str,
        market: &str,
        period: &str,
        count: i64,
    ) -> Result<Vec<CandleRecord>, RouterError> {
        match MarketTag::parse(market) {
            MarketTag::CoinMarket => Ok(Vec::new()),
            MarketTag::Equity(_) => self
                .equity
                .get_candles(symbol, period, count)
                .await
                .map_err(|e| {
                    tracing::warn!(symbol, market, period, error = %e, "Candle lookup failed");
                    RouterError::CandlesUnavailable {
                        market: market.to_string(),
                        symbol: symbol.to_string(),
                        cause: e.into(),
                    }
                }),
        }
    }

    /// Session status. The coin market is always open.
    pub fn get_market_status(&self, symbol: &str, market: &str) -> MarketStatus {
        match MarketTag::parse(market) {
            MarketTag::CoinMarket => MarketStatus::always_open(),
            MarketTag::Equity(_) => self.equity.market_status(symbol),
        }
    }
}
