//! Coin Market Port (Driven Port)
//!
//! Every operation degrades instead of failing: an unreachable or erroring
//! upstream yields an empty list, `None`, or `0.0`. Callers cannot tell
//! "no results" from "upstream down".

use async_trait::async_trait;

use crate::domain::{CoinListQuery, CoinRecord, TradeRecord};

/// Port for a coin-market data provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoinMarketPort: Send + Sync {
    /// One page of coins. Empty on failure.
    async fn list_coins(&self, query: CoinListQuery) -> Vec<CoinRecord>;

    /// A single coin by mint address. `None` on failure or not found.
    async fn get_coin(&self, mint_address: &str) -> Option<CoinRecord>;

    /// Trades for a coin. Empty on failure.
    async fn get_trades(&self, mint_address: &str, limit: u32, offset: u32) -> Vec<TradeRecord>;

    /// Price implied by market cap over supply. `0.0` when unresolvable.
    async fn derive_price(&self, mint_address: &str) -> f64;
}
