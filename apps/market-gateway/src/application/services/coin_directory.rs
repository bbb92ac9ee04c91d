//! Coin Directory
//!
//! Curated listings (trending, new, top) and text search over the coin
//! market. Like the port underneath, nothing here fails: an unavailable
//! upstream produces empty results.

use std::sync::Arc;

use crate::application::ports::CoinMarketPort;
use crate::domain::{CoinListQuery, CoinRecord, CoinSort, filter_coins};

/// Number of coins fetched as the candidate pool for a search.
pub const SEARCH_POOL_SIZE: u32 = 200;

/// Listing and search operations over a coin-market source.
pub struct CoinDirectory<C: CoinMarketPort> {
    coins: Arc<C>,
}

impl<C: CoinMarketPort> CoinDirectory<C> {
    /// Create a directory over `coins`.
    pub const fn new(coins: Arc<C>) -> Self {
        Self { coins }
    }

    /// Most recently traded coins.
    pub async fn trending(&self, limit: u32) -> Vec<CoinRecord> {
        self.coins
            .list_coins(CoinListQuery::top(limit, CoinSort::LastTradeTimestamp))
            .await
    }

    /// Most recently created coins.
    pub async fn newest(&self, limit: u32) -> Vec<CoinRecord> {
        self.coins
            .list_coins(CoinListQuery::top(limit, CoinSort::CreatedTimestamp))
            .await
    }

    /// Coins with the largest market cap.
    pub async fn top(&self, limit: u32) -> Vec<CoinRecord> {
        self.coins
            .list_coins(CoinListQuery::top(limit, CoinSort::MarketCap))
            .await
    }

    /// Coins whose name, symbol or description contains `query`.
    pub async fn search(&self, query: &str, limit: u32) -> Vec<CoinRecord> {
        let pool = self
            .coins
            .list_coins(CoinListQuery {
                limit: SEARCH_POOL_SIZE,
                ..CoinListQuery::default()
            })
            .await;
        let found = filter_coins(pool, query, limit as usize);
        tracing::debug!(query, matches = found.len(), "Coin search");
        found
    }
}
