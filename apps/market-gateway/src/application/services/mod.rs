//! Application Services
//!
//! `MarketRouter` dispatches price, candle and status requests by market tag.
//! `CoinDirectory` builds curated coin listings and search on top of the
//! coin-market port.

mod coin_directory;
mod market_router;

pub use coin_directory::{CoinDirectory, SEARCH_POOL_SIZE};
pub use market_router::{MarketRouter, RouterError, SourceFailure};
