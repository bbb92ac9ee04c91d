//! Domain Layer
//!
//! Pure market data types with no I/O. Upstream adapters produce these
//! records; the route layer serializes them.

pub mod market;
pub mod numeric;
pub mod records;
pub mod search;

pub use market::{MarketStatus, MarketTag, SessionState, UpstreamSource};
pub use records::{
    CandleRecord, CoinListQuery, CoinRecord, CoinSort, QuoteRecord, SortOrder, TradeRecord,
};
pub use search::filter_coins;
