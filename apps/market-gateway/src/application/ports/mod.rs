//! Application Ports (Driven)
//!
//! - `EquityMarketPort`: quotes and candles for exchange-listed symbols
//! - `CoinMarketPort`: listings, trades and implied prices on the coin market
//! - `ConfigStore`: persisted key/value settings

mod coin_market_port;
mod config_store_port;
mod equity_market_port;

pub use coin_market_port::CoinMarketPort;
pub use config_store_port::{ConfigStore, EmptyConfigStore};
pub use equity_market_port::{EquityError, EquityMarketPort};

#[cfg(test)]
pub use coin_market_port::MockCoinMarketPort;
#[cfg(test)]
pub use equity_market_port::MockEquityMarketPort;
