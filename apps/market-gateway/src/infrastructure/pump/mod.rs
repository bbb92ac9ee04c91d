//! Pump.fun Coin-Market Adapter
//!
//! Implements `CoinMarketPort` against the pump.fun frontend API. Failures
//! never reach the caller: they become empty lists, `None`, or `0.0`, except
//! for the upstream's 530 status, which hands over to a degradation policy.

mod api_types;
mod client;
mod config;
mod error;
mod fallback;

pub use api_types::normalize_coin_list;
pub use client::PumpClient;
pub use config::PumpConfig;
pub use error::PumpError;
pub use fallback::{DegradationPolicy, DisabledFallback, SyntheticCoinFallback, UNAVAILABLE_STATUS};
