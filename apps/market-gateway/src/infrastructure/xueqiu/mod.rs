//! Xueqiu Equity Adapter
//!
//! Implements `EquityMarketPort` against the Xueqiu stock API:
//! - Quote endpoint first, daily kline close as the fallback price
//! - Column/row kline projection into candle records
//! - Coarse session status from the Beijing wall clock

mod api_types;
mod client;
mod config;
mod error;

pub use client::{XueqiuClient, market_status_at, upstream_period};
pub use config::XueqiuConfig;
pub use error::XueqiuError;
