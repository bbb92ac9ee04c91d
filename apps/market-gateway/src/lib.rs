// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Market Gateway - Rust Core Library
//!
//! HTTP gateway that proxies a meme-coin market (pump.fun) and an equity
//! quote service (Xueqiu) behind one normalized JSON API.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Normalized records and market tags, no I/O
//!   - `market`: `MarketTag`, `UpstreamSource`, `MarketStatus`
//!   - `records`: quote, candle, coin and trade records
//!   - `numeric`: lenient parsing of upstream numbers
//!   - `search`: text filter over coin listings
//!
//! - **Application**: Ports and services
//!   - `ports`: `EquityMarketPort`, `CoinMarketPort`, `ConfigStore`
//!   - `services`: `MarketRouter`, `CoinDirectory`
//!
//! - **Infrastructure**: Adapters
//!   - `pump`, `xueqiu`: upstream clients
//!   - `cookies`, `session`: cookie storage and cookie-aware HTTP sessions
//!   - `http`: axum routes
//!   - `config`, `metrics`: settings and Prometheus

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Hexagonal Layers
// =============================================================================

/// Domain layer - Market data types with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Upstream clients, HTTP API and configuration.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{CoinMarketPort, EquityError, EquityMarketPort};
pub use application::services::{CoinDirectory, MarketRouter, RouterError};
pub use domain::{
    CandleRecord, CoinRecord, MarketStatus, MarketTag, QuoteRecord, TradeRecord, UpstreamSource,
};
pub use infrastructure::config::GatewayConfig;
pub use infrastructure::cookies::CookieStore;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::pump::PumpClient;
pub use infrastructure::xueqiu::XueqiuClient;
