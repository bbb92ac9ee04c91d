//! HTTP API
//!
//! REST surface of the gateway: coin-market routes under `/api/v1/pump`,
//! tag-routed market data under `/api/v1/market`, and cookie management
//! under `/api/v1/cookies`.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
