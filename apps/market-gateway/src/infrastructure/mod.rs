//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer.
//!
//! - **Driven Adapters (Outbound)**
//!   - `pump/`: pump.fun coin-market client
//!   - `xueqiu/`: Xueqiu equity client
//!   - `session`: cookie-aware HTTP session shared by both clients
//!   - `cookies/`: cookie parsing, storage and startup resolution
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! - **Cross-cutting**
//!   - `config/`: environment settings and the JSON config store
//!   - `metrics/`: Prometheus recorder and upstream metrics

pub mod config;
pub mod cookies;
pub mod http;
pub mod metrics;
pub mod pump;
pub mod session;
pub mod xueqiu;
