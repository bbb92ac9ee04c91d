//! Application Layer
//!
//! Ports describe the upstream sources the gateway depends on; services
//! compose them into the operations the route layer exposes.

pub mod ports;
pub mod services;
