//! Pump.fun-specific error types.
//!
//! These never leave the adapter; they drive logging, metrics and the
//! degradation decision.

use thiserror::Error;

use super::fallback::UNAVAILABLE_STATUS;

/// Errors from a pump.fun request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PumpError {
    /// Connect, timeout or body read failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-200 response.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Body was not JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Base URL cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl PumpError {
    /// Check if this is the recognized "unavailable" status.
    #[must_use]
    pub const fn is_unavailable_status(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == UNAVAILABLE_STATUS)
    }
}
