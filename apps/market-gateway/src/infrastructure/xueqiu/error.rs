//! Xueqiu-specific error types.

use thiserror::Error;

use crate::application::ports::EquityError;

/// Upstream error code meaning the session cookie is invalid or expired.
pub const COOKIE_INVALID_CODE: &str = "400016";

/// Errors from the Xueqiu adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XueqiuError {
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

    /// Upstream rejected the session cookie.
    #[error("Cookie invalid or expired (error_code {COOKIE_INVALID_CODE})")]
    CookieRejected,

    /// Body was not the expected JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// 200 response carrying an error code.
    #[error("API error {code}: {description}")]
    Api {
        /// Upstream error code.
        code: String,
        /// Upstream error description.
        description: String,
    },

    /// 200 response with no rows.
    #[error("empty kline data")]
    Empty,
}

impl XueqiuError {
    /// Convert into the port error for `symbol`.
    #[must_use]
    pub fn into_equity_error(self, symbol: &str) -> EquityError {
        match self {
            Self::Api { .. } | Self::Empty => EquityError::NoDataAvailable {
                symbol: symbol.to_string(),
                reason: self.to_string(),
            },
            Self::Network(_) | Self::Status { .. } | Self::CookieRejected | Self::JsonParse(_) => {
                EquityError::UpstreamUnavailable {
                    message: self.to_string(),
                }
            }
        }
    }
}
