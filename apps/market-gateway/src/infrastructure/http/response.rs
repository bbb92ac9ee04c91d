//! HTTP response DTOs.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::request::ValidationError;
use crate::application::ports::EquityError;
use crate::application::services::{RouterError, SourceFailure};

/// List payload with paging echo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Items.
    pub data: Vec<T>,
    /// Number of items in `data`.
    pub count: usize,
    /// Requested page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Requested page offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Search text, for search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl<T> ListResponse<T> {
    /// Wrap `data` with its count.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            limit: None,
            offset: None,
            query: None,
        }
    }

    /// Echo the paging parameters.
    #[must_use]
    pub const fn paged(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Echo the search text.
    #[must_use]
    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }
}

/// Single-item payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// The item.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wrap `data`.
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Price of a coin-market token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPriceResponse {
    /// Mint address.
    pub mint_address: String,
    /// Derived price.
    pub price: f64,
    /// Always `PUMP`.
    pub market: String,
}

/// Cookie slot state. Never carries the cookie itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieStatusResponse {
    /// Source name.
    pub source: String,
    /// Whether a parseable cookie is stored.
    pub configured: bool,
    /// Number of cookie pairs stored.
    pub cookie_count: usize,
    /// Slot generation, bumped on every update.
    pub generation: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Whether a pump.fun cookie is configured.
    pub pump_cookie_configured: bool,
    /// Whether a Xueqiu cookie is configured.
    pub xueqiu_cookie_configured: bool,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub detail: String,
}

/// Error returned by route handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// 404 with `detail`.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    /// Status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: err.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        let status = match err.cause() {
            SourceFailure::Equity(EquityError::UpstreamUnavailable { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            SourceFailure::Equity(
                EquityError::NoPriceAvailable { .. } | EquityError::NoDataAvailable { .. },
            )
            | SourceFailure::NonPositivePrice { .. } => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}
