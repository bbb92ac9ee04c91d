//! Xueqiu adapter implementing `EquityMarketPort`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use super::api_types::{KlineData, KlineResponse, QuoteResponse};
use super::config::XueqiuConfig;
use super::error::XueqiuError;
use crate::application::ports::{EquityError, EquityMarketPort};
use crate::domain::{CandleRecord, MarketStatus, SessionState, UpstreamSource};
use crate::infrastructure::cookies::CookieStore;
use crate::infrastructure::metrics::{UpstreamOutcome, record_upstream_request};
use crate::infrastructure::session::{UpstreamSession, static_headers};

const BEIJING_OFFSET_SECS: i32 = 8 * 3600;
const ERROR_BODY_PREVIEW: usize = 200;

fn browser_headers() -> HeaderMap {
    static_headers(&[
        ("accept", "application/json, text/plain, */*"),
        ("accept-language", "en-US,en;q=0.9"),
        ("origin", "https://xueqiu.com"),
        ("priority", "u=1, i"),
        ("referer", "https://xueqiu.com/S/MSFT"),
        (
            "sec-ch-ua",
            "\"Microsoft Edge\";v=\"141\", \"Not?A_Brand\";v=\"8\", \"Chromium\";v=\"141\"",
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"macOS\""),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-site"),
        (
            "user-agent",
            concat!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36 Edg/141.0.0.0",
            ),
        ),
    ])
}

/// Kline period token for a caller period: `1d` is `day`, `1m` is `minute`,
/// anything else is sent as given.
#[must_use]
pub fn upstream_period(period: &str) -> &str {
    match period {
        "1d" => "day",
        "1m" => "minute",
        other => other,
    }
}

/// Session status at `now`, approximating US trading hours on the Beijing
/// clock (21:00 to 04:59). Not a trading calendar.
#[must_use]
pub fn market_status_at(symbol: &str, now: DateTime<Utc>) -> MarketStatus {
    let Some(beijing) = FixedOffset::east_opt(BEIJING_OFFSET_SECS) else {
        return MarketStatus::session(symbol, SessionState::Closed, now.fixed_offset());
    };
    let local = now.with_timezone(&beijing);
    let state = match local.hour() {
        21..=23 | 0..=4 => SessionState::Trading,
        _ => SessionState::Closed,
    };
    MarketStatus::session(symbol, state, local)
}

/// Xueqiu equity adapter.
#[derive(Debug)]
pub struct XueqiuClient {
    session: UpstreamSession,
    config: XueqiuConfig,
}

impl XueqiuClient {
    /// Create the adapter, reading the Xueqiu cookie from `cookies` on every
    /// call.
    pub fn new(config: XueqiuConfig, cookies: Arc<CookieStore>) -> Result<Self, reqwest::Error> {
        let session = UpstreamSession::new(UpstreamSource::Xueqiu, browser_headers(), cookies)?;
        Ok(Self { session, config })
    }

    /// GET `url` and decode a 200 body. Non-200 bodies are checked for the
    /// cookie-invalid code before being reported.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, XueqiuError> {
        let started = Instant::now();
        let result = self.send(url, query, timeout).await;
        let outcome = match &result {
            Ok(_) => UpstreamOutcome::Success,
            Err(XueqiuError::Network(_)) => UpstreamOutcome::Transport,
            Err(XueqiuError::JsonParse(_)) => UpstreamOutcome::Decode,
            Err(_) => UpstreamOutcome::HttpStatus,
        };
        record_upstream_request(UpstreamSource::Xueqiu, endpoint, outcome, started.elapsed());
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, XueqiuError> {
        let response = self
            .session
            .client()
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| XueqiuError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| XueqiuError::Network(e.to_string()))?;

        if !status.is_success() {
            let rejected = serde_json::from_str::<KlineResponse>(&text)
                .is_ok_and(|body| body.is_cookie_rejection());
            if rejected {
                return Err(XueqiuError::CookieRejected);
            }
            return Err(XueqiuError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| XueqiuError::JsonParse(e.to_string()))
    }

    async fn fetch_kline(
        &self,
        symbol: &str,
        period: &str,
        count: i64,
    ) -> Result<KlineData, XueqiuError> {
        let query = [
            ("symbol", symbol.to_string()),
            ("begin", Utc::now().timestamp_millis().to_string()),
            ("period", period.to_string()),
            ("type", "before".to_string()),
            ("count", (-count.saturating_abs()).to_string()),
            ("indicator", "kline".to_string()),
        ];
        tracing::debug!(symbol, period, count, "Requesting Xueqiu kline");

        let response: KlineResponse = self
            .get_json("kline", &self.config.kline_url(), &query, self.config.kline_timeout)
            .await?;
        response.into_rows()
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Option<f64>, XueqiuError> {
        let query = [("symbol", symbol.to_string()), ("extend", "detail".to_string())];
        let response: QuoteResponse = self
            .get_json("quote", &self.config.quote_url(), &query, self.config.quote_timeout)
            .await?;
        Ok(response.positive_current())
    }

    fn log_failure(symbol: &str, error: &XueqiuError) {
        match error {
            XueqiuError::CookieRejected => {
                tracing::error!(symbol, "Xueqiu rejected the cookie, it is invalid or expired");
            }
            XueqiuError::Empty | XueqiuError::Api { .. } => {
                tracing::warn!(symbol, error = %error, "Xueqiu returned no data");
            }
            _ => tracing::error!(symbol, error = %error, "Xueqiu request failed"),
        }
    }
}

#[async_trait]
impl EquityMarketPort for XueqiuClient {
    async fn get_latest_price(&self, symbol: &str) -> Result<f64, EquityError> {
        match self.fetch_quote(symbol).await {
            Ok(Some(price)) => {
                tracing::info!(symbol, price, "Price from Xueqiu quote");
                return Ok(price);
            }
            Ok(None) => tracing::warn!(symbol, "Xueqiu quote has no positive price"),
            Err(XueqiuError::CookieRejected) => tracing::error!(
                symbol,
                "Xueqiu rejected the cookie on the quote endpoint, falling back to kline"
            ),
            Err(e) => tracing::warn!(symbol, error = %e, "Xueqiu quote failed"),
        }

        let rows = match self.fetch_kline(symbol, "day", 1).await {
            Ok(rows) => rows,
            Err(e) => {
                Self::log_failure(symbol, &e);
                return match e.into_equity_error(symbol) {
                    unavailable @ EquityError::UpstreamUnavailable { .. } => Err(unavailable),
                    _ => Err(EquityError::NoPriceAvailable {
                        symbol: symbol.to_string(),
                    }),
                };
            }
        };

        match rows.latest_close().filter(|close| *close > 0.0) {
            Some(price) => {
                tracing::info!(symbol, price, "Price from Xueqiu daily close");
                Ok(price)
            }
            None => {
                tracing::error!(symbol, "No positive close in Xueqiu kline");
                Err(EquityError::NoPriceAvailable {
                    symbol: symbol.to_string(),
                })
            }
        }
    }

    async fn get_candles(
        &self,
        symbol: &str,
        period: &str,
        count: i64,
    ) -> Result<Vec<CandleRecord>, EquityError> {
        self.fetch_kline(symbol, upstream_period(period), count)
            .await
            .map(|rows| rows.candles())
            .map_err(|e| {
                Self::log_failure(symbol, &e);
                e.into_equity_error(symbol)
            })
    }

    fn market_status(&self, symbol: &str) -> MarketStatus {
        market_status_at(symbol, Utc::now())
    }
}
