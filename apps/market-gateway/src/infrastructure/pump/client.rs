//! Pump.fun adapter implementing `CoinMarketPort`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::HeaderMap;
use serde_json::Value;

use super::api_types::{normalize_coin_list, normalize_trades};
use super::config::PumpConfig;
use super::error::PumpError;
use super::fallback::{DegradationPolicy, DisabledFallback, SyntheticCoinFallback};
use crate::application::ports::CoinMarketPort;
use crate::domain::{CoinListQuery, CoinRecord, TradeRecord, UpstreamSource};
use crate::infrastructure::cookies::CookieStore;
use crate::infrastructure::metrics::{
    UpstreamOutcome, record_degraded_response, record_upstream_request,
};
use crate::infrastructure::session::{UpstreamSession, static_headers};

const ERROR_BODY_PREVIEW: usize = 200;

fn browser_headers() -> HeaderMap {
    static_headers(&[
        (
            "user-agent",
            concat!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        ),
        ("accept", "application/json, text/html"),
        ("accept-language", "en-US,en;q=0.9"),
        ("referer", "https://pump.fun/"),
        ("origin", "https://pump.fun"),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-site"),
    ])
}

/// Pump.fun coin-market adapter.
#[derive(Debug)]
pub struct PumpClient {
    session: UpstreamSession,
    config: PumpConfig,
    policy: Box<dyn DegradationPolicy>,
}

impl PumpClient {
    /// Create the adapter. The degradation policy follows
    /// `config.fallback_enabled`.
    pub fn new(config: PumpConfig, cookies: Arc<CookieStore>) -> Result<Self, reqwest::Error> {
        let policy: Box<dyn DegradationPolicy> = if config.fallback_enabled {
            Box::new(SyntheticCoinFallback)
        } else {
            Box::new(DisabledFallback)
        };
        let session = UpstreamSession::new(UpstreamSource::PumpFun, browser_headers(), cookies)?;
        Ok(Self {
            session,
            config,
            policy,
        })
    }

    /// Replace the degradation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn DegradationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PumpError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| PumpError::InvalidBaseUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| PumpError::InvalidBaseUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value, PumpError> {
        let started = Instant::now();
        let result = self.send(segments, query).await;
        let outcome = match &result {
            Ok(_) => UpstreamOutcome::Success,
            Err(PumpError::Status { .. }) => UpstreamOutcome::HttpStatus,
            Err(PumpError::JsonParse(_)) => UpstreamOutcome::Decode,
            Err(PumpError::Network(_) | PumpError::InvalidBaseUrl(_)) => UpstreamOutcome::Transport,
        };
        record_upstream_request(UpstreamSource::PumpFun, endpoint, outcome, started.elapsed());

        if let Err(e) = &result {
            tracing::warn!(endpoint, error = %e, "Pump.fun request failed");
        }
        result
    }

    async fn send(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, PumpError> {
        let url = self.endpoint(segments)?;
        let response = self
            .session
            .client()
            .get(url)
            .query(query)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| PumpError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PumpError::Network(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            return Err(PumpError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| PumpError::JsonParse(e.to_string()))
    }

    fn degrade_listing(&self, limit: u32) -> Vec<CoinRecord> {
        match self.policy.fallback_coins(limit as usize) {
            Some(coins) => {
                tracing::warn!(
                    served = coins.len(),
                    "Pump.fun unavailable, serving synthetic coins"
                );
                record_degraded_response(UpstreamSource::PumpFun);
                coins
            }
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl CoinMarketPort for PumpClient {
    async fn list_coins(&self, query: CoinListQuery) -> Vec<CoinRecord> {
        let params = [
            ("offset", query.offset.to_string()),
            ("limit", query.limit.to_string()),
            ("sort", query.sort.as_str().to_string()),
            ("order", query.order.as_str().to_string()),
            ("includeNsfw", query.include_nsfw.to_string()),
        ];

        match self.get_json("coins", &["coins"], &params).await {
            Ok(body) => normalize_coin_list(body),
            Err(e) if e.is_unavailable_status() => self.degrade_listing(query.limit),
            Err(_) => Vec::new(),
        }
    }

    async fn get_coin(&self, mint_address: &str) -> Option<CoinRecord> {
        let body = self
            .get_json("coin", &["coins", mint_address], &[])
            .await
            .ok()?;
        match serde_json::from_value(body) {
            Ok(coin) => Some(coin),
            Err(e) => {
                tracing::warn!(mint = mint_address, error = %e, "Unexpected coin body");
                None
            }
        }
    }

    async fn get_trades(&self, mint_address: &str, limit: u32, offset: u32) -> Vec<TradeRecord> {
        let params = [("limit", limit.to_string()), ("offset", offset.to_string())];
        self.get_json("trades", &["trades", mint_address], &params)
            .await
            .map(normalize_trades)
            .unwrap_or_default()
    }

    async fn derive_price(&self, mint_address: &str) -> f64 {
        let derived = self
            .get_coin(mint_address)
            .await
            .and_then(|coin| coin.implied_price())
            .filter(|price| price.is_finite());

        derived
            .or_else(|| {
                let fallback = self.policy.fallback_price(mint_address);
                if fallback.is_some() {
                    tracing::info!(mint = mint_address, "Serving synthetic coin price");
                    record_degraded_response(UpstreamSource::PumpFun);
                }
                fallback
            })
            .unwrap_or(0.0)
    }
}
