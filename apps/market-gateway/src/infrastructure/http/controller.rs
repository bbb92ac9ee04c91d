//! HTTP Controller (Driver Adapter)
//!
//! Axum routes for the coin market, equity market data, and cookie
//! management. Handlers validate the query, call the application services,
//! and wrap results in the `{success, data, ...}` envelope.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::ports::{CoinMarketPort, EquityMarketPort};
use crate::application::services::{CoinDirectory, MarketRouter};
use crate::domain::market::COIN_MARKET_TAG;
use crate::domain::{
    CandleRecord, CoinRecord, MarketStatus, QuoteRecord, TradeRecord, UpstreamSource,
};
use crate::infrastructure::cookies::CookieStore;

use super::request::{
    CandleParams, CoinListParams, CookieUpdateRequest, LimitParams, SearchParams, TradeParams,
};
use super::response::{
    ApiError, CoinPriceResponse, CookieStatusResponse, DataResponse, HealthResponse, ListResponse,
};

/// Application state shared across handlers.
pub struct AppState<E, C>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    /// Market-tag dispatch for prices, candles and status.
    pub router: Arc<MarketRouter<E, C>>,
    /// Curated coin listings and search.
    pub directory: Arc<CoinDirectory<C>>,
    /// Coin-market source for direct lookups.
    pub coins: Arc<C>,
    /// Shared upstream cookies.
    pub cookies: Arc<CookieStore>,
    /// Prometheus handle, when metrics are installed.
    pub metrics: Option<PrometheusHandle>,
    /// Application version.
    pub version: String,
}

impl<E, C> AppState<E, C>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    /// Wire the services over the two sources.
    pub fn new(equity: Arc<E>, coins: Arc<C>, cookies: Arc<CookieStore>, version: &str) -> Self {
        Self {
            router: Arc::new(MarketRouter::new(equity, Arc::clone(&coins))),
            directory: Arc::new(CoinDirectory::new(Arc::clone(&coins))),
            coins,
            cookies,
            metrics: None,
            version: version.to_string(),
        }
    }

    /// Serve `/metrics` from `handle`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl<E, C> Clone for AppState<E, C>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            directory: Arc::clone(&self.directory),
            coins: Arc::clone(&self.coins),
            cookies: Arc::clone(&self.cookies),
            metrics: self.metrics.clone(),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<E, C>(state: AppState<E, C>) -> Router
where
    E: EquityMarketPort + 'static,
    C: CoinMarketPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .route("/api/v1/pump/coins", get(list_coins))
        .route("/api/v1/pump/coins/{mint}", get(get_coin))
        .route("/api/v1/pump/coins/{mint}/trades", get(get_trades))
        .route("/api/v1/pump/coins/{mint}/price", get(get_coin_price))
        .route("/api/v1/pump/trending", get(trending_coins))
        .route("/api/v1/pump/new", get(new_coins))
        .route("/api/v1/pump/top", get(top_coins))
        .route("/api/v1/pump/search", get(search_coins))
        .route("/api/v1/market/{market}/{symbol}/price", get(get_price))
        .route("/api/v1/market/{market}/{symbol}/candles", get(get_candles))
        .route("/api/v1/market/{market}/{symbol}/status", get(get_status))
        .route(
            "/api/v1/cookies/{source}",
            get(get_cookie_status).put(update_cookie),
        )
        .with_state(state)
}

// =============================================================================
// Service
// =============================================================================

async fn health_check<E, C>(State(state): State<AppState<E, C>>) -> Json<HealthResponse>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        pump_cookie_configured: state.cookies.is_configured(UpstreamSource::PumpFun),
        xueqiu_cookie_configured: state.cookies.is_configured(UpstreamSource::Xueqiu),
    })
}

async fn render_metrics<E, C>(State(state): State<AppState<E, C>>) -> impl IntoResponse
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics not initialized".to_string(),
        ),
    }
}

// =============================================================================
// Coin Market
// =============================================================================

async fn list_coins<E, C>(
    State(state): State<AppState<E, C>>,
    query: Result<Query<CoinListParams>, QueryRejection>,
) -> Result<Json<ListResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let query = params.into_query()?;
    let coins = state.coins.list_coins(query).await;
    Ok(Json(ListResponse::new(coins).paged(query.limit, query.offset)))
}

async fn get_coin<E, C>(
    State(state): State<AppState<E, C>>,
    Path(mint): Path<String>,
) -> Result<Json<DataResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    state
        .coins
        .get_coin(&mint)
        .await
        .map(|coin| Json(DataResponse::new(coin)))
        .ok_or_else(|| ApiError::not_found(format!("Coin {mint} not found")))
}

async fn get_trades<E, C>(
    State(state): State<AppState<E, C>>,
    Path(mint): Path<String>,
    query: Result<Query<TradeParams>, QueryRejection>,
) -> Result<Json<ListResponse<TradeRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let (limit, offset) = params.validate()?;
    let trades = state.coins.get_trades(&mint, limit, offset).await;
    Ok(Json(ListResponse::new(trades).paged(limit, offset)))
}

async fn get_coin_price<E, C>(
    State(state): State<AppState<E, C>>,
    Path(mint): Path<String>,
) -> Result<Json<DataResponse<CoinPriceResponse>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let price = state.router.get_last_price(&mint, COIN_MARKET_TAG).await?;
    Ok(Json(DataResponse::new(CoinPriceResponse {
        mint_address: mint,
        price,
        market: COIN_MARKET_TAG.to_string(),
    })))
}

async fn trending_coins<E, C>(
    State(state): State<AppState<E, C>>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<ListResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let limit = params.validate()?;
    Ok(Json(ListResponse::new(state.directory.trending(limit).await)))
}

async fn new_coins<E, C>(
    State(state): State<AppState<E, C>>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<ListResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let limit = params.validate()?;
    Ok(Json(ListResponse::new(state.directory.newest(limit).await)))
}

async fn top_coins<E, C>(
    State(state): State<AppState<E, C>>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<ListResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let limit = params.validate()?;
    Ok(Json(ListResponse::new(state.directory.top(limit).await)))
}

async fn search_coins<E, C>(
    State(state): State<AppState<E, C>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListResponse<CoinRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let (query, limit) = params.validate()?;
    let found = state.directory.search(&query, limit).await;
    Ok(Json(ListResponse::new(found).with_query(query)))
}

// =============================================================================
// Market Data
// =============================================================================

async fn get_price<E, C>(
    State(state): State<AppState<E, C>>,
    Path((market, symbol)): Path<(String, String)>,
) -> Result<Json<DataResponse<QuoteRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let quote = state.router.get_quote(&symbol, &market).await?;
    Ok(Json(DataResponse::new(quote)))
}

async fn get_candles<E, C>(
    State(state): State<AppState<E, C>>,
    Path((market, symbol)): Path<(String, String)>,
    query: Result<Query<CandleParams>, QueryRejection>,
) -> Result<Json<ListResponse<CandleRecord>>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Query(params) = query?;
    let count = params.validate()?;
    let candles = state
        .router
        .get_candles(&symbol, &market, &params.period, count)
        .await?;
    Ok(Json(ListResponse::new(candles)))
}

async fn get_status<E, C>(
    State(state): State<AppState<E, C>>,
    Path((market, symbol)): Path<(String, String)>,
) -> Json<DataResponse<MarketStatus>>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    Json(DataResponse::new(
        state.router.get_market_status(&symbol, &market),
    ))
}

// =============================================================================
// Cookies
// =============================================================================

fn parse_source(name: &str) -> Result<UpstreamSource, ApiError> {
    UpstreamSource::from_name(name)
        .ok_or_else(|| ApiError::not_found(format!("Unknown cookie source {name}")))
}

fn cookie_status(cookies: &CookieStore, source: UpstreamSource) -> CookieStatusResponse {
    CookieStatusResponse {
        source: source.as_str().to_string(),
        configured: cookies.is_configured(source),
        cookie_count: cookies.cookie_count(source),
        generation: cookies.snapshot(source).generation,
    }
}

async fn get_cookie_status<E, C>(
    State(state): State<AppState<E, C>>,
    Path(source): Path<String>,
) -> Result<Json<CookieStatusResponse>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let source = parse_source(&source)?;
    Ok(Json(cookie_status(&state.cookies, source)))
}

async fn update_cookie<E, C>(
    State(state): State<AppState<E, C>>,
    Path(source): Path<String>,
    body: Result<Json<CookieUpdateRequest>, JsonRejection>,
) -> Result<Json<CookieStatusResponse>, ApiError>
where
    E: EquityMarketPort,
    C: CoinMarketPort,
{
    let Json(request) = body?;
    let source = parse_source(&source)?;
    state.cookies.set(source, &request.cookie);
    tracing::info!(source = %source, "Cookie updated via API");
    Ok(Json(cookie_status(&state.cookies, source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::EquityError;
    use crate::domain::{CoinListQuery, SessionState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{FixedOffset, TimeZone};
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct FakeEquity {
        price: Result<f64, EquityError>,
    }

    #[async_trait]
    impl EquityMarketPort for FakeEquity {
        async fn get_latest_price(&self, _symbol: &str) -> Result<f64, EquityError> {
            self.price.clone()
        }

        async fn get_candles(
            &self,
            _symbol: &str,
            _period: &str,
            count: i64,
        ) -> Result<Vec<CandleRecord>, EquityError> {
            Ok((0..count)
                .map(|i| CandleRecord {
                    timestamp: Some(1_700_000_000_000 + i),
                    close: Some(10.0),
                    ..CandleRecord::default()
                })
                .collect())
        }

        fn market_status(&self, symbol: &str) -> MarketStatus {
            let at = FixedOffset::east_opt(8 * 3600)
                .unwrap()
                .with_ymd_and_hms(2025, 1, 6, 22, 0, 0)
                .unwrap();
            MarketStatus::session(symbol, SessionState::Trading, at)
        }
    }

    struct FakeCoins {
        coins: Vec<CoinRecord>,
        price: f64,
        last_query: Mutex<Option<CoinListQuery>>,
    }

    #[async_trait]
    impl CoinMarketPort for FakeCoins {
        async fn list_coins(&self, query: CoinListQuery) -> Vec<CoinRecord> {
            *self.last_query.lock() = Some(query);
            self.coins.iter().take(query.limit as usize).cloned().collect()
        }

        async fn get_coin(&self, mint_address: &str) -> Option<CoinRecord> {
            self.coins
                .iter()
                .find(|c| c.mint_address == mint_address)
                .cloned()
        }

        async fn get_trades(
            &self,
            mint_address: &str,
            limit: u32,
            _offset: u32,
        ) -> Vec<TradeRecord> {
            (0..limit.min(3))
                .map(|i| TradeRecord(json!({ "mint": mint_address, "seq": i })))
                .collect()
        }

        async fn derive_price(&self, _mint_address: &str) -> f64 {
            self.price
        }
    }

    fn coin(mint: &str, name: &str) -> CoinRecord {
        CoinRecord {
            mint_address: mint.to_string(),
            name: name.to_string(),
            symbol: String::new(),
            description: String::new(),
            image_uri: None,
            usd_market_cap: Some(100_000.0),
            total_supply: None,
            created_timestamp: None,
            last_trade_timestamp: None,
            nsfw: false,
            complete: false,
        }
    }

    fn create_test_state(
        equity_price: Result<f64, EquityError>,
        coin_price: f64,
    ) -> AppState<FakeEquity, FakeCoins> {
        let equity = Arc::new(FakeEquity {
            price: equity_price,
        });
        let coins = Arc::new(FakeCoins {
            coins: vec![coin("mint-1", "MoonDoge"), coin("mint-2", "PepeCoin")],
            price: coin_price,
            last_query: Mutex::new(None),
        });
        AppState::new(equity, coins, Arc::new(CookieStore::new()), "1.0.0-test")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get_json(state: AppState<FakeEquity, FakeCoins>, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(create_router(state), request).await
    }

    #[tokio::test]
    async fn health_check_reports_cookie_flags() {
        let state = create_test_state(Ok(1.0), 1.0);
        state.cookies.set(UpstreamSource::Xueqiu, "xq_a_token=abc");

        let (status, body) = get_json(state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["pump_cookie_configured"], false);
        assert_eq!(body["xueqiu_cookie_configured"], true);
    }

    #[tokio::test]
    async fn metrics_without_handle_is_unavailable() {
        let state = create_test_state(Ok(1.0), 1.0);
        let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn metrics_renders_prometheus_text() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let state = create_test_state(Ok(1.0), 1.0).with_metrics(recorder.handle());
        let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn list_coins_echoes_paging() {
        let state = create_test_state(Ok(1.0), 1.0);
        let coins = Arc::clone(&state.coins);

        let (status, body) = get_json(
            state,
            "/api/v1/pump/coins?limit=1&offset=4&sort=market_cap&order=ASC&include_nsfw=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 1);
        assert_eq!(body["limit"], 1);
        assert_eq!(body["offset"], 4);
        assert_eq!(body["data"][0]["mint"], "mint-1");

        let query = (*coins.last_query.lock()).unwrap();
        assert_eq!(query.sort, crate::domain::CoinSort::MarketCap);
        assert_eq!(query.order, crate::domain::SortOrder::Asc);
        assert!(query.include_nsfw);
    }

    #[tokio::test]
    async fn list_coins_rejects_out_of_range_limit() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/coins?limit=500").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn malformed_query_uses_error_envelope() {
        for uri in [
            "/api/v1/pump/coins?limit=abc",
            "/api/v1/pump/coins?sort=bogus",
            "/api/v1/pump/coins?include_nsfw=maybe",
            "/api/v1/pump/trending?limit=many",
            "/api/v1/market/US/AAPL/candles?count=x",
        ] {
            let state = create_test_state(Ok(1.0), 1.0);
            let (status, body) = get_json(state, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], false, "{uri}");
            assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()), "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_coin_is_not_found() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/coins/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Coin nope not found");
    }

    #[tokio::test]
    async fn known_coin_is_returned() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/coins/mint-2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "PepeCoin");
    }

    #[tokio::test]
    async fn trades_are_listed() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/coins/mint-1/trades?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["offset"], 0);
    }

    #[tokio::test]
    async fn coin_price_uses_coin_market_tag() {
        let state = create_test_state(Ok(1.0), 0.0001);
        let (status, body) = get_json(state, "/api/v1/pump/coins/mint-1/price").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mint_address"], "mint-1");
        assert_eq!(body["data"]["market"], "PUMP");
        assert_eq!(body["data"]["price"], 0.0001);
    }

    #[tokio::test]
    async fn zero_coin_price_is_not_found() {
        let state = create_test_state(Ok(1.0), 0.0);
        let (status, _) = get_json(state, "/api/v1/pump/coins/mint-1/price").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_echoes_query() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/search?q=pepe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "pepe");
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["mint"], "mint-2");
    }

    #[tokio::test]
    async fn search_without_query_is_unprocessable() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, _) = get_json(state, "/api/v1/pump/search").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn trending_has_no_paging_echo() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state, "/api/v1/pump/trending?limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert!(body.get("limit").is_none());
    }

    #[tokio::test]
    async fn equity_price_is_a_quote() {
        let state = create_test_state(Ok(187.5), 1.0);
        let (status, body) = get_json(state, "/api/v1/market/US/AAPL/price").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["symbol"], "AAPL");
        assert_eq!(body["data"]["market"], "US");
        assert_eq!(body["data"]["price"], 187.5);
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let state = create_test_state(
            Err(EquityError::UpstreamUnavailable {
                message: "timeout".to_string(),
            }),
            1.0,
        );
        let (status, body) = get_json(state, "/api/v1/market/US/AAPL/price").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn missing_equity_price_is_not_found() {
        let state = create_test_state(
            Err(EquityError::NoPriceAvailable {
                symbol: "AAPL".to_string(),
            }),
            1.0,
        );
        let (status, _) = get_json(state, "/api/v1/market/US/AAPL/price").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn candles_use_defaults_and_coin_market_is_empty() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, body) = get_json(state.clone(), "/api/v1/market/US/AAPL/candles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 100);

        let (status, body) = get_json(state, "/api/v1/market/pump/mint-1/candles?count=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn candles_reject_large_count() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, _) = get_json(state, "/api/v1/market/US/AAPL/candles?count=5000").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn status_routes_by_market() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (_, body) = get_json(state.clone(), "/api/v1/market/PUMP/mint-1/status").await;
        assert_eq!(body["data"]["market_status"], "OPEN");
        assert_eq!(body["data"]["trading_hours"], "24/7");

        let (_, body) = get_json(state, "/api/v1/market/US/AAPL/status").await;
        assert_eq!(body["data"]["market_status"], "TRADING");
        assert_eq!(body["data"]["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn cookie_update_never_echoes_value() {
        let state = create_test_state(Ok(1.0), 1.0);
        let cookies = Arc::clone(&state.cookies);
        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/cookies/xueqiu")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "cookie": "xq_a_token=secret; u=1" })).unwrap(),
            ))
            .unwrap();

        let (status, body) = send(create_router(state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], true);
        assert_eq!(body["cookie_count"], 2);
        assert!(!body.to_string().contains("secret"));
        assert_eq!(
            cookies.get(UpstreamSource::Xueqiu).as_deref(),
            Some("xq_a_token=secret; u=1")
        );
    }

    async fn put_cookie_body(body: &'static str) -> (StatusCode, Value) {
        let state = create_test_state(Ok(1.0), 1.0);
        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/cookies/xueqiu")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(create_router(state), request).await
    }

    #[tokio::test]
    async fn cookie_body_without_cookie_field_uses_error_envelope() {
        let (status, body) = put_cookie_body("{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["detail"].as_str().is_some_and(|d| d.contains("cookie")));
    }

    #[tokio::test]
    async fn unparseable_cookie_body_is_bad_request() {
        let (status, body) = put_cookie_body("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_cookie_source_is_not_found() {
        let state = create_test_state(Ok(1.0), 1.0);
        let (status, _) = get_json(state, "/api/v1/cookies/binance").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
