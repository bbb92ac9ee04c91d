//! Market Gateway Binary
//!
//! Starts the market data gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-gateway
//! ```
//!
//! # Environment Variables
//!
//! All optional.
//! - `HTTP_PORT`: HTTP server port (default: 8000)
//! - `PUMP_API_BASE`: pump.fun frontend API base URL
//! - `PUMP_TIMEOUT_SECS`: pump.fun request timeout (default: 30)
//! - `PUMP_FALLBACK_ENABLED`: Serve synthetic coins on upstream 530 (default: true)
//! - `XUEQIU_BASE_URL`: Xueqiu API base URL
//! - `XUEQIU_QUOTE_TIMEOUT_SECS` / `XUEQIU_KLINE_TIMEOUT_SECS`: (default: 10 / 15)
//! - `PUMP_COOKIE_FILE`, `PUMP_FUN_COOKIE`: pump.fun cookie file and value
//! - `XUEQIU_COOKIE_FILE`, `XUEQIU_COOKIE`: Xueqiu cookie file and value
//! - `CONFIG_STORE_PATH`: JSON config store (default: config/system_config.json)
//! - `LOG_FORMAT`: `json` for JSON log lines
//! - `RUST_LOG`: Log filter (default: `market_gateway=info`)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use market_gateway::application::ports::ConfigStore;
use market_gateway::domain::UpstreamSource;
use market_gateway::infrastructure::config::{GatewayConfig, JsonFileConfigStore};
use market_gateway::infrastructure::cookies::{CookieStore, resolve_cookie};
use market_gateway::infrastructure::http::{AppState, create_router};
use market_gateway::infrastructure::metrics::init_metrics;
use market_gateway::infrastructure::pump::PumpClient;
use market_gateway::infrastructure::xueqiu::XueqiuClient;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing()?;

    tracing::info!("Starting Market Gateway");

    let config = GatewayConfig::from_env()?;
    log_config(&config);

    let store = JsonFileConfigStore::load(&config.config_store_path);
    let cookies = Arc::new(load_cookies(&config, &store));

    let pump = Arc::new(
        PumpClient::new(config.pump.clone(), Arc::clone(&cookies))
            .context("failed to build pump.fun client")?,
    );
    let xueqiu = Arc::new(
        XueqiuClient::new(config.xueqiu.clone(), Arc::clone(&cookies))
            .context("failed to build Xueqiu client")?,
    );

    let mut state = AppState::new(xueqiu, pump, cookies, env!("CARGO_PKG_VERSION"));
    match init_metrics() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!(error = %e, "Metrics disabled"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(await_shutdown())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Market gateway stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Initialize the tracing subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("market_gateway=info".parse()?);

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

/// Log the parsed configuration.
fn log_config(config: &GatewayConfig) {
    tracing::info!(
        http_port = config.server.http_port,
        pump_api_base = %config.pump.api_base,
        pump_fallback_enabled = config.pump.fallback_enabled,
        xueqiu_base_url = %config.xueqiu.base_url,
        config_store = %config.config_store_path.display(),
        "Configuration loaded"
    );
}

/// Resolve the startup cookie of every source into a shared store.
fn load_cookies(config: &GatewayConfig, store: &dyn ConfigStore) -> CookieStore {
    CookieStore::with_values(UpstreamSource::ALL.into_iter().filter_map(|source| {
        resolve_cookie(source, config.cookies.for_source(source), store)
            .map(|resolved| (source, resolved.value))
    }))
}

/// Wait for Ctrl+C or SIGTERM.
async fn await_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, initiating shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, initiating shutdown"),
    }
}
