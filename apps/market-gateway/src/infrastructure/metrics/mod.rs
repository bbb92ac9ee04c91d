//! Prometheus Metrics Module
//!
//! Upstream call counts, latencies, and degraded responses, exposed at
//! `/metrics` on the API port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::domain::UpstreamSource;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once and return its handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "market_gateway_upstream_requests_total",
        "Upstream requests by source, endpoint and outcome"
    );
    describe_histogram!(
        "market_gateway_upstream_latency_seconds",
        "Upstream request round-trip time"
    );
    describe_counter!(
        "market_gateway_degraded_responses_total",
        "Responses served from synthetic fallback data"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// How an upstream call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// 200 with a usable body.
    Success,
    /// Non-success HTTP status.
    HttpStatus,
    /// Connect, timeout or body read failure.
    Transport,
    /// Body was not the expected JSON shape.
    Decode,
}

impl UpstreamOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::HttpStatus => "http_status",
            Self::Transport => "transport",
            Self::Decode => "decode",
        }
    }
}

/// Record one upstream call.
pub fn record_upstream_request(
    source: UpstreamSource,
    endpoint: &'static str,
    outcome: UpstreamOutcome,
    elapsed: Duration,
) {
    counter!(
        "market_gateway_upstream_requests_total",
        "source" => source.as_str(),
        "endpoint" => endpoint,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!(
        "market_gateway_upstream_latency_seconds",
        "source" => source.as_str(),
        "endpoint" => endpoint
    )
    .record(elapsed.as_secs_f64());
}

/// Record a response served from fallback data.
pub fn record_degraded_response(source: UpstreamSource) {
    counter!(
        "market_gateway_degraded_responses_total",
        "source" => source.as_str()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(UpstreamOutcome::Success.as_str(), "success");
        assert_eq!(UpstreamOutcome::HttpStatus.as_str(), "http_status");
        assert_eq!(UpstreamOutcome::Transport.as_str(), "transport");
        assert_eq!(UpstreamOutcome::Decode.as_str(), "decode");
    }

    #[test]
    fn recorded_metrics_render_with_labels() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_upstream_request(
                UpstreamSource::PumpFun,
                "coins",
                UpstreamOutcome::HttpStatus,
                Duration::from_millis(12),
            );
            record_degraded_response(UpstreamSource::PumpFun);
        });

        let rendered = handle.render();
        assert!(rendered.contains("market_gateway_upstream_requests_total"));
        assert!(rendered.contains("outcome=\"http_status\""));
        assert!(
            rendered.contains("market_gateway_degraded_responses_total{source=\"pump_fun\"} 1")
        );
    }
}
