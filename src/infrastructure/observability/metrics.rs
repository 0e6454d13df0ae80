//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

/// Prometheus metrics handle for serving the scrape endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Current metrics in the Prometheus text format
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder. Returns `None` when metrics are
/// disabled or a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("session_svc_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Router serving the metrics at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "error" }
}

/// Record one command or query handler execution
pub fn record_handler_call(handler: &'static str, success: bool, duration: Duration) {
    counter!(
        "session_handler_requests_total",
        "handler" => handler,
        "outcome" => outcome(success)
    )
    .increment(1);
    histogram!("session_handler_duration_seconds", "handler" => handler)
        .record(duration.as_secs_f64());
}

/// Record an HTTP request metric. `path` should be the matched route so
/// session ids do not end up as label values.
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record a gRPC call metric
pub fn record_grpc_request(method: &'static str, code: tonic::Code, duration: Duration) {
    let labels = [("method", method.to_string()), ("code", format!("{:?}", code))];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_seconds", &labels).record(duration.as_secs_f64());
}
