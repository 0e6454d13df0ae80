//! Observability infrastructure - Logging, tracing and metrics

mod config;
mod metrics;
mod tracing_setup;

pub use config::{LogFormat, LoggingConfig, MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_grpc_request, record_handler_call,
    record_http_request, PrometheusMetrics,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
