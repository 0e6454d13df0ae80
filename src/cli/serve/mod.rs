//! Serve command - loads configuration, connects the session store and runs
//! the selected transport until SIGINT or SIGTERM

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::app::Application;
use crate::config::{AppConfig, Transport};
use crate::grpc::serve_grpc;
use crate::infrastructure::observability::{
    create_metrics_router, init_metrics, init_tracing, shutdown_tracing, PrometheusMetrics,
};
use crate::infrastructure::session_store::SessionStoreConfig;

/// Run the server. `transport` overrides the configured one.
pub async fn run(transport: Option<Transport>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(transport) = transport {
        config.server.transport = transport;
    }

    init_tracing(&config.logging, &config.observability.tracing);
    let metrics = init_metrics(&config.observability.metrics);

    let store_config = SessionStoreConfig::from_env()?;
    info!(store = %store_config.store_type, "Connecting session store");
    let app = crate::create_application(&store_config).await?;

    let result = match config.server.transport {
        Transport::Http => run_http(&config, app, metrics).await,
        Transport::Grpc => run_grpc(&config, app, metrics).await,
    };

    shutdown_tracing();
    result
}

/// Resolves `server.host`, which may be an IP literal or a hostname, to the
/// first address it yields
async fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Invalid server host '{}'", host))?
        .next()
        .with_context(|| format!("Server host '{}' resolved to no addresses", host))
}

fn with_metrics(router: Router, metrics: Option<PrometheusMetrics>, path: &str) -> Router {
    match metrics {
        Some(metrics) => router.merge(create_metrics_router(metrics, path)),
        None => router,
    }
}

async fn run_http(
    config: &AppConfig,
    app: Application,
    metrics: Option<PrometheusMetrics>,
) -> anyhow::Result<()> {
    let router = with_metrics(
        create_router(AppState::new(app)),
        metrics,
        &config.observability.metrics.path,
    );

    let addr = socket_addr(&config.server.host, config.server.port).await?;
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Serves gRPC, plus the metrics endpoint on the HTTP port when enabled
async fn run_grpc(
    config: &AppConfig,
    app: Application,
    metrics: Option<PrometheusMetrics>,
) -> anyhow::Result<()> {
    if metrics.is_some() {
        let router = with_metrics(Router::new(), metrics, &config.observability.metrics.path);
        let addr = socket_addr(&config.server.host, config.server.port).await?;
        let listener = TcpListener::bind(addr).await?;
        info!("Serving metrics on {}", addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!(error = %e, "Metrics server error");
            }
        });
    }

    let addr = socket_addr(&config.server.host, config.server.grpc_port).await?;
    serve_grpc(app, addr, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_socket_addr_ip_literal() {
        assert_eq!(
            socket_addr("127.0.0.1", 8080).await.unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            socket_addr("0.0.0.0", 50051).await.unwrap(),
            "0.0.0.0:50051".parse::<SocketAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_socket_addr_resolves_hostname() {
        let addr = socket_addr("localhost", 8080).await.unwrap();

        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_socket_addr_invalid_host() {
        assert!(socket_addr("not a host", 8080).await.is_err());
    }
}
