//! gRPC server

use std::future::Future;
use std::net::SocketAddr;

use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::proto::session_service_server::SessionServiceServer;
use super::service::SessionGrpcService;
use crate::app::Application;

/// Serves `session.SessionService` on `addr` until `shutdown` resolves
pub async fn serve_grpc<F>(app: Application, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(address = %addr, "Starting gRPC server");

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(SessionServiceServer::new(SessionGrpcService::new(app)))
        .serve_with_shutdown(addr, shutdown)
        .await
        .map_err(|e| {
            error!(error = %e, "gRPC server error");
            anyhow::anyhow!("gRPC server error: {}", e)
        })
}
