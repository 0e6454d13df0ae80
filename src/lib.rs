//! session-svc
//!
//! Stores session key/value pairs with a fixed time-to-live and serves them
//! over HTTP or gRPC. Values are JSON objects; storage is delegated to Redis
//! or an in-process cache.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod grpc;
pub mod infrastructure;

pub use app::Application;
pub use config::AppConfig;

use domain::DomainError;
use infrastructure::session_store::{SessionStoreConfig, SessionStoreFactory};

/// Connects the configured session store and builds the application on it
pub async fn create_application(config: &SessionStoreConfig) -> Result<Application, DomainError> {
    let repository = SessionStoreFactory::new().create(config).await?;
    Ok(Application::new(repository))
}
