//! GetSession query

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::handler::{QueryHandler, SessionOperation};
use crate::domain::{DomainError, SessionRepository, StoredValue};

/// Reads the raw value stored under `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSession {
    pub key: String,
}

impl GetSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionOperation for GetSession {
    const NAME: &'static str = "get_session";

    fn session_key(&self) -> &str {
        &self.key
    }
}

/// Pass-through to the repository. Decoding the stored bytes is left to the
/// transports, so this handler knows nothing about wire formats.
pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<GetSession, StoredValue> for GetSessionHandler {
    async fn handle(&self, query: GetSession) -> Result<StoredValue, DomainError> {
        self.repository.get(&query.key).await
    }
}
