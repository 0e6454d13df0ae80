//! DeleteSession command

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::app::handler::{CommandHandler, SessionOperation};
use crate::domain::{DomainError, SessionRepository};

/// Removes the session stored under `key`. Deleting an absent session
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSession {
    pub key: String,
}

impl DeleteSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionOperation for DeleteSession {
    const NAME: &'static str = "delete_session";

    fn session_key(&self) -> &str {
        &self.key
    }
}

pub struct DeleteSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl DeleteSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<DeleteSession> for DeleteSessionHandler {
    async fn handle(&self, command: DeleteSession) -> Result<(), DomainError> {
        let removed = self.repository.delete(&command.key).await?;
        trace!(key = %command.key, removed, "Session delete completed");

        Ok(())
    }
}
