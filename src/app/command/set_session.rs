//! SetSession command

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::handler::{CommandHandler, SessionOperation};
use crate::domain::{DomainError, SessionRepository, SessionValue};

/// Stores `value` under `key`, fully replacing any previous value
#[derive(Debug, Clone, PartialEq)]
pub struct SetSession {
    pub key: String,
    pub value: SessionValue,
}

impl SetSession {
    pub fn new(key: impl Into<String>, value: SessionValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl SessionOperation for SetSession {
    const NAME: &'static str = "set_session";

    fn session_key(&self) -> &str {
        &self.key
    }
}

pub struct SetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl SetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<SetSession> for SetSessionHandler {
    async fn handle(&self, command: SetSession) -> Result<(), DomainError> {
        let data = command.value.encode()?;

        self.repository
            .set(&command.key, data)
            .await
            .map_err(|e| DomainError::session_write(command.key, e))
    }
}
