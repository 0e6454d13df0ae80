//! Command and query handler traits

use async_trait::async_trait;

use crate::domain::DomainError;

/// A request flowing through the application layer.
///
/// Every command and query addresses exactly one session, which decorators
/// use to label logs and metrics.
pub trait SessionOperation: Send + Sync + 'static {
    /// Stable name used in logs and metric labels
    const NAME: &'static str;

    /// Key of the session the operation targets
    fn session_key(&self) -> &str;
}

/// Handles a command: a write with no result beyond success or failure
#[async_trait]
pub trait CommandHandler<C: SessionOperation>: Send + Sync {
    async fn handle(&self, command: C) -> Result<(), DomainError>;
}

/// Handles a query, producing `R`
#[async_trait]
pub trait QueryHandler<Q: SessionOperation, R: Send + 'static>: Send + Sync {
    async fn handle(&self, query: Q) -> Result<R, DomainError>;
}
