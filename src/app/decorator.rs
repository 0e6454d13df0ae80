//! Cross-cutting handler decorators
//!
//! Handlers are wrapped once, at construction time:
//! `LoggingDecorator(MetricsDecorator(handler))`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error};

use super::handler::{CommandHandler, QueryHandler, SessionOperation};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_handler_call;

/// Logs the start and outcome of every call to the inner handler
#[derive(Debug, Clone)]
pub struct LoggingDecorator<H> {
    inner: H,
}

impl<H> LoggingDecorator<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

fn log_outcome<T>(kind: &'static str, name: &'static str, key: &str, result: &Result<T, DomainError>) {
    match result {
        Ok(_) => debug!(kind, handler = name, key = %key, "Handler executed successfully"),
        // Client errors are expected traffic, not service faults.
        Err(e) if e.is_client_error() => {
            debug!(kind, handler = name, key = %key, error = %e, "Handler rejected request")
        }
        Err(e) => error!(kind, handler = name, key = %key, error = %e.chain(), "Failed to execute handler"),
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for LoggingDecorator<H>
where
    C: SessionOperation,
    H: CommandHandler<C>,
{
    async fn handle(&self, command: C) -> Result<(), DomainError> {
        let key = command.session_key().to_string();
        debug!(kind = "command", handler = C::NAME, key = %key, "Executing command");

        let result = self.inner.handle(command).await;
        log_outcome("command", C::NAME, &key, &result);

        result
    }
}

#[async_trait]
impl<Q, R, H> QueryHandler<Q, R> for LoggingDecorator<H>
where
    Q: SessionOperation,
    R: Send + 'static,
    H: QueryHandler<Q, R>,
{
    async fn handle(&self, query: Q) -> Result<R, DomainError> {
        let key = query.session_key().to_string();
        debug!(kind = "query", handler = Q::NAME, key = %key, "Executing query");

        let result = self.inner.handle(query).await;
        log_outcome("query", Q::NAME, &key, &result);

        result
    }
}

/// Records call count, outcome and latency of the inner handler
#[derive(Debug, Clone)]
pub struct MetricsDecorator<H> {
    inner: H,
}

impl<H> MetricsDecorator<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for MetricsDecorator<H>
where
    C: SessionOperation,
    H: CommandHandler<C>,
{
    async fn handle(&self, command: C) -> Result<(), DomainError> {
        let start = Instant::now();
        let result = self.inner.handle(command).await;

        record_handler_call(C::NAME, result.is_ok(), start.elapsed());
        result
    }
}

#[async_trait]
impl<Q, R, H> QueryHandler<Q, R> for MetricsDecorator<H>
where
    Q: SessionOperation,
    R: Send + 'static,
    H: QueryHandler<Q, R>,
{
    async fn handle(&self, query: Q) -> Result<R, DomainError> {
        let start = Instant::now();
        let result = self.inner.handle(query).await;

        record_handler_call(Q::NAME, result.is_ok(), start.elapsed());
        result
    }
}

/// Wraps a command handler with the standard decorators
pub fn apply_command_decorators<C, H>(handler: H) -> Arc<dyn CommandHandler<C>>
where
    C: SessionOperation,
    H: CommandHandler<C> + 'static,
{
    Arc::new(LoggingDecorator::new(MetricsDecorator::new(handler)))
}

/// Wraps a query handler with the standard decorators
pub fn apply_query_decorators<Q, R, H>(handler: H) -> Arc<dyn QueryHandler<Q, R>>
where
    Q: SessionOperation,
    R: Send + 'static,
    H: QueryHandler<Q, R> + 'static,
{
    Arc::new(LoggingDecorator::new(MetricsDecorator::new(handler)))
}
