//! Application layer - session commands, queries and the façade the
//! transports depend on

pub mod command;
pub mod decorator;
pub mod handler;
pub mod query;

use std::sync::Arc;

pub use command::{DeleteSession, DeleteSessionHandler, SetSession, SetSessionHandler};
pub use decorator::{
    apply_command_decorators, apply_query_decorators, LoggingDecorator, MetricsDecorator,
};
pub use handler::{CommandHandler, QueryHandler, SessionOperation};
pub use query::{GetSession, GetSessionHandler};

use crate::domain::{SessionRepository, StoredValue};

/// Write side of the application
#[derive(Clone)]
pub struct Commands {
    pub set_session: Arc<dyn CommandHandler<SetSession>>,
    pub delete_session: Arc<dyn CommandHandler<DeleteSession>>,
}

/// Read side of the application
#[derive(Clone)]
pub struct Queries {
    pub get_session: Arc<dyn QueryHandler<GetSession, StoredValue>>,
}

/// All session handlers behind named slots. Built once at startup and shared
/// by every transport.
#[derive(Clone)]
pub struct Application {
    pub commands: Commands,
    pub queries: Queries,
}

impl Application {
    /// Builds the decorated handlers over a single repository
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            commands: Commands {
                set_session: apply_command_decorators(SetSessionHandler::new(repository.clone())),
                delete_session: apply_command_decorators(DeleteSessionHandler::new(
                    repository.clone(),
                )),
            },
            queries: Queries {
                get_session: apply_query_decorators(GetSessionHandler::new(repository)),
            },
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("commands", &["set_session", "delete_session"])
            .field("queries", &["get_session"])
            .finish()
    }
}
