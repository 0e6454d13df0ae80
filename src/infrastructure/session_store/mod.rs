//! Session store infrastructure - SessionRepository implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{SessionStoreConfig, SessionStoreFactory, SessionStoreType};
pub use in_memory::{InMemorySessionConfig, InMemorySessionRepository};
pub use redis::{RedisSessionConfig, RedisSessionRepository};
