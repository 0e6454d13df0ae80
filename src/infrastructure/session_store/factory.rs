//! Session store factory for runtime selection

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::{DomainError, SessionRepository};

use super::in_memory::{InMemorySessionConfig, InMemorySessionRepository};
use super::redis::{RedisSessionConfig, RedisSessionRepository};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_DB: i64 = 0;
const DEFAULT_TTL_SECS: u64 = 60 * 60 * 24;
const DEFAULT_MAX_CAPACITY: u64 = 100_000;

/// Supported session backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStoreType {
    #[default]
    Redis,
    /// Process-local moka cache
    InMemory,
}

impl fmt::Display for SessionStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStoreType::Redis => write!(f, "redis"),
            SessionStoreType::InMemory => write!(f, "in_memory"),
        }
    }
}

impl FromStr for SessionStoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(SessionStoreType::Redis),
            "in_memory" | "inmemory" | "memory" => Ok(SessionStoreType::InMemory),
            _ => Err(DomainError::configuration(format!(
                "Unsupported session store type: {}. Valid types: redis, in_memory",
                s
            ))),
        }
    }
}

/// Backend selection and connection settings
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    pub store_type: SessionStoreType,
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
    /// Session lifetime. `None` keeps sessions until they are deleted.
    pub ttl: Option<Duration>,
    pub key_prefix: Option<String>,
    /// In-memory only
    pub max_capacity: u64,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            store_type: SessionStoreType::Redis,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            db: DEFAULT_DB,
            ttl: Some(Duration::from_secs(DEFAULT_TTL_SECS)),
            key_prefix: None,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl SessionStoreConfig {
    pub fn in_memory() -> Self {
        Self {
            store_type: SessionStoreType::InMemory,
            ..Default::default()
        }
    }

    pub fn redis(host: impl Into<String>, port: u16) -> Self {
        Self {
            store_type: SessionStoreType::Redis,
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: impl Into<Option<Duration>>) -> Self {
        self.ttl = ttl.into();
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Reads the `MEMORY_DB_*` environment variables
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset and empty
    /// variables fall back to their defaults. A `MEMORY_DB_DURATION` of `0`
    /// disables expiry.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let store_type = match var("MEMORY_DB_TYPE") {
            Some(value) => value.parse()?,
            None => SessionStoreType::default(),
        };

        let ttl_secs = parse_var(&var, "MEMORY_DB_DURATION", DEFAULT_TTL_SECS)?;

        Ok(Self {
            store_type,
            host: var("MEMORY_DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_var(&var, "MEMORY_DB_PORT", DEFAULT_PORT)?,
            password: var("MEMORY_DB_PASSWORD"),
            db: parse_var(&var, "MEMORY_DB_ID", DEFAULT_DB)?,
            ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            key_prefix: var("MEMORY_DB_KEY_PREFIX"),
            max_capacity: parse_var(&var, "MEMORY_DB_MAX_CAPACITY", DEFAULT_MAX_CAPACITY)?,
        })
    }
}

fn parse_var<T, F>(var: &F, name: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            DomainError::configuration(format!("Invalid value '{}' for {}: {}", raw, name, e))
        }),
        None => Ok(default),
    }
}

/// Creates session repositories from configuration
#[derive(Debug, Default)]
pub struct SessionStoreFactory;

impl SessionStoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Connects the configured backend. Redis connection failures are
    /// returned, not retried.
    pub async fn create(
        &self,
        config: &SessionStoreConfig,
    ) -> Result<Arc<dyn SessionRepository>, DomainError> {
        match config.store_type {
            SessionStoreType::InMemory => {
                let repository = InMemorySessionRepository::with_config(
                    InMemorySessionConfig::default()
                        .with_max_capacity(config.max_capacity)
                        .with_ttl(config.ttl),
                );
                info!(ttl = ?config.ttl, "Using in-memory session store");
                Ok(Arc::new(repository))
            }
            SessionStoreType::Redis => {
                let mut redis_config = RedisSessionConfig::new(config.host.clone(), config.port)
                    .with_db(config.db)
                    .with_ttl(config.ttl);

                if let Some(password) = &config.password {
                    redis_config = redis_config.with_password(password.clone());
                }

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                let address = redis_config.address();
                let repository = RedisSessionRepository::new(redis_config).await?;
                info!(address = %address, db = config.db, ttl = ?config.ttl, "Connected to Redis session store");
                Ok(Arc::new(repository))
            }
        }
    }
}
