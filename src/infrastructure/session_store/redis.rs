//! Redis session store

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::domain::{DomainError, SessionRepository, StoredValue};

/// Configuration for the Redis session store
#[derive(Clone)]
pub struct RedisSessionConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// Logical database index
    pub db: i64,
    /// Lifetime of every session, counted from its last write. `None`
    /// writes without an expiry.
    pub ttl: Option<Duration>,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    pub connection_timeout: Duration,
}

impl fmt::Debug for RedisSessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("db", &self.db)
            .field("ttl", &self.ttl)
            .field("key_prefix", &self.key_prefix)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

impl Default for RedisSessionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: None,
            db: 0,
            ttl: Some(Duration::from_secs(60 * 60 * 24)),
            key_prefix: None,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisSessionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<Option<Duration>>) -> Self {
        self.ttl = ttl.into();
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// `host:port`, for logs
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// Redis-backed session store.
///
/// Each session is a plain string key written with `SET .. EX` (or a bare
/// `SET` when no TTL is configured), so expiry is handled entirely by Redis.
#[derive(Clone)]
pub struct RedisSessionRepository {
    connection: ConnectionManager,
    config: RedisSessionConfig,
}

impl fmt::Debug for RedisSessionRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionRepository")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisSessionRepository {
    /// Connects to Redis, failing if no connection is established within the
    /// configured timeout
    pub async fn new(config: RedisSessionConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.connection_info())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection =
            tokio::time::timeout(config.connection_timeout, ConnectionManager::new(client))
                .await
                .map_err(|_| {
                    DomainError::cache(format!(
                        "Timed out connecting to Redis at {} after {:?}",
                        config.address(),
                        config.connection_timeout
                    ))
                })?
                .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    fn prefix_key(&self, key: &str) -> String {
        prefixed(self.config.key_prefix.as_deref(), key)
    }
}

fn prefixed(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
    async fn set(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<()> = match self.config.ttl {
            Some(ttl) => {
                conn.set_ex(&prefixed_key, &value[..], ttl.as_secs().max(1))
                    .await
            }
            None => conn.set(&prefixed_key, &value[..]).await,
        };

        result.map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredValue, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<Vec<u8>> = conn
            .get(&prefixed_key)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(result.map(Bytes::from).into())
    }

    async fn delete(&self, key: &str) -> Result<u64, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let deleted: u64 = conn
            .del(&prefixed_key)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests require a running Redis instance
    // Run with: cargo test -- --ignored

    fn get_test_config() -> RedisSessionConfig {
        RedisSessionConfig::new("127.0.0.1", 6379)
            .with_key_prefix("session-svc-test")
            .with_ttl(Duration::from_secs(60))
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get() {
        let repository = RedisSessionRepository::new(get_test_config()).await.unwrap();
        let value = Bytes::from_static(br#"{"someSessionTest":"Value"}"#);

        repository.set("someSessionTestKey", value.clone()).await.unwrap();

        let stored = repository.get("someSessionTestKey").await.unwrap();
        assert_eq!(stored, StoredValue::Found(value));

        repository.delete("someSessionTestKey").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_get_missing() {
        let repository = RedisSessionRepository::new(get_test_config()).await.unwrap();

        let stored = repository.get("thisSessionKeyShouldNotExist").await.unwrap();
        assert_eq!(stored, StoredValue::NotFound);
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_delete_is_idempotent() {
        let repository = RedisSessionRepository::new(get_test_config()).await.unwrap();

        repository
            .set("someDeleteTestKey", Bytes::from_static(br#"{"someDeleteTest":"Value"}"#))
            .await
            .unwrap();

        assert_eq!(repository.delete("someDeleteTestKey").await.unwrap(), 1);
        assert_eq!(repository.delete("someDeleteTestKey").await.unwrap(), 0);
        assert_eq!(
            repository.get("someDeleteTestKey").await.unwrap(),
            StoredValue::NotFound
        );
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_without_ttl_has_no_expiry() {
        let repository = RedisSessionRepository::new(get_test_config().with_ttl(None))
            .await
            .unwrap();

        repository
            .set("somePersistentKey", Bytes::from_static(br#"{"x":1}"#))
            .await
            .unwrap();

        let mut conn = repository.connection.clone();
        let ttl: i64 = conn
            .ttl("session-svc-test:somePersistentKey")
            .await
            .unwrap();
        assert_eq!(ttl, -1);

        repository.delete("somePersistentKey").await.unwrap();
    }

    #[test]
    fn test_ttl_builder() {
        assert_eq!(
            RedisSessionConfig::default().ttl,
            Some(Duration::from_secs(86400))
        );
        assert_eq!(RedisSessionConfig::default().with_ttl(None).ttl, None);
        assert_eq!(
            RedisSessionConfig::default()
                .with_ttl(Duration::from_secs(5))
                .ttl,
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(prefixed(Some("myapp"), "abc"), "myapp:abc");
        assert_eq!(prefixed(None, "abc"), "abc");
    }

    #[test]
    fn test_connection_info() {
        let config = RedisSessionConfig::new("cache.internal", 6380)
            .with_password("hunter2")
            .with_db(3);

        let info = config.connection_info();

        assert_eq!(info.addr, ConnectionAddr::Tcp("cache.internal".to_string(), 6380));
        assert_eq!(info.redis.db, 3);
        assert_eq!(info.redis.password.as_deref(), Some("hunter2"));
        assert_eq!(config.address(), "cache.internal:6380");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RedisSessionConfig::default().with_password("hunter2");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
