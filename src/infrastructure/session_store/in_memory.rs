//! In-memory session store using moka

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache as MokaCache;

use crate::domain::{DomainError, SessionRepository, StoredValue};

/// Configuration for the in-memory session store
#[derive(Debug, Clone)]
pub struct InMemorySessionConfig {
    /// Maximum number of sessions kept before eviction
    pub max_capacity: u64,
    /// Lifetime of every session, counted from its last write. `None`
    /// keeps sessions until they are deleted or evicted.
    pub ttl: Option<Duration>,
}

impl Default for InMemorySessionConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
            ttl: Some(Duration::from_secs(60 * 60 * 24)),
        }
    }
}

impl InMemorySessionConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<Option<Duration>>) -> Self {
        self.ttl = ttl.into();
        self
    }
}

/// Process-local session store.
///
/// Sessions are lost on restart and not shared between replicas, so this is
/// meant for development and tests.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    cache: MokaCache<String, Bytes>,
    config: InMemorySessionConfig,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_config(InMemorySessionConfig::default())
    }

    pub fn with_config(config: InMemorySessionConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        let cache = builder.build();

        Self { cache, config }
    }

    pub fn config(&self) -> &InMemorySessionConfig {
        &self.config
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn set(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredValue, DomainError> {
        Ok(self.cache.get(key).await.into())
    }

    async fn delete(&self, key: &str) -> Result<u64, DomainError> {
        let removed = self.cache.remove(key).await;
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionValue;

    #[tokio::test]
    async fn test_set_and_get() {
        let repository = InMemorySessionRepository::new();

        repository
            .set("someSessionTestKey", Bytes::from_static(br#"{"someSessionTest":"Value"}"#))
            .await
            .unwrap();

        let stored = repository.get("someSessionTestKey").await.unwrap();
        assert_eq!(stored, StoredValue::found(&br#"{"someSessionTest":"Value"}"#[..]));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repository = InMemorySessionRepository::new();

        let stored = repository.get("thisSessionKeyShouldNotExist").await.unwrap();
        assert_eq!(stored, StoredValue::NotFound);
    }

    #[tokio::test]
    async fn test_stored_empty_value_is_found() {
        let repository = InMemorySessionRepository::new();

        repository.set("empty", Bytes::new()).await.unwrap();

        assert_eq!(repository.get("empty").await.unwrap(), StoredValue::found(Bytes::new()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repository = InMemorySessionRepository::new();
        repository.set("k", Bytes::from_static(b"{}")).await.unwrap();

        assert_eq!(repository.delete("k").await.unwrap(), 1);
        assert_eq!(repository.delete("k").await.unwrap(), 0);
        assert_eq!(repository.get("k").await.unwrap(), StoredValue::NotFound);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let repository = InMemorySessionRepository::new();

        repository.set("k", Bytes::from_static(b"{\"v\":1}")).await.unwrap();
        repository.set("k", Bytes::from_static(b"{\"v\":2}")).await.unwrap();

        let data = repository.get("k").await.unwrap().into_option().unwrap();
        assert_eq!(
            SessionValue::decode(&data).unwrap(),
            SessionValue::new().with_field("v", 2)
        );
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let repository = InMemorySessionRepository::with_config(
            InMemorySessionConfig::default().with_ttl(Duration::from_millis(100)),
        );

        repository.set("short-lived", Bytes::from_static(b"{}")).await.unwrap();
        assert!(repository.get("short-lived").await.unwrap().is_found());

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(repository.get("short-lived").await.unwrap(), StoredValue::NotFound);
    }

    #[tokio::test]
    async fn test_entries_without_ttl_do_not_expire() {
        let repository =
            InMemorySessionRepository::with_config(InMemorySessionConfig::default().with_ttl(None));

        repository.set("long-lived", Bytes::from_static(b"{\"x\":1}")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            repository.get("long-lived").await.unwrap(),
            StoredValue::found(Bytes::from_static(b"{\"x\":1}"))
        );
    }

    #[test]
    fn test_config_builders() {
        let config = InMemorySessionConfig::default()
            .with_max_capacity(10)
            .with_ttl(Duration::from_secs(5));

        assert_eq!(config.max_capacity, 10);
        assert_eq!(config.ttl, Some(Duration::from_secs(5)));
    }
}
