//! Session repository trait

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Outcome of a repository read.
///
/// A miss is `NotFound`, never an empty `Found`, so a stored empty value and
/// an absent key stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Found(Bytes),
    NotFound,
}

impl StoredValue {
    pub fn found(data: impl Into<Bytes>) -> Self {
        Self::Found(data.into())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<Bytes> {
        match self {
            Self::Found(data) => Some(data),
            Self::NotFound => None,
        }
    }
}

impl From<Option<Bytes>> for StoredValue {
    fn from(value: Option<Bytes>) -> Self {
        match value {
            Some(data) => Self::Found(data),
            None => Self::NotFound,
        }
    }
}

/// Storage contract for sessions, implemented by every TTL-capable
/// key-value backend.
///
/// Values are opaque bytes. The TTL is fixed by the backend configuration,
/// not chosen per call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores `value` under `key`, replacing any existing value and resetting
    /// its TTL
    async fn set(&self, key: &str, value: Bytes) -> Result<(), DomainError>;

    /// Reads the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<StoredValue, DomainError>;

    /// Removes `key`, returning how many keys were removed (0 or 1)
    async fn delete(&self, key: &str) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_value_from_option() {
        assert_eq!(StoredValue::from(None), StoredValue::NotFound);
        assert_eq!(
            StoredValue::from(Some(Bytes::from_static(b"{}"))),
            StoredValue::found(&b"{}"[..])
        );
    }

    #[test]
    fn test_empty_found_is_not_not_found() {
        let empty = StoredValue::found(Bytes::new());

        assert!(empty.is_found());
        assert_ne!(empty, StoredValue::NotFound);
        assert_eq!(empty.into_option(), Some(Bytes::new()));
    }

    #[tokio::test]
    async fn test_mock_session_repository() {
        let mut mock = MockSessionRepository::new();

        mock.expect_get()
            .withf(|key| key == "abc")
            .returning(|_| Ok(StoredValue::NotFound));
        mock.expect_delete().returning(|_| Ok(0));

        assert_eq!(mock.get("abc").await.unwrap(), StoredValue::NotFound);
        assert_eq!(mock.delete("abc").await.unwrap(), 0);
    }
}
