use async_trait::async_trait;
use std::time::Duration;

/// Key-value store - abstraction over flat storage backends (memory, file, Redis).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// A missing key is `Ok(None)`; a backend failure is an error so callers
    /// can tell "nothing stored" apart from "could not read".
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store a value with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError>;

    /// Delete a key from the store.
    async fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> bool {
        matches!(self.get(key).await, Ok(Some(_)))
    }
}

/// Key-value operation errors.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
