//! String key-value storage behind the persistence adapter.
//!
//! Backends report failures as `StorageError`; the adapter in `persistence`
//! is the layer that swallows them.

pub mod file;
pub mod memory;
pub mod persistence;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Flat string store, one value per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
