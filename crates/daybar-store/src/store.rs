//! Blob store abstraction.

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Key/value byte storage with prefix listing.
///
/// Keys are `/`-separated paths such as `2021-04-15/2021-04-15_BINS_XETR12.csv`.
/// Implementations perform no retries.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Lists all keys starting with `prefix`, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Reads the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NotFound`] if the key is absent.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Stores `data` under `key`, replacing any previous object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be written.
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;
}
