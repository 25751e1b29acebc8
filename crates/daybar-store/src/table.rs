//! Table-level reads and writes on top of a [`BlobStore`].

use bytes::Bytes;
use daybar_format::OutputFormat;
use daybar_types::Table;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{BlobStore, Result, StoreError};

/// Reads and writes [`Table`] values through a blob store.
///
/// The codec for reads is chosen from the key's extension. Writes take an
/// explicit format name.
#[derive(Debug, Clone)]
pub struct TableStore {
    store: Arc<dyn BlobStore>,
}

impl TableStore {
    /// Wraps a blob store.
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying blob store.
    #[must_use]
    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Lists keys under `prefix`, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let keys = self.store.list(prefix).await?;
        debug!(prefix, count = keys.len(), "Listed keys");
        Ok(keys)
    }

    /// Reads and decodes the table stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the key is absent and
    /// [`StoreError::Decode`] if the bytes do not parse.
    pub async fn read_table(&self, key: &str) -> Result<Table> {
        let format = OutputFormat::for_key(key);
        debug!(key, %format, "Reading table");
        let data = self.store.get(key).await?;
        format.decode(data).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }

    /// Encodes `table` as `format` and stores it under `key`.
    ///
    /// Returns `false` without touching the store when the table has no
    /// rows. Nothing is written for an unrecognized format name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnsupportedFormat`] for a format name other
    /// than `csv` or `parquet`.
    pub async fn write_table(&self, table: &Table, key: &str, format: &str) -> Result<bool> {
        if table.is_empty() {
            info!(key, "The table is empty, no file will be written");
            return Ok(false);
        }

        let format: OutputFormat = format.parse().map_err(|_| {
            warn!(key, format, "The file format is not supported");
            StoreError::UnsupportedFormat(format.to_string())
        })?;

        let data = format.encode(table).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        info!(key, rows = table.len(), bytes = data.len(), %format, "Writing table");
        self.store.put(key, Bytes::from(data)).await?;
        Ok(true)
    }
}
