//! Local filesystem blob store.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{BlobStore, Result, StoreError};

/// Blob store mapping keys to files under a root directory.
///
/// Each `/`-separated key segment is a path component, so
/// `2021-04-15/trades.csv` lives at `<root>/2021-04-15/trades.csv`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a key onto a path below the root.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.contains('\\')
            && key
                .split('/')
                .all(|seg| !seg.is_empty() && seg != "." && seg != "..");
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(key.split('/').fold(self.root.clone(), |path, seg| path.join(seg)))
    }

    fn io_error(key: &str, source: std::io::Error) -> StoreError {
        if source.kind() == ErrorKind::NotFound {
            StoreError::NotFound(key.to_string())
        } else {
            StoreError::Io {
                key: key.to_string(),
                source,
            }
        }
    }
}

#[async_trait]
impl BlobStore for FsStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending: Vec<(PathBuf, String)> = vec![(self.root.clone(), String::new())];

        while let Some((dir, dir_key)) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(Self::io_error(&dir_key, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| Self::io_error(&dir_key, e))?
            {
                let name = entry.file_name().to_string_lossy().into_owned();
                // In-flight writes.
                if name.ends_with(".partial") {
                    continue;
                }
                let key = if dir_key.is_empty() {
                    name
                } else {
                    format!("{dir_key}/{name}")
                };
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| Self::io_error(&key, e))?;

                if file_type.is_dir() {
                    // Only descend where a matching key can still appear.
                    if key.starts_with(prefix) || prefix.starts_with(&key) {
                        pending.push((entry.path(), key));
                    }
                } else if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.path_for(key)?;
        let data = fs::read(&path).await.map_err(|e| Self::io_error(key, e))?;
        Ok(Bytes::from(data))
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(key, e))?;
        }

        // Write to a sibling file first so readers never see a partial object.
        let mut partial = path.clone().into_os_string();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        fs::write(&partial, &data)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        fs::rename(&partial, &path)
            .await
            .map_err(|e| Self::io_error(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());

        store
            .put("report1/daily_20210420.csv", Bytes::from_static(b"a,b\n"))
            .await
            .unwrap();

        assert!(temp_dir.path().join("report1/daily_20210420.csv").exists());
        assert!(!temp_dir.path().join("report1/daily_20210420.csv.partial").exists());
        assert_eq!(
            store.get("report1/daily_20210420.csv").await.unwrap(),
            Bytes::from_static(b"a,b\n")
        );
    }

    #[tokio::test]
    async fn test_list_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());
        for key in [
            "2021-04-16/2021-04-16_BINS_XETR15.csv",
            "2021-04-17/2021-04-17_BINS_XETR14.csv",
            "2021-04-17/2021-04-17_BINS_XETR13.csv",
            "meta_file.csv",
        ] {
            store.put(key, Bytes::from_static(b"x")).await.unwrap();
        }

        assert_eq!(
            store.list("2021-04-17").await.unwrap(),
            vec![
                "2021-04-17/2021-04-17_BINS_XETR13.csv",
                "2021-04-17/2021-04-17_BINS_XETR14.csv"
            ]
        );
        assert_eq!(store.list("").await.unwrap().len(), 4);
        assert!(store.list("2021-05").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path().join("absent"));
        assert!(store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());
        assert!(store.get("meta_file.csv").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());

        for key in ["", "../escape.csv", "a//b.csv", "/abs.csv", "a\\b.csv"] {
            assert!(matches!(
                store.get(key).await,
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
