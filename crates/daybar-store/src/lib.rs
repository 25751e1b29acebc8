//! Blob storage for the daybar report job.
//!
//! - [`BlobStore`] - Key/value byte storage with prefix listing
//! - [`FsStore`] - Local directory backend
//! - [`MemoryStore`] - In-process backend
//! - [`TableStore`] - Table reads and writes with codec selection

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod fs;
mod memory;
mod store;
mod table;

pub use error::{Result, StoreError};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use store::BlobStore;
pub use table::TableStore;
