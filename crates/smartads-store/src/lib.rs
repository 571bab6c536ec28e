//! SmartAds Store — snapshot persistence backends.
//!
//! This crate provides:
//! - [`FileStore`] — one JSON snapshot file on disk, the durable slot
//!   used by the application
//! - [`MemoryStore`] — in-process store for tests
//! - [`StoreError`] — storage-layer error type

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
