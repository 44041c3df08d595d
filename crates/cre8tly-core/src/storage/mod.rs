//! Key-value persistence for small pieces of client state.
//!
//! The browser build uses `localStorage`; native builds use a JSON file in
//! the platform data directory. Values are plain strings with no schema
//! versioning.

mod memory;
mod token;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;
pub use token::{ACCESS_TOKEN_KEY, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store.
///
/// On native platforms implementations must be Send + Sync so one store can
/// back several context objects. On WASM these bounds are relaxed since it's
/// single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// String key-value store (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait KeyValueStore {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Data directory name of the native file store.
pub const DEFAULT_NAMESPACE: &str = "cre8tly";

/// Shared handle to a store.
pub type SharedStore = std::sync::Arc<dyn KeyValueStore>;

/// Open the default store for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> StorageResult<FileStore> {
    FileStore::default_location()
}

/// Open the default store for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> StorageResult<LocalStorage> {
    LocalStorage::new()
}
