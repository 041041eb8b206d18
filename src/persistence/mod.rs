//! Integer key-value persistence
//!
//! The game only ever stores one counter, so the contract is a plain
//! `load_int` / `store_int` pair. Backends:
//! - `MemoryStore`: in-process map (tests, headless runs without a file)
//! - `JsonFileStore`: one JSON object per file, written via tmp + rename

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Storage failure. Callers treat these as fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt store {path}: key {key:?} is not a non-negative integer")]
    Corrupt { path: PathBuf, key: String },
}

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent integer storage
pub trait KeyValueStore {
    /// Read a value; absent keys read as 0
    fn load_int(&self, key: &str) -> Result<u64>;

    /// Write a value durably
    fn store_int(&mut self, key: &str, value: u64) -> Result<()>;
}
