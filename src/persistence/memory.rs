use std::collections::HashMap;

use super::{KeyValueStore, Result};

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of `store_int` calls so far
    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }
}

impl KeyValueStore for MemoryStore {
    fn load_int(&self, key: &str) -> Result<u64> {
        Ok(self.get(key).unwrap_or(0))
    }

    fn store_int(&mut self, key: &str, value: u64) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}
