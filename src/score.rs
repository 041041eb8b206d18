//! Persistent score counter
//!
//! Loaded once from storage, bumped by a fixed amount per collected bonus.
//! Every change is pushed to the single registered observer and then
//! written back to storage, in that order.

use crate::consts::{BONUS_INCREMENT, SCORE_KEY};
use crate::persistence::{KeyValueStore, Result};

/// Callback receiving each new score value
pub type ScoreObserver = Box<dyn FnMut(u64)>;

/// Score counter backed by a key-value store
pub struct ScoreStore<S: KeyValueStore> {
    store: S,
    value: u64,
    observer: Option<ScoreObserver>,
}

impl<S: KeyValueStore> ScoreStore<S> {
    /// Open the counter, reading its initial value from `store`
    pub fn open(store: S) -> Result<Self> {
        let value = store.load_int(SCORE_KEY)?;
        log::info!("Loaded score {}", value);
        Ok(Self {
            store,
            value,
            observer: None,
        })
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Add one bonus worth of points. Returns the new score.
    pub fn add_bonus(&mut self) -> Result<u64> {
        self.value = self.value.saturating_add(BONUS_INCREMENT);
        if let Some(observer) = self.observer.as_mut() {
            observer(self.value);
        }
        self.store.store_int(SCORE_KEY, self.value)?;
        Ok(self.value)
    }

    /// Register the observer, replacing any previous one
    pub fn set_observer(&mut self, observer: impl FnMut(u64) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for ScoreStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("store", &self.store)
            .field("value", &self.value)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
