//! Copy-on-write state store.
//!
//! The store never hands out a mutable map. Readers get an `Arc` snapshot
//! that stays valid (and unchanged) after later writes; writers replace the
//! whole map and every subscriber sees the new snapshot.

use std::sync::Arc;

use tokio::sync::watch;

use super::value::{StateMap, StateValue};

pub struct StateStore {
    tx: watch::Sender<Arc<StateMap>>,
    version: u64,
}

impl StateStore {
    pub fn new() -> Self {
        Self::with_initial(StateMap::new())
    }

    pub fn with_initial(initial: StateMap) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx, version: 0 }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<StateMap> {
        Arc::clone(&self.tx.borrow())
    }

    /// Replace the whole map.
    pub fn set(&mut self, next: StateMap) {
        self.version += 1;
        self.tx.send_replace(Arc::new(next));
    }

    /// Overwrite a single key on a copy of the current map.
    pub fn set_bound(&mut self, key: &str, value: StateValue) {
        let next = self.get().with(key, value);
        self.set(next);
    }

    /// Shallow-merge `patch` into a copy of the current map.
    pub fn merge(&mut self, patch: &StateMap) {
        let next = self.get().merged(patch);
        self.set(next);
    }

    /// Number of `set` calls since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Watch every snapshot. The channel closes when the store is dropped.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StateMap>> {
        self.tx.subscribe()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
