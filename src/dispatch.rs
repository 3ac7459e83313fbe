//! Handler dispatch: name resolution and patch merge.
//!
//! A missing handler is a configuration gap, not a failure: resolving it
//! yields nothing and the caller leaves state alone.

use std::sync::Arc;

use crate::provider::{HandlerTable, RpcHandler};
use crate::state::{StateMap, StateStore};

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    handlers: HandlerTable,
}

impl Dispatcher {
    pub fn new(handlers: HandlerTable) -> Self {
        Self { handlers }
    }

    /// Find the handler registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn RpcHandler>> {
        let handler = self.handlers.get(name);
        if handler.is_none() {
            tracing::debug!(handler = %name, "No handler registered, ignoring");
        }
        handler
    }

    /// Shallow-merge a handler patch into the store. Returns the keys it
    /// wrote.
    pub fn apply(store: &mut StateStore, patch: &StateMap) -> Vec<String> {
        store.merge(patch);
        patch.keys().map(str::to_string).collect()
    }
}
