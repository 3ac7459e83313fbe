//! Bound state: a control-local value mirrored into a store key.
//!
//! Writes go local first, then to the store when a binding key is present.
//! Reads refresh from the store whenever the bound key changed since the
//! control last saw it, so the local copy only ever acts as an editing
//! buffer.

use crate::state::{StateMap, StateValue};

/// Capabilities a region exposes to the controls it renders.
pub trait RegionContext {
    /// Write `value` under `key` and schedule a re-fetch.
    fn set_bound_state(&mut self, key: &str, value: StateValue);

    /// Invoke the provider handler registered under `name`, if any.
    fn call_rpc_handler(&mut self, name: &str);
}

/// Values a control can keep in bound state.
pub trait BindableValue: Clone + PartialEq + Into<StateValue> {
    /// Read the control value back from a store value. `None` means the
    /// store holds something this control cannot display.
    fn from_state(value: &StateValue) -> Option<Self>;
}

impl BindableValue for usize {
    fn from_state(value: &StateValue) -> Option<Self> {
        value.as_index()
    }
}

impl BindableValue for String {
    fn from_state(value: &StateValue) -> Option<Self> {
        match value {
            StateValue::Absent => Some(String::new()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundState<T> {
    value: T,
    key: Option<String>,
    /// Store value under `key` the last time this control synced with it.
    seen: Option<StateValue>,
}

impl<T: BindableValue> BoundState<T> {
    pub fn new(initial: T, key: Option<String>) -> Self {
        Self {
            value: initial,
            key,
            seen: None,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Update the local value, then mirror it into the store if bound.
    pub fn set(&mut self, value: T, ctx: &mut dyn RegionContext) {
        self.value = value.clone();
        if let Some(key) = &self.key {
            let value: StateValue = value.into();
            self.seen = Some(value.clone());
            ctx.set_bound_state(key, value);
        }
    }

    /// Pull the bound key from `snapshot` if it moved since the last sync.
    /// Returns true when the local value was replaced.
    pub fn refresh(&mut self, snapshot: &StateMap) -> bool {
        let Some(key) = &self.key else {
            return false;
        };
        let Some(current) = snapshot.get(key) else {
            return false;
        };
        if self.seen.as_ref() == Some(current) {
            return false;
        }
        self.seen = Some(current.clone());
        match T::from_state(current) {
            Some(value) if value != self.value => {
                self.value = value;
                true
            }
            _ => false,
        }
    }
}
