//! Shared key/value state consumed by providers and written by controls.

mod store;
mod value;

pub use store::StateStore;
pub use value::{StateMap, StateValue};
