//! Model-View-Intent primitives.
//!
//! State machines in this crate (the render loop phase, for one) are written
//! as a pure reducer over an immutable state:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Side effects (spawning fetches, swapping trees) happen around the
//! reducer call, never inside it.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
