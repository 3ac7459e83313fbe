//! Component descriptors, the resolver that turns them into render trees,
//! and the local control state that survives between fetches.

pub mod binding;
pub mod control;
pub mod model;
pub mod node;
pub mod resolve;

pub use binding::{BindableValue, BoundState, RegionContext};
pub use control::{Control, ControlTable, InputEdit};
pub use model::{
    Button, Component, InputBinding, Label, Stack, Tabs, TabsBinding, TextInput, KNOWN_KINDS,
};
pub use node::{ControlId, RenderNode};
pub use resolve::{resolve, resolve_tree, ResolveContext};
