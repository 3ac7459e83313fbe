//! UI region: the fetch → render loop for one provider.
//!
//! A region owns the state store (through its [`Engine`]), the current
//! descriptor tree, the control table and the resolved render tree. Every
//! store change issues a fresh fetch; only the answer to the latest fetch is
//! ever put on screen.

mod engine;
mod phase;

pub use engine::{Completion, Engine, Notifier};
pub use phase::{PhaseIntent, PhaseReducer, RegionPhase};

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::component::{
    resolve_tree, Component, ControlId, ControlTable, InputEdit, RegionContext, RenderNode,
};
use crate::error::{ErrorRegistry, RegionError};
use crate::provider::Provider;
use crate::state::{StateMap, StateValue};

pub struct Region {
    engine: Engine,
    completions: mpsc::UnboundedReceiver<Completion>,
    tree: Component,
    controls: ControlTable,
    view: RenderNode,
    errors: ErrorRegistry,
    renders: u64,
}

impl Region {
    /// Build an unmounted region. Provider calls are spawned on `runtime`.
    pub fn new(provider: Provider, runtime: Handle) -> Self {
        let (tx, completions) = mpsc::unbounded_channel();
        Self {
            engine: Engine::new(provider, runtime, tx),
            completions,
            tree: Component::Empty,
            controls: ControlTable::new(),
            view: RenderNode::Empty,
            errors: ErrorRegistry::default(),
            renders: 0,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.engine.set_notifier(notifier);
        self
    }

    pub fn with_error_registry(mut self, errors: ErrorRegistry) -> Self {
        self.errors = errors;
        self
    }

    /// Start the loop: issue the first fetch with the (empty) state.
    pub fn mount(&mut self) {
        self.engine.mount();
    }

    /// Cancel all outstanding provider calls and drop the state, the tree
    /// and every control. Mounting again starts from scratch.
    pub fn unmount(&mut self) {
        self.engine.unmount();
        self.controls.clear();
        self.tree = Component::Empty;
        self.view = RenderNode::Empty;
        self.renders = 0;
    }

    /// Re-fetch with the current snapshot without changing state.
    pub fn refresh(&mut self) {
        self.engine.issue_fetch();
    }

    pub fn phase(&self) -> RegionPhase {
        self.engine.phase()
    }

    pub fn state(&self) -> Arc<StateMap> {
        self.engine.state()
    }

    pub fn tree(&self) -> &Component {
        &self.tree
    }

    pub fn view(&self) -> &RenderNode {
        &self.view
    }

    pub fn controls(&self) -> &ControlTable {
        &self.controls
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.errors
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Number of trees applied so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Write `value` under `key` and re-fetch.
    pub fn set_bound_state(&mut self, key: &str, value: StateValue) {
        self.engine.set_bound_state(key, value);
        self.rebuild();
    }

    /// Dispatch a handler by name. Unknown names are ignored.
    pub fn call_rpc_handler(&mut self, name: &str) {
        self.engine.call_rpc_handler(name);
    }

    pub fn select_tab(&mut self, id: &ControlId, index: usize) -> bool {
        let Some(control) = self.controls.get_mut(id) else {
            return false;
        };
        let changed = control.select(index, &mut self.engine);
        if changed {
            self.rebuild();
        }
        changed
    }

    pub fn press(&mut self, id: &ControlId) -> bool {
        match self.controls.get_mut(id) {
            Some(control) => control.press(&mut self.engine),
            None => false,
        }
    }

    pub fn edit_input(&mut self, id: &ControlId, edit: InputEdit) -> bool {
        let Some(control) = self.controls.get_mut(id) else {
            return false;
        };
        let changed = control.edit(edit);
        if changed {
            self.rebuild();
        }
        changed
    }

    pub fn submit_input(&mut self, id: &ControlId) -> bool {
        let Some(control) = self.controls.get_mut(id) else {
            return false;
        };
        let submitted = control.submit(&mut self.engine);
        if submitted {
            self.rebuild();
        }
        submitted
    }

    /// Apply every completion that is already available. Never blocks.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns false when
    /// nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.engine.in_flight() == 0 {
            return false;
        }
        match self.completions.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Drive the region until no provider call is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn apply(&mut self, completion: Completion) {
        let seq = completion.seq();
        if !self.engine.finish(seq) {
            tracing::debug!(seq, "Dropping result of cancelled task");
            return;
        }
        match completion {
            Completion::Fetch { seq, result } => {
                let ok = result.is_ok();
                if !self.engine.resolve_fetch(seq, ok) {
                    tracing::debug!(seq, "Discarding superseded fetch result");
                    return;
                }
                match result {
                    Ok(response) => {
                        tracing::debug!(seq, root = response.ui.kind(), "Applying tree");
                        self.tree = response.ui;
                        self.renders += 1;
                        self.rebuild();
                    }
                    Err(source) => self.errors.record(RegionError::FetchFailed { seq, source }),
                }
            }
            Completion::Handler { seq, name, result } => match result {
                Ok(patch) => {
                    if self.engine.merge_handler_result(seq, &name, &patch) {
                        self.rebuild();
                    }
                }
                Err(source) => self
                    .errors
                    .record(RegionError::HandlerFailed { seq, name, source }),
            },
        }
    }

    fn rebuild(&mut self) {
        let snapshot = self.engine.state();
        self.view = resolve_tree(&self.tree, &mut self.controls, &snapshot);
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        self.engine.unmount();
    }
}
