//! Per-control local state and its lifecycle across re-renders.

use std::collections::{HashMap, HashSet};

use crate::component::binding::{BoundState, RegionContext};
use crate::component::model::Component;
use crate::component::node::{ControlId, RenderNode};
use crate::state::StateMap;

/// Keystroke-level edit of a text input's draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Tabs {
        selected: BoundState<usize>,
        titles: Vec<String>,
    },
    Button {
        text: String,
        onpress: Option<String>,
    },
    TextInput {
        value: BoundState<String>,
        draft: String,
        onsubmit: Option<String>,
    },
}

impl Control {
    /// Fresh control for an interactive descriptor, seeded with the kind's
    /// default value. Non-interactive descriptors have no control.
    pub fn mount(component: &Component) -> Option<Control> {
        match component {
            Component::Tabs(tabs) => Some(Control::Tabs {
                selected: BoundState::new(0, tabs.state.selected.clone()),
                titles: tabs.tabs.clone(),
            }),
            Component::Button(button) => Some(Control::Button {
                text: button.text.clone(),
                onpress: button.onpress.clone(),
            }),
            Component::TextInput(input) => Some(Control::TextInput {
                value: BoundState::new(String::new(), input.state.value.clone()),
                draft: String::new(),
                onsubmit: input.onsubmit.clone(),
            }),
            _ => None,
        }
    }

    /// Whether this control can keep serving `component` at the same
    /// position: same kind and same binding key.
    pub fn is_compatible(&self, component: &Component) -> bool {
        match (self, component) {
            (Control::Tabs { selected, .. }, Component::Tabs(tabs)) => {
                selected.key() == tabs.state.selected.as_deref()
            }
            (Control::Button { .. }, Component::Button(_)) => true,
            (Control::TextInput { value, .. }, Component::TextInput(input)) => {
                value.key() == input.state.value.as_deref()
            }
            _ => false,
        }
    }

    /// Take over the non-state props of a freshly fetched descriptor.
    fn update_props(&mut self, component: &Component) {
        match (self, component) {
            (Control::Tabs { titles, .. }, Component::Tabs(tabs)) => {
                titles.clone_from(&tabs.tabs);
            }
            (Control::Button { text, onpress }, Component::Button(button)) => {
                text.clone_from(&button.text);
                onpress.clone_from(&button.onpress);
            }
            (Control::TextInput { onsubmit, .. }, Component::TextInput(input)) => {
                onsubmit.clone_from(&input.onsubmit);
            }
            _ => {}
        }
    }

    /// Refresh bound values from the store snapshot.
    fn sync(&mut self, snapshot: &StateMap) {
        match self {
            Control::Tabs { selected, .. } => {
                selected.refresh(snapshot);
            }
            Control::TextInput { value, draft, .. } => {
                if value.refresh(snapshot) {
                    draft.clone_from(value.get());
                }
            }
            Control::Button { .. } => {}
        }
    }

    pub fn render(&self, id: &ControlId) -> RenderNode {
        match self {
            Control::Tabs { selected, titles } => RenderNode::Tabs {
                id: id.clone(),
                titles: titles.clone(),
                selected: *selected.get(),
            },
            Control::Button { text, .. } => RenderNode::Button {
                id: id.clone(),
                text: text.clone(),
            },
            Control::TextInput { draft, .. } => RenderNode::TextInput {
                id: id.clone(),
                draft: draft.clone(),
            },
        }
    }

    /// Select a tab. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, ctx: &mut dyn RegionContext) -> bool {
        match self {
            Control::Tabs { selected, titles } if index < titles.len() => {
                selected.set(index, ctx);
                true
            }
            _ => false,
        }
    }

    pub fn press(&mut self, ctx: &mut dyn RegionContext) -> bool {
        match self {
            Control::Button { onpress, .. } => {
                if let Some(name) = onpress {
                    ctx.call_rpc_handler(name);
                }
                true
            }
            _ => false,
        }
    }

    pub fn edit(&mut self, edit: InputEdit) -> bool {
        let Control::TextInput { draft, .. } = self else {
            return false;
        };
        match edit {
            InputEdit::Insert(ch) => draft.push(ch),
            InputEdit::Backspace => {
                draft.pop();
            }
            InputEdit::Clear => draft.clear(),
        }
        true
    }

    /// Commit the draft: write it to bound state, then fire `onsubmit`.
    pub fn submit(&mut self, ctx: &mut dyn RegionContext) -> bool {
        let Control::TextInput {
            value,
            draft,
            onsubmit,
        } = self
        else {
            return false;
        };
        value.set(draft.clone(), ctx);
        if let Some(name) = onsubmit {
            ctx.call_rpc_handler(name);
        }
        true
    }
}

/// Controls alive in the current tree, keyed by position.
///
/// A resolve pass marks every control it touches; controls left unmarked
/// at the end of the pass were unmounted and are dropped.
#[derive(Debug, Default)]
pub struct ControlTable {
    controls: HashMap<ControlId, Control>,
    seen: HashSet<ControlId>,
}

impl ControlTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    pub fn get_mut(&mut self, id: &ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn clear(&mut self) {
        self.controls.clear();
        self.seen.clear();
    }

    pub(crate) fn begin_pass(&mut self) {
        self.seen.clear();
    }

    /// Mount, reuse or replace the control at `id` for `component` and
    /// render it. Returns `None` for non-interactive descriptors.
    pub(crate) fn resolve(
        &mut self,
        id: &ControlId,
        component: &Component,
        snapshot: &StateMap,
    ) -> Option<RenderNode> {
        let reusable = self
            .controls
            .get(id)
            .is_some_and(|control| control.is_compatible(component));
        if !reusable {
            let control = Control::mount(component)?;
            tracing::trace!(control = %id, kind = component.kind(), "Mounting control");
            self.controls.insert(id.clone(), control);
        }
        let control = self.controls.get_mut(id)?;
        control.update_props(component);
        control.sync(snapshot);
        self.seen.insert(id.clone());
        Some(control.render(id))
    }

    pub(crate) fn end_pass(&mut self) {
        let seen = &self.seen;
        self.controls.retain(|id, _| seen.contains(id));
    }
}
