//! Descriptor → render tree dispatch.

use crate::component::control::ControlTable;
use crate::component::model::{Component, Stack};
use crate::component::node::{ControlId, RenderNode};
use crate::state::StateMap;

/// Everything a resolve pass reads or updates besides the descriptor.
pub struct ResolveContext<'a> {
    controls: &'a mut ControlTable,
    snapshot: &'a StateMap,
}

impl<'a> ResolveContext<'a> {
    pub fn new(controls: &'a mut ControlTable, snapshot: &'a StateMap) -> Self {
        Self { controls, snapshot }
    }
}

/// Resolve a whole tree. Controls that no longer appear are unmounted.
pub fn resolve_tree(
    root: &Component,
    controls: &mut ControlTable,
    snapshot: &StateMap,
) -> RenderNode {
    controls.begin_pass();
    let node = {
        let mut cx = ResolveContext::new(controls, snapshot);
        resolve(root, &ControlId::root(), &mut cx)
    };
    controls.end_pass();
    node
}

/// Resolve one descriptor at `id`. Never fails: an unrecognized kind
/// becomes a placeholder that names it.
pub fn resolve(component: &Component, id: &ControlId, cx: &mut ResolveContext<'_>) -> RenderNode {
    match component {
        Component::Empty => RenderNode::Empty,
        Component::HStack(stack) => RenderNode::Row(resolve_items(stack, id, cx)),
        Component::VStack(stack) => RenderNode::Column(resolve_items(stack, id, cx)),
        Component::Label(label) => RenderNode::Text(label.text.clone()),
        Component::Tabs(_) | Component::Button(_) | Component::TextInput(_) => cx
            .controls
            .resolve(id, component, cx.snapshot)
            .unwrap_or(RenderNode::Empty),
        Component::Unknown { com } => {
            tracing::debug!(com = %com, at = %id, "Unknown component kind");
            RenderNode::Placeholder { com: com.clone() }
        }
    }
}

fn resolve_items(stack: &Stack, id: &ControlId, cx: &mut ResolveContext<'_>) -> Vec<RenderNode> {
    stack
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|child| resolve(child, &id.child(index), cx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::control::Control;

    #[test]
    fn unknown_kind_renders_placeholder() {
        let mut controls = ControlTable::new();
        let node = resolve_tree(
            &Component::Unknown {
                com: "carousel".into(),
            },
            &mut controls,
            &StateMap::new(),
        );
        assert!(node.plain_text().contains("carousel"));
    }

    #[test]
    fn omitted_slots_keep_sibling_positions() {
        let mut controls = ControlTable::new();
        let tree = Component::vstack([
            None,
            Some(Component::label("a")),
            Some(Component::button("b", None)),
        ]);
        let node = resolve_tree(&tree, &mut controls, &StateMap::new());
        assert_eq!(node.texts(), vec!["a".to_string()]);
        assert_eq!(node.focusables(), vec![ControlId::from(vec![2])]);
        assert!(matches!(
            controls.get(&ControlId::from(vec![2])),
            Some(Control::Button { .. })
        ));
    }

    #[test]
    fn vanished_controls_are_unmounted() {
        let mut controls = ControlTable::new();
        let with_input = Component::hstack([Some(Component::text_input(None, Some("value")))]);
        resolve_tree(&with_input, &mut controls, &StateMap::new());
        assert_eq!(controls.len(), 1);
        resolve_tree(&Component::label("gone"), &mut controls, &StateMap::new());
        assert!(controls.is_empty());
    }
}
