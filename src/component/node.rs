use std::fmt;

/// Positional address of a control inside the descriptor tree.
///
/// Each entry is the index of the slot in its parent's `items`, counting
/// omitted slots, so a falsy sibling never shifts the identity of the
/// controls after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ControlId(Vec<usize>);

impl ControlId {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn path(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ControlId {
    fn from(path: Vec<usize>) -> Self {
        Self(path)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

/// Output of the resolver: a concrete, drawable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Empty,
    Row(Vec<RenderNode>),
    Column(Vec<RenderNode>),
    Text(String),
    Tabs {
        id: ControlId,
        titles: Vec<String>,
        selected: usize,
    },
    Button {
        id: ControlId,
        text: String,
    },
    TextInput {
        id: ControlId,
        draft: String,
    },
    /// Visible stand-in for a descriptor kind this client cannot render.
    Placeholder { com: String },
}

impl RenderNode {
    /// Interactive controls in document order.
    pub fn focusables(&self) -> Vec<ControlId> {
        let mut out = Vec::new();
        self.collect_focusables(&mut out);
        out
    }

    fn collect_focusables(&self, out: &mut Vec<ControlId>) {
        match self {
            RenderNode::Row(children) | RenderNode::Column(children) => {
                for child in children {
                    child.collect_focusables(out);
                }
            }
            RenderNode::Tabs { id, .. }
            | RenderNode::Button { id, .. }
            | RenderNode::TextInput { id, .. } => out.push(id.clone()),
            RenderNode::Empty | RenderNode::Text(_) | RenderNode::Placeholder { .. } => {}
        }
    }

    /// Text of every label and placeholder, in document order.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            RenderNode::Row(children) | RenderNode::Column(children) => {
                for child in children {
                    child.collect_texts(out);
                }
            }
            RenderNode::Text(text) => out.push(text.clone()),
            RenderNode::Placeholder { .. } => out.push(self.plain_text()),
            _ => {}
        }
    }

    /// Find the node for a control.
    pub fn find(&self, target: &ControlId) -> Option<&RenderNode> {
        match self {
            RenderNode::Row(children) | RenderNode::Column(children) => {
                children.iter().find_map(|child| child.find(target))
            }
            RenderNode::Tabs { id, .. }
            | RenderNode::Button { id, .. }
            | RenderNode::TextInput { id, .. }
                if id == target =>
            {
                Some(self)
            }
            _ => None,
        }
    }

    /// Single-line plain text rendering; rows join with a space, columns
    /// with a newline.
    pub fn plain_text(&self) -> String {
        match self {
            RenderNode::Empty => String::new(),
            RenderNode::Row(children) => children
                .iter()
                .map(RenderNode::plain_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            RenderNode::Column(children) => children
                .iter()
                .map(RenderNode::plain_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            RenderNode::Text(text) => text.clone(),
            RenderNode::Tabs {
                titles, selected, ..
            } => titles
                .iter()
                .enumerate()
                .map(|(i, title)| {
                    if i == *selected {
                        format!("[{}]", title)
                    } else {
                        format!(" {} ", title)
                    }
                })
                .collect::<Vec<_>>()
                .join(""),
            RenderNode::Button { text, .. } => format!("< {} >", text),
            RenderNode::TextInput { draft, .. } => format!("> {}", draft),
            RenderNode::Placeholder { com } => format!("Unknown component: {}", com),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_id_display() {
        assert_eq!(ControlId::root().child(2).child(0).to_string(), "/2/0");
        assert_eq!(ControlId::root().to_string(), "/");
    }

    #[test]
    fn focusables_in_document_order() {
        let a = ControlId::from(vec![0]);
        let b = ControlId::from(vec![1, 0]);
        let node = RenderNode::Column(vec![
            RenderNode::Button {
                id: a.clone(),
                text: "a".into(),
            },
            RenderNode::Row(vec![
                RenderNode::Text("x".into()),
                RenderNode::TextInput {
                    id: b.clone(),
                    draft: String::new(),
                },
            ]),
        ]);
        assert_eq!(node.focusables(), vec![a, b.clone()]);
        assert!(matches!(node.find(&b), Some(RenderNode::TextInput { .. })));
    }
}
