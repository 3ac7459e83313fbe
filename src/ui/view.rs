//! Draws a resolved [`RenderNode`] tree into a ratatui frame.
//!
//! Every leaf is one row tall. Rows split their width evenly with a one
//! column gap; columns stack children at their natural height.

use crate::component::{ControlId, RenderNode};
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

/// Rows needed to draw `node` without clipping.
pub fn node_height(node: &RenderNode) -> u16 {
    match node {
        RenderNode::Empty => 0,
        RenderNode::Row(children) => children.iter().map(node_height).max().unwrap_or(0),
        RenderNode::Column(children) => children.iter().map(node_height).sum(),
        RenderNode::Text(_)
        | RenderNode::Tabs { .. }
        | RenderNode::Button { .. }
        | RenderNode::TextInput { .. }
        | RenderNode::Placeholder { .. } => 1,
    }
}

pub fn render_node(
    frame: &mut Frame<'_>,
    area: Rect,
    node: &RenderNode,
    focused: Option<&ControlId>,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let is_focused = |id: &ControlId| focused == Some(id);

    match node {
        RenderNode::Empty => {}
        RenderNode::Row(children) => {
            let visible: Vec<&RenderNode> = children
                .iter()
                .filter(|child| !matches!(child, RenderNode::Empty))
                .collect();
            if visible.is_empty() {
                return;
            }
            let rects = Layout::horizontal(vec![Constraint::Fill(1); visible.len()])
                .spacing(1)
                .split(area);
            for (child, rect) in visible.into_iter().zip(rects.iter()) {
                render_node(frame, *rect, child, focused);
            }
        }
        RenderNode::Column(children) => {
            let constraints: Vec<Constraint> = children
                .iter()
                .map(|child| Constraint::Length(node_height(child)))
                .collect();
            let rects = Layout::vertical(constraints).split(area);
            for (child, rect) in children.iter().zip(rects.iter()) {
                render_node(frame, *rect, child, focused);
            }
        }
        RenderNode::Text(text) => {
            frame.render_widget(
                Paragraph::new(text.as_str()).style(Style::default().fg(HEADER_TEXT)),
                area,
            );
        }
        RenderNode::Tabs {
            id,
            titles,
            selected,
        } => {
            let mut highlight = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
            if is_focused(id) {
                highlight = highlight.add_modifier(Modifier::UNDERLINED);
            }
            let tabs = Tabs::new(titles.iter().map(String::as_str))
                .select(*selected)
                .style(Style::default().fg(HEADER_TEXT))
                .highlight_style(highlight);
            frame.render_widget(tabs, area);
        }
        RenderNode::Button { id, text } => {
            let style = if is_focused(id) {
                Style::default()
                    .fg(ACCENT)
                    .bg(ACTIVE_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ACCENT)
            };
            frame.render_widget(Paragraph::new(format!("< {} >", text)).style(style), area);
        }
        RenderNode::TextInput { id, draft } => {
            let focused_here = is_focused(id);
            let style = if focused_here {
                Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT)
            } else {
                Style::default().fg(HEADER_TEXT)
            };
            let line = Line::from(vec![
                Span::styled("> ", Style::default().fg(ACCENT)),
                Span::raw(draft.as_str()),
            ]);
            frame.render_widget(Paragraph::new(line).style(style), area);
            if focused_here {
                let offset = (draft.chars().count() as u16).saturating_add(2);
                let x = area.x + offset.min(area.width.saturating_sub(1));
                frame.set_cursor_position((x, area.y));
            }
        }
        RenderNode::Placeholder { .. } => {
            frame.render_widget(
                Paragraph::new(node.plain_text()).style(
                    Style::default()
                        .fg(STATUS_ERROR)
                        .add_modifier(Modifier::ITALIC),
                ),
                area,
            );
        }
    }
}
