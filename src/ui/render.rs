use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{body_split, layout_regions, pane_rects};
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use crate::ui::view::render_node;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(app), header);
    frame.render_widget(Clear, body);

    let (panes_area, inspector) = body_split(body, app.show_state());
    draw_panes(frame, panes_area, app);
    if let Some(inspector) = inspector {
        draw_state_inspector(frame, inspector, app);
    }

    frame.render_widget(
        Footer::new().widget(footer, app.error_registry()),
        footer,
    );
}

fn draw_panes(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let rects = pane_rects(area, app.panes().len());
    for (index, (pane, rect)) in app.panes().iter().zip(rects).enumerate() {
        let focused = app
            .focus()
            .filter(|focus| focus.pane == index)
            .map(|focus| &focus.control);
        let border = if focused.is_some() {
            ACCENT
        } else {
            GLOBAL_BORDER
        };
        let block = Block::default()
            .title(format!(" {} ", pane.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        render_node(frame, inner, pane.region().view(), focused);
    }
}

/// Current store contents of every pane, one `key = value` per line.
fn draw_state_inspector(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for pane in app.panes() {
        lines.push(Line::styled(
            pane.title().to_string(),
            Style::default().fg(ACCENT),
        ));
        let state = pane.region().state();
        if state.is_empty() {
            lines.push(Line::styled(
                "  (empty)",
                Style::default().fg(HEADER_SEPARATOR),
            ));
        }
        for (key, value) in state.iter() {
            lines.push(Line::styled(
                format!("  {} = {}", key, value),
                Style::default().fg(HEADER_TEXT),
            ));
        }
    }
    let block = Block::default()
        .title(" State ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
