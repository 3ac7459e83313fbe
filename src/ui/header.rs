use crate::region::RegionPhase;
use crate::ui::app::App;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK, STATUS_PENDING,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// App name followed by each pane's loop phase.
    pub fn widget(&self, app: &App) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "remote-ui",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ];
        for pane in app.panes() {
            let phase = pane.region().phase();
            let status_color = match phase {
                RegionPhase::Fetching { .. } => STATUS_PENDING,
                RegionPhase::Rendered => STATUS_OK,
                RegionPhase::Idle => HEADER_SEPARATOR,
            };
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(pane.title().to_string(), text_style));
            spans.push(Span::styled(" ", text_style));
            spans.push(Span::styled(
                phase.label(),
                Style::default().fg(status_color),
            ));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
