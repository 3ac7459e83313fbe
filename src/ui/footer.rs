use crate::error::ErrorRegistry;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HINTS: &str =
    " Tab: Focus │ ←/→: Tabs │ Enter: Press/Submit │ Ctrl+R: Refresh │ F2: State │ Esc: Quit";

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints, or the latest region error while one is on record.
    pub fn widget(&self, area: Rect, errors: &ErrorRegistry) -> Paragraph<'static> {
        let (text, text_style) = match errors.last() {
            Some(error) => (
                format!(" {}", error),
                Style::default().fg(STATUS_ERROR),
            ),
            None => (
                HINTS.to_string(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
            ),
        };
        let version = format!("v{} ", VERSION);

        // Pad by char count, not bytes
        let text_width = text.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(text_width)
            .saturating_sub(version_width);

        let line = Line::from(vec![
            Span::styled(text, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
