use ratatui::layout::{Constraint, Layout, Rect};

/// Split the screen into header, body and footer bands.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Body split into the pane column and, when shown, the state inspector.
pub fn body_split(body: Rect, show_state: bool) -> (Rect, Option<Rect>) {
    if !show_state {
        return (body, None);
    }
    let [panes, inspector] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(body);
    (panes, Some(inspector))
}

/// Equal-height stacked pane areas.
pub fn pane_rects(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    Layout::vertical(vec![Constraint::Fill(1); count])
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_cover_the_screen() {
        let (header, body, footer) = layout_regions(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 3);
        assert_eq!(body.height, 18);
        assert_eq!(footer.y, 21);
    }

    #[test]
    fn tiny_screen_gives_body_nothing() {
        let (header, body, footer) = layout_regions(Rect::new(0, 0, 80, 4));
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 1);
        assert_eq!(body.height, 0);
    }

    #[test]
    fn panes_share_the_height() {
        let rects = pane_rects(Rect::new(0, 0, 40, 30), 3);
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.height == 10));
        assert!(pane_rects(Rect::new(0, 0, 40, 30), 0).is_empty());
    }
}
