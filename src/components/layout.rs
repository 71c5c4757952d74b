//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Quote screen layout areas
pub struct QuoteLayout {
    pub header: Rect,
    pub table: Rect,
    pub summary: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the quote screen layout
///
/// Vertical stack: header bar, line-item table, summary panel,
/// optional status line, help bar.
pub fn calculate_quote_layout(area: Rect, has_status: bool) -> QuoteLayout {
    let chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(area)
    };

    if has_status {
        QuoteLayout {
            header: chunks[0],
            table: chunks[1],
            summary: chunks[2],
            status: Some(chunks[3]),
            help: chunks[4],
        }
    } else {
        QuoteLayout {
            header: chunks[0],
            table: chunks[1],
            summary: chunks[2],
            status: None,
            help: chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_centered_popup_clamps_to_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_quote_layout_with_status() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_quote_layout(area, true);
        assert!(layout.status.is_some());
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.help.height, 3);
    }
}
