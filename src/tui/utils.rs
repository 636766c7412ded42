use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Create a centered rectangle with percentage of the parent area
pub fn centered_rect_percent(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rough number of rows `text` needs when wrapped at `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows: usize = text
        .lines()
        .map(|line| line.width().max(1).div_ceil(width as usize))
        .sum();
    rows.max(1).min(u16::MAX as usize) as u16
}

/// Number of lines and widest line of a block of text-art
pub fn art_size(art: &str) -> (u16, u16) {
    let height = art.lines().count() as u16;
    let width = art.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("0123456789", 10), 1);
        assert_eq!(wrapped_height("0123456789a", 10), 2);
        assert_eq!(wrapped_height("a\nb\n\nc", 10), 4);
        assert_eq!(wrapped_height("abc", 0), 0);
    }

    #[test]
    fn test_art_size() {
        assert_eq!(art_size(" /\\\n/__\\\n"), (4, 2));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect_percent(60, 50, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }
}
