use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered rectangle taking the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Rectangle of at most `width`×`height` hanging below the top-left of `anchor`.
pub fn dropdown_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let x = anchor.x.min(bounds.right().saturating_sub(1));
    let y = anchor.bottom().min(bounds.bottom().saturating_sub(1));
    Rect {
        x,
        y,
        width: width.min(bounds.right().saturating_sub(x)),
        height: height.min(bounds.bottom().saturating_sub(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(area.intersection(popup), popup);
    }

    #[test]
    fn dropdown_is_clipped_to_bounds() {
        let bounds = Rect::new(0, 0, 40, 12);
        let anchor = Rect::new(10, 3, 20, 1);
        let popup = dropdown_rect(anchor, 24, 14, bounds);

        assert_eq!((popup.x, popup.y), (10, 4));
        assert_eq!(popup.height, 8);
        assert_eq!(popup.width, 24);
    }
}
