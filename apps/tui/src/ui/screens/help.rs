use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::widgets::popup::centered_rect;

const KEYS: [(&str, &str); 6] = [
    ("↑ / ↓ / Enter", "Open the district list"),
    ("↑ / ↓", "Move in the open list"),
    ("Enter", "Show the highlighted district"),
    ("Esc", "Close the list or this help"),
    ("F1", "Toggle help"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<TextLine<'_>> = KEYS
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:<16}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}
