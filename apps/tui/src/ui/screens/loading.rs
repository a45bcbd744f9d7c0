use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::app::App;
use crate::ui::widgets::popup::centered_rect;

pub fn render_loading<S>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let throbber = Throbber::default()
        .label("Loading household data...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_EIGHT);

    let paragraph = Paragraph::new(throbber.to_line(&app.throbber_state))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    let mut popup = centered_rect(60, 20, area);
    popup.height = popup.height.max(3);
    f.render_widget(paragraph, popup);
}
