use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::selection::SelectionController;
use crate::ui::widgets::popup::dropdown_rect;

const DROPDOWN_WIDTH: u16 = 24;

/// The closed control: label plus current value.
pub fn render_selector_line(selector: &SelectionController, open: bool, f: &mut Frame<'_>, area: Rect) {
    let value = selector
        .current_option()
        .map_or("(none)", |option| option.text.as_str());
    let arrow = if open { "▲" } else { "▼" };

    let line = TextLine::from(vec![
        Span::styled("District: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("[ {value} {arrow} ]"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The open list, drawn over whatever lies below `anchor`.
pub fn render_dropdown(selector: &SelectionController, f: &mut Frame<'_>, anchor: Rect) {
    let options = selector.options();
    let height = u16::try_from(options.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = dropdown_rect(anchor, DROPDOWN_WIDTH, height, f.area());
    if area.height < 3 {
        return;
    }

    let selected = selector.selected_index();
    let items: Vec<ListItem<'_>> = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let marker = if Some(index) == selected { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", option.text))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(Some(selector.highlighted()));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
