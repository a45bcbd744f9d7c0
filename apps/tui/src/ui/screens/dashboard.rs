use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::ui::widgets::chart::render_household_chart;
use crate::ui::widgets::dropdown::{render_dropdown, render_selector_line};

pub fn render_dashboard<S>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Selector
            Constraint::Min(8),    // Chart
            Constraint::Length(1), // Status
        ])
        .split(area.inner(Margin::new(1, 0)));

    render_title(app, f, layout[0]);
    render_selector_line(&app.dashboard.selector, app.dropdown_open, f, layout[1]);

    if let Some(chart) = &app.dashboard.chart {
        let title = app
            .dashboard
            .selector
            .current_option()
            .map_or_else(String::new, |option| format!(" {} ", option.text));
        render_household_chart(chart, &title, f, layout[2]);
    }

    render_status(app, f, layout[3]);

    if app.dropdown_open {
        render_dropdown(&app.dashboard.selector, f, layout[1]);
    }
}

fn render_title<S>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled(
        "Taipei Households",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(origin) = app.dashboard.origin {
        spans.push(Span::styled(
            format!("  ({})", origin.label()),
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_status<S>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let line = if app.dashboard.status_message.is_empty() {
        TextLine::from(Span::styled(
            "↑/↓ choose district | F1 help | q quit",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        TextLine::from(Span::styled(
            app.dashboard.status_message.clone(),
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}
