use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::chart::{AxisRange, HouseholdChart, DEFAULT_MAX_TICKS};
use crate::domain::{Count, Gender};

const AXIS_WIDTH: u16 = 8;

pub const fn gender_color(gender: Gender) -> Color {
    let (r, g, b) = gender.rgb();
    Color::Rgb(r, g, b)
}

/// Bar height above the axis floor. Invalid counts and values below the floor are empty.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bar_height(count: Count, axis: &AxisRange) -> u64 {
    count
        .value()
        .map_or(0, |value| (value as f64 - axis.min).max(0.0).floor() as u64)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn axis_span(axis: &AxisRange) -> u64 {
    ((axis.max - axis.min).ceil() as u64).max(1)
}

fn bar<'a>(count: Count, gender: Gender, axis: &AxisRange) -> Bar<'a> {
    Bar::default()
        .value(bar_height(count, axis))
        .text_value(count.to_string())
        .style(Style::default().fg(gender_color(gender)))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(gender_color(gender))
                .add_modifier(Modifier::BOLD),
        )
}

pub fn render_household_chart(chart: &HouseholdChart, title: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(AXIS_WIDTH), Constraint::Min(10)])
        .split(rows[0]);

    f.render_widget(render_legend(chart), rows[1]);

    let Some(axis) = chart.value_axis(DEFAULT_MAX_TICKS) else {
        let paragraph = Paragraph::new("No valid counts for this district")
            .alignment(Alignment::Center);
        f.render_widget(paragraph, rows[0]);
        return;
    };

    render_axis_labels(&axis, f, columns[0]);

    let mut bar_chart = BarChart::default()
        .bar_width(7)
        .bar_gap(1)
        .group_gap(4)
        .max(axis_span(&axis));
    for (index, category) in chart.categories().into_iter().enumerate() {
        let bars: Vec<Bar<'_>> = chart
            .datasets()
            .iter()
            .map(|dataset| bar(dataset.data[index], dataset.gender, &axis))
            .collect();
        bar_chart = bar_chart.data(
            BarGroup::default()
                .label(TextLine::from(category))
                .bars(&bars),
        );
    }

    f.render_widget(bar_chart, columns[1]);
}

fn render_axis_labels(axis: &AxisRange, f: &mut Frame<'_>, area: Rect) {
    if area.height < 2 {
        return;
    }

    // Top of the bars sits at `max`, the baseline above the group labels at `min`
    let label_style = Style::default().fg(Color::Gray);
    let mut lines = vec![TextLine::from(Span::styled(format!("{:>7}", axis.max), label_style))];
    let filler = area.height.saturating_sub(3);
    lines.extend((0..filler).map(|_| TextLine::from("")));
    lines.push(TextLine::from(Span::styled(format!("{:>7}", axis.min), label_style)));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_legend(chart: &HouseholdChart) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for dataset in chart.datasets() {
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(gender_color(dataset.gender)),
        ));
        spans.push(Span::raw(format!("{}  ", dataset.label())));
    }
    Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center)
}
