//! Activity histogram view.
//!
//! Renders the per-hour-of-day and per-day-of-week swipe histograms as
//! bar charts, split by duty status.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{BarChart, Block, Borders},
    Frame,
};

use duty_data::aggregator::StatusCounts;

use crate::themes::Theme;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render the activity histograms into `area`.
///
/// Top half: swipes by hour of day (DutyOn left, DutyOff right).
/// Bottom half: swipes by weekday, same split.
pub fn render_activity_view(
    frame: &mut Frame,
    area: Rect,
    hourly: &[StatusCounts; 24],
    weekday: &[StatusCounts; 7],
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let hour_labels: Vec<String> = (0..24).map(|h| format!("{:02}", h)).collect();
    let on_by_hour: Vec<(&str, u64)> = hour_labels
        .iter()
        .zip(hourly.iter())
        .map(|(label, counts)| (label.as_str(), counts.duty_on))
        .collect();
    let off_by_hour: Vec<(&str, u64)> = hour_labels
        .iter()
        .zip(hourly.iter())
        .map(|(label, counts)| (label.as_str(), counts.duty_off))
        .collect();

    let on_by_weekday: Vec<(&str, u64)> = WEEKDAY_LABELS
        .iter()
        .zip(weekday.iter())
        .map(|(label, counts)| (*label, counts.duty_on))
        .collect();
    let off_by_weekday: Vec<(&str, u64)> = WEEKDAY_LABELS
        .iter()
        .zip(weekday.iter())
        .map(|(label, counts)| (*label, counts.duty_off))
        .collect();

    render_split_charts(
        frame,
        rows[0],
        " Duty On by Hour ",
        &on_by_hour,
        " Duty Off by Hour ",
        &off_by_hour,
        2,
        theme,
    );
    render_split_charts(
        frame,
        rows[1],
        " Duty On by Weekday ",
        &on_by_weekday,
        " Duty Off by Weekday ",
        &off_by_weekday,
        4,
        theme,
    );
}

// ── Internal ──────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn render_split_charts(
    frame: &mut Frame,
    area: Rect,
    on_title: &str,
    on_data: &[(&str, u64)],
    off_title: &str,
    off_data: &[(&str, u64)],
    bar_width: u16,
    theme: &Theme,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let on_chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(on_title))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(theme.status_on)
        .value_style(theme.value)
        .label_style(theme.label)
        .data(on_data);
    frame.render_widget(on_chart, halves[0]);

    let off_chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(off_title))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(theme.status_off)
        .value_style(theme.value)
        .label_style(theme.label)
        .data(off_data);
    frame.render_widget(off_chart, halves[1]);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
