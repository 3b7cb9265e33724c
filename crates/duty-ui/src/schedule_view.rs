//! Per-employee schedule view.
//!
//! Shows every attended date for one employee with the first-on /
//! last-off times and the reconstructed session length. Dates where a
//! swipe side is missing render "N/A" in the hours column.

use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use duty_core::formatting::format_hours;
use duty_core::models::DayPresence;
use duty_core::time_utils::weekday_name;

use crate::table_view::fit_width;
use crate::themes::Theme;

const TIME_FMT: &str = "%H:%M:%S";

/// Render the schedule of one employee into `area`.
///
/// `position` is the 1-based (selected, total) employee pair shown in
/// the header so users know where Up/Down will take them. `days` must
/// already be filtered to the employee and sorted by date.
pub fn render_schedule_view(
    frame: &mut Frame,
    area: Rect,
    employee: &str,
    days: &[&DayPresence],
    position: (usize, usize),
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    render_summary(frame, chunks[0], employee, days, position, theme);
    render_days_table(frame, chunks[1], days, theme);
}

// ── Internal ──────────────────────────────────────────────────────────────────

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    employee: &str,
    days: &[&DayPresence],
    position: (usize, usize),
    theme: &Theme,
) {
    let on_total: u32 = days.iter().map(|d| d.duty_on_count).sum();
    let off_total: u32 = days.iter().map(|d| d.duty_off_count).sum();
    let full_sessions = days.iter().filter(|d| d.has_full_session()).count();

    let lines = vec![
        Line::from(vec![
            Span::styled(fit_width(employee, 40), theme.selection),
            Span::styled(
                format!("  ({}/{}, ↑/↓ to switch)", position.0, position.1),
                theme.dim,
            ),
        ]),
        Line::from(vec![
            Span::styled("Days: ", theme.label),
            Span::styled(days.len().to_string(), theme.value),
            Span::styled("   Duty On: ", theme.label),
            Span::styled(on_total.to_string(), theme.status_on),
            Span::styled("   Duty Off: ", theme.label),
            Span::styled(off_total.to_string(), theme.status_off),
            Span::styled("   Full sessions: ", theme.label),
            Span::styled(full_sessions.to_string(), theme.value),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(" Schedule ")),
        area,
    );
}

fn render_days_table(frame: &mut Frame, area: Rect, days: &[&DayPresence], theme: &Theme) {
    let header_cells = ["Date", "Weekday", "Duty On", "Duty Off", "Swipes", "Hours"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };

            let on_cell = match day.first_on {
                Some(t) => Cell::from(t.format(TIME_FMT).to_string()).style(theme.status_on),
                None => Cell::from("—").style(theme.status_missing),
            };
            let off_cell = match day.last_off {
                Some(t) => Cell::from(t.format(TIME_FMT).to_string()).style(theme.status_off),
                None => Cell::from("—").style(theme.status_missing),
            };
            let hours_cell = match day.duration_hours {
                Some(h) => Cell::from(format_hours(h)),
                None => Cell::from("N/A").style(theme.status_missing),
            };

            Row::new(vec![
                Cell::from(day.date.to_string()),
                Cell::from(weekday_name(day.date.weekday())),
                on_cell,
                off_cell,
                Cell::from(format!("{}", day.duty_on_count + day.duty_off_count)),
                hours_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
