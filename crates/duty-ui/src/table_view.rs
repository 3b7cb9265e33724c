//! Aggregate table views (daily / employees / work hours) for the
//! Dutyboard TUI.
//!
//! Each view renders a bordered [`ratatui::widgets::Table`] with one row
//! per aggregate entry plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use duty_core::formatting::{format_hours, format_number};
use duty_data::aggregator::{DailySummary, EmployeeHours, EmployeeSummary};

use crate::themes::Theme;

// ── Totals rows ───────────────────────────────────────────────────────────────

/// Aggregated totals across all rows of the daily table.
#[derive(Debug, Clone, Default)]
pub struct DailyTotals {
    pub duty_on: u64,
    pub duty_off: u64,
    pub days: usize,
}

impl DailyTotals {
    pub fn from_rows(rows: &[DailySummary]) -> Self {
        Self {
            duty_on: rows.iter().map(|r| r.counts.duty_on).sum(),
            duty_off: rows.iter().map(|r| r.counts.duty_off).sum(),
            days: rows.len(),
        }
    }

    pub fn total(&self) -> u64 {
        self.duty_on + self.duty_off
    }
}

/// Aggregated totals across all rows of the employees table.
#[derive(Debug, Clone, Default)]
pub struct EmployeeTotals {
    pub duty_on: u64,
    pub duty_off: u64,
    pub employees: usize,
}

impl EmployeeTotals {
    pub fn from_rows(rows: &[EmployeeSummary]) -> Self {
        Self {
            duty_on: rows.iter().map(|r| r.counts.duty_on).sum(),
            duty_off: rows.iter().map(|r| r.counts.duty_off).sum(),
            employees: rows.len(),
        }
    }

    pub fn total(&self) -> u64 {
        self.duty_on + self.duty_off
    }
}

/// Aggregated totals across all rows of the work-hours table.
#[derive(Debug, Clone, Default)]
pub struct HoursTotals {
    pub sessions: usize,
    pub total_hours: f64,
}

impl HoursTotals {
    pub fn from_rows(rows: &[EmployeeHours]) -> Self {
        Self {
            sessions: rows.iter().map(|r| r.stats.count).sum(),
            total_hours: rows.iter().map(|r| r.total_hours).sum(),
        }
    }

    /// Mean session length across all employees.
    pub fn mean_hours(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.total_hours / self.sessions as f64
        }
    }
}

// ── Name fitting ──────────────────────────────────────────────────────────────

/// Fit an employee name into `max` display columns, ellipsising overlong
/// names. Width-aware so double-width characters do not break the table.
pub fn fit_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.to_string().width();
        if used + w > max.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

// ── Views ─────────────────────────────────────────────────────────────────────

/// Render the per-date activity table into `area`.
pub fn render_daily_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[DailySummary],
    totals: &DailyTotals,
    theme: &Theme,
) {
    let header_cells = ["Date", "Duty On", "Duty Off", "Total", "Employees"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.date.to_string()),
                Cell::from(format_number(row.counts.duty_on as f64, 0)).style(theme.status_on),
                Cell::from(format_number(row.counts.duty_off as f64, 0)).style(theme.status_off),
                Cell::from(format_number(row.counts.total() as f64, 0)),
                Cell::from(format_number(row.unique_employees as f64, 0)),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(format_number(totals.duty_on as f64, 0)),
        Cell::from(format_number(totals.duty_off as f64, 0)),
        Cell::from(format_number(totals.total() as f64, 0)),
        Cell::from(format!("{} days", totals.days)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Daily Activity "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the per-employee totals table into `area`.
pub fn render_employee_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[EmployeeSummary],
    totals: &EmployeeTotals,
    theme: &Theme,
) {
    let header_cells = ["Employee", "Records", "Duty On", "Duty Off", "Active Days"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(fit_width(&row.name, 24)),
                Cell::from(format_number(row.counts.total() as f64, 0)),
                Cell::from(format_number(row.counts.duty_on as f64, 0)).style(theme.status_on),
                Cell::from(format_number(row.counts.duty_off as f64, 0)).style(theme.status_off),
                Cell::from(format_number(row.active_days as f64, 0)),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from(format!("TOTAL ({} employees)", totals.employees)),
        Cell::from(format_number(totals.total() as f64, 0)),
        Cell::from(format_number(totals.duty_on as f64, 0)),
        Cell::from(format_number(totals.duty_off as f64, 0)),
        Cell::from(""),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(26),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Employees "))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the per-employee work-hour statistics table into `area`.
pub fn render_hours_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[EmployeeHours],
    totals: &HoursTotals,
    theme: &Theme,
) {
    let header_cells = [
        "Employee", "Sessions", "Total h", "Mean h", "Min h", "Max h", "Std h",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(fit_width(&row.name, 24)),
                Cell::from(format_number(row.stats.count as f64, 0)),
                Cell::from(format_hours(row.total_hours)),
                Cell::from(format_hours(row.stats.mean)),
                Cell::from(format_hours(row.stats.min)),
                Cell::from(format_hours(row.stats.max)),
                Cell::from(format_hours(row.stats.std_dev)),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(format_number(totals.sessions as f64, 0)),
        Cell::from(format_hours(totals.total_hours)),
        Cell::from(format_hours(totals.mean_hours())),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(26),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Work Hours "))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when there are no events to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No duty records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Point dutyboard at one or more duty-log CSV files.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default().borders(Borders::ALL).title(" Dutyboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
