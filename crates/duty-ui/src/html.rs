//! Static HTML dashboard writer.
//!
//! Produces a single self-contained page (inline CSS, no external
//! assets) with the headline metrics, the daily and work-hours tables,
//! and CSS-bar activity histograms.

use std::path::Path;

use duty_core::error::Result;
use duty_core::formatting::{format_hours, format_number};
use duty_data::aggregator::StatusCounts;
use duty_data::analysis::AnalysisResult;

const TIME_FMT: &str = "%H:%M:%S";

const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the dashboard and write it to `path`.
pub fn write_dashboard(path: &Path, analysis: &AnalysisResult) -> Result<()> {
    std::fs::write(path, render_dashboard(analysis))?;
    Ok(())
}

/// Render the complete dashboard page as an HTML string.
pub fn render_dashboard(analysis: &AnalysisResult) -> String {
    let mut page = String::with_capacity(16 * 1024);

    page.push_str(HEADER);
    push_metrics(&mut page, analysis);
    push_daily_table(&mut page, analysis);
    push_work_hours_table(&mut page, analysis);
    push_histogram(&mut page, "Activity by Hour", &hour_rows(&analysis.hourly));
    push_histogram(
        &mut page,
        "Activity by Weekday",
        &weekday_rows(&analysis.weekday),
    );
    page.push_str(&format!(
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        escape(&analysis.metadata.generated_at)
    ));

    page
}

// ── Page skeleton ─────────────────────────────────────────────────────────────

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Duty Schedule Dashboard</title>
<style>
  body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #212529; }
  h1 { border-bottom: 2px solid #dee2e6; padding-bottom: 0.5rem; }
  h2 { margin-top: 2rem; }
  .metrics { display: flex; flex-wrap: wrap; gap: 1rem; }
  .metric-card { background: #f8f9fa; border: 1px solid #dee2e6; border-radius: 8px;
                 padding: 1rem 1.5rem; min-width: 10rem; text-align: center; }
  .metric-value { font-size: 1.8rem; font-weight: bold; }
  .metric-label { color: #6c757d; }
  table { border-collapse: collapse; margin-top: 0.5rem; }
  th, td { border: 1px solid #dee2e6; padding: 0.3rem 0.8rem; text-align: left; }
  th { background: #f8f9fa; }
  .duty-on { color: #2E8B57; font-weight: bold; }
  .duty-off { color: #DC143C; font-weight: bold; }
  .na { color: #6c757d; }
  .bars { max-width: 40rem; }
  .bar-row { display: flex; align-items: center; margin: 2px 0; }
  .bar-label { width: 6rem; color: #6c757d; }
  .bar-track { flex: 1; display: flex; gap: 2px; }
  .bar-on { background: #2E8B57; height: 0.9rem; }
  .bar-off { background: #DC143C; height: 0.9rem; }
  .bar-count { margin-left: 0.5rem; color: #6c757d; }
  footer { margin-top: 2rem; color: #6c757d; font-size: 0.85rem; }
</style>
</head>
<body>
<h1>Duty Schedule Dashboard</h1>
"#;

// ── Sections ──────────────────────────────────────────────────────────────────

fn push_metrics(page: &mut String, analysis: &AnalysisResult) {
    let totals = analysis.status_totals();
    let days_tracked = analysis
        .date_range()
        .map(|(first, last)| (last - first).num_days() + 1)
        .unwrap_or(0);

    page.push_str("<div class=\"metrics\">\n");
    push_metric_card(page, &format_number(totals.total() as f64, 0), "Total Records");
    push_metric_card(
        page,
        &analysis.unique_employees().to_string(),
        "Unique Employees",
    );
    push_metric_card(
        page,
        &format_number(totals.duty_on as f64, 0),
        "Duty On Records",
    );
    push_metric_card(
        page,
        &format_number(totals.duty_off as f64, 0),
        "Duty Off Records",
    );
    push_metric_card(page, &days_tracked.to_string(), "Days Tracked");
    page.push_str("</div>\n");
}

fn push_metric_card(page: &mut String, value: &str, label: &str) {
    page.push_str(&format!(
        "<div class=\"metric-card\"><div class=\"metric-value\">{}</div><div class=\"metric-label\">{}</div></div>\n",
        escape(value),
        label
    ));
}

fn push_daily_table(page: &mut String, analysis: &AnalysisResult) {
    page.push_str("<h2>Daily Summary</h2>\n<table>\n");
    page.push_str(
        "<tr><th>Date</th><th>Duty On</th><th>Duty Off</th><th>Unique Employees</th></tr>\n",
    );
    for day in &analysis.daily {
        page.push_str(&format!(
            "<tr><td>{}</td><td class=\"duty-on\">{}</td><td class=\"duty-off\">{}</td><td>{}</td></tr>\n",
            day.date, day.counts.duty_on, day.counts.duty_off, day.unique_employees
        ));
    }
    page.push_str("</table>\n");
}

fn push_work_hours_table(page: &mut String, analysis: &AnalysisResult) {
    page.push_str("<h2>Employee Work Hours</h2>\n<table>\n");
    page.push_str(
        "<tr><th>Name</th><th>Date</th><th>Duty On</th><th>Duty Off</th><th>Hours</th></tr>\n",
    );
    for session in &analysis.sessions {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"duty-on\">{}</td><td class=\"duty-off\">{}</td><td>{}</td></tr>\n",
            escape(&session.name),
            session.date,
            session.duty_on.format(TIME_FMT),
            session.duty_off.format(TIME_FMT),
            format_hours(session.duration_hours)
        ));
    }
    page.push_str("</table>\n");
}

/// One (label, counts) pair per histogram bucket.
fn hour_rows(hourly: &[StatusCounts; 24]) -> Vec<(String, StatusCounts)> {
    hourly
        .iter()
        .enumerate()
        .map(|(hour, counts)| (format!("{:02}:00", hour), *counts))
        .collect()
}

fn weekday_rows(weekday: &[StatusCounts; 7]) -> Vec<(String, StatusCounts)> {
    weekday
        .iter()
        .enumerate()
        .map(|(i, counts)| (WEEKDAY_LABELS[i].to_string(), *counts))
        .collect()
}

fn push_histogram(page: &mut String, title: &str, rows: &[(String, StatusCounts)]) {
    let max = rows.iter().map(|(_, c)| c.total()).max().unwrap_or(0);

    page.push_str(&format!("<h2>{}</h2>\n<div class=\"bars\">\n", title));
    for (label, counts) in rows {
        page.push_str(&bar_row(label, *counts, max));
    }
    page.push_str("</div>\n");
}

/// One histogram row: label, stacked on/off bars scaled against `max`,
/// and the raw counts.
fn bar_row(label: &str, counts: StatusCounts, max: u64) -> String {
    let scale = |count: u64| {
        if max == 0 {
            0.0
        } else {
            (count as f64 / max as f64) * 100.0
        }
    };

    format!(
        "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
<span class=\"bar-track\">\
<span class=\"bar-on\" style=\"width:{:.1}%\"></span>\
<span class=\"bar-off\" style=\"width:{:.1}%\"></span>\
</span><span class=\"bar-count\">{} / {}</span></div>\n",
        escape(label),
        scale(counts.duty_on),
        scale(counts.duty_off),
        counts.duty_on,
        counts.duty_off
    )
}

// ── Escaping ──────────────────────────────────────────────────────────────────

/// Minimal HTML escaping for text content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
