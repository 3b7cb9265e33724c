//! CSV report writers for the derived duty artifacts.
//!
//! Produces the four flat files consumed by the presentation layer:
//! per-person schedule, per-date schedule, daily summary and employee
//! work hours. The work-hours file is the only artifact that is also
//! read back (it carries a header row, unlike the raw duty log).

use std::path::{Path, PathBuf};

use duty_core::error::{DutyError, Result};
use duty_core::formatting::format_hours;
use duty_core::models::{DutyEvent, DutySession};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::DailySummary;
use crate::analysis::AnalysisResult;

// ── File names ────────────────────────────────────────────────────────────────

pub const PERSON_SCHEDULE_FILE: &str = "duty_schedule_by_person.csv";
pub const DATE_SCHEDULE_FILE: &str = "duty_schedule_by_date.csv";
pub const DAILY_SUMMARY_FILE: &str = "daily_duty_summary.csv";
pub const WORK_HOURS_FILE: &str = "employee_work_hours.csv";

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Work-hours rows ───────────────────────────────────────────────────────────

/// One row of the `employee_work_hours.csv` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Duty_On_Time")]
    pub duty_on_time: String,
    #[serde(rename = "Duty_Off_Time")]
    pub duty_off_time: String,
    #[serde(rename = "Work_Hours")]
    pub work_hours: f64,
}

// ── Writers ───────────────────────────────────────────────────────────────────

/// Write the per-person schedule: all events sorted by employee, then
/// timestamp.
pub fn write_person_schedule(path: &Path, events: &[DutyEvent]) -> Result<()> {
    let mut sorted: Vec<&DutyEvent> = events.iter().collect();
    sorted.sort_by(|a, b| (&a.name, a.timestamp).cmp(&(&b.name, b.timestamp)));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Name", "Date", "Status", "Time", "DateTime"])?;
    for event in sorted {
        wtr.write_record([
            event.name.clone(),
            event.date().format(DATE_FMT).to_string(),
            event.status.as_str().to_string(),
            event.time().format(TIME_FMT).to_string(),
            event.timestamp.format(DATETIME_FMT).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the per-date schedule: all events sorted by timestamp (which
/// implies date order).
pub fn write_date_schedule(path: &Path, events: &[DutyEvent]) -> Result<()> {
    let mut sorted: Vec<&DutyEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Date", "Name", "Status", "Time", "DateTime"])?;
    for event in sorted {
        wtr.write_record([
            event.date().format(DATE_FMT).to_string(),
            event.name.clone(),
            event.status.as_str().to_string(),
            event.time().format(TIME_FMT).to_string(),
            event.timestamp.format(DATETIME_FMT).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the daily summary produced by the aggregator.
pub fn write_daily_summary(path: &Path, daily: &[DailySummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Date", "Total_DutyOn", "Total_DutyOff", "Unique_Employees"])?;
    for row in daily {
        wtr.write_record([
            row.date.format(DATE_FMT).to_string(),
            row.counts.duty_on.to_string(),
            row.counts.duty_off.to_string(),
            row.unique_employees.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the employee work-hours artifact from reconstructed sessions.
///
/// Sessions arrive sorted by (name, date) from the reconstructor and
/// are written in that order.
pub fn write_work_hours(path: &Path, sessions: &[DutySession]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "Name",
        "Date",
        "Duty_On_Time",
        "Duty_Off_Time",
        "Work_Hours",
    ])?;
    for session in sessions {
        wtr.write_record([
            session.name.clone(),
            session.date.format(DATE_FMT).to_string(),
            session.duty_on.format(TIME_FMT).to_string(),
            session.duty_off.format(TIME_FMT).to_string(),
            format_hours(session.duration_hours),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read an `employee_work_hours.csv` file back into typed rows.
pub fn read_work_hours(path: &Path) -> Result<Vec<WorkHoursRow>> {
    let file = std::fs::File::open(path).map_err(|source| DutyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Write all four report artifacts into `dir`, creating it if needed.
///
/// Returns the paths written, in a fixed order.
pub fn write_all_reports(dir: &Path, analysis: &AnalysisResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let person = dir.join(PERSON_SCHEDULE_FILE);
    let date = dir.join(DATE_SCHEDULE_FILE);
    let summary = dir.join(DAILY_SUMMARY_FILE);
    let hours = dir.join(WORK_HOURS_FILE);

    write_person_schedule(&person, &analysis.events)?;
    write_date_schedule(&date, &analysis.events)?;
    write_daily_summary(&summary, &analysis.daily)?;
    write_work_hours(&hours, &analysis.sessions)?;

    info!("Wrote 4 reports to {}", dir.display());
    Ok(vec![person, date, summary, hours])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
