//! Top-level duty analysis pipeline.
//!
//! Orchestrates loading, session reconstruction and aggregation,
//! returning an [`AnalysisResult`] ready for the report writers and the
//! dashboard layer.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use duty_core::error::Result;
use duty_core::models::{DayPresence, DutyEvent, DutySession};
use duty_core::time_utils::TimestampParser;

use crate::aggregator::{
    DailySummary, DutyAggregator, EmployeeHours, EmployeeSummary, StatusCounts,
};
use crate::reader::load_duty_events;
use crate::sessions::SessionReconstructor;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of input files read.
    pub files_loaded: usize,
    /// Total number of [`DutyEvent`] records processed.
    pub events_processed: usize,
    /// Number of [`DutySession`]s reconstructed.
    pub sessions_built: usize,
    /// Wall-clock seconds spent loading the CSV files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent reconstructing and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`analyze_duty`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// All loaded events, in input order.
    pub events: Vec<DutyEvent>,
    /// Reconstructed sessions, sorted by (name, date).
    pub sessions: Vec<DutySession>,
    /// Per-(employee, date) attendance, sorted by (name, date).
    pub presence: Vec<DayPresence>,
    /// Per-date activity summary, sorted by date.
    pub daily: Vec<DailySummary>,
    /// Per-employee totals, sorted by name.
    pub employees: Vec<EmployeeSummary>,
    /// Per-employee work-hour statistics, sorted by name.
    pub employee_hours: Vec<EmployeeHours>,
    /// Event counts by hour of day.
    pub hourly: [StatusCounts; 24],
    /// Event counts by day of week (Monday first).
    pub weekday: [StatusCounts; 7],
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Number of distinct employees in the input.
    pub fn unique_employees(&self) -> usize {
        self.employees.len()
    }

    /// First and last calendar date seen, or `None` for empty input.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.daily.first(), self.daily.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// Event totals partitioned by status across all dates.
    pub fn status_totals(&self) -> StatusCounts {
        let mut totals = StatusCounts::default();
        for day in &self.daily {
            totals.duty_on += day.counts.duty_on;
            totals.duty_off += day.counts.duty_off;
        }
        totals
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full analysis pipeline over `paths`.
///
/// 1. Load and validate all duty events (strict; fails without partial
///    results).
/// 2. Reconstruct sessions and presence records.
/// 3. Run every aggregation.
///
/// `timezone` is applied to offset-bearing timestamps during loading.
pub fn analyze_duty(paths: &[PathBuf], timezone: &str) -> Result<AnalysisResult> {
    let parser = TimestampParser::new(timezone);

    let load_start = std::time::Instant::now();
    let events = load_duty_events(paths, &parser)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let mut result = analyze_duty_events(events, paths.len());
    result.metadata.load_time_seconds = load_time;
    Ok(result)
}

/// Transform already-loaded events into a complete [`AnalysisResult`].
///
/// Infallible: empty input produces empty aggregates.
pub fn analyze_duty_events(events: Vec<DutyEvent>, files_loaded: usize) -> AnalysisResult {
    let transform_start = std::time::Instant::now();

    let sessions = SessionReconstructor::reconstruct(&events);
    let presence = SessionReconstructor::daily_presence(&events);
    let daily = DutyAggregator::aggregate_daily(&events);
    let employees = DutyAggregator::aggregate_employees(&events);
    let employee_hours = DutyAggregator::aggregate_hours(&sessions);
    let hourly = DutyAggregator::hourly_histogram(&events);
    let weekday = DutyAggregator::weekday_histogram(&events);

    let transform_time = transform_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        files_loaded,
        events_processed: events.len(),
        sessions_built: sessions.len(),
        load_time_seconds: 0.0,
        transform_time_seconds: transform_time,
    };

    AnalysisResult {
        events,
        sessions,
        presence,
        daily,
        employees,
        employee_hours,
        hourly,
        weekday,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
