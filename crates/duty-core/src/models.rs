use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Swipe direction recorded by the badge terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    /// Employee swiped onto duty.
    DutyOn,
    /// Employee swiped off duty.
    DutyOff,
}

impl DutyStatus {
    /// Parse the exact status strings used by the duty log.
    ///
    /// Returns `None` for anything other than `"DutyOn"` / `"DutyOff"`;
    /// the loader turns that into a row-scoped error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DutyOn" => Some(Self::DutyOn),
            "DutyOff" => Some(Self::DutyOff),
            _ => None,
        }
    }

    /// The canonical string form, as written in the duty log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DutyOn => "DutyOn",
            Self::DutyOff => "DutyOff",
        }
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single swipe record read from the duty log.
///
/// Immutable once parsed; only the loader constructs these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyEvent {
    /// Record identifier from the source file.
    pub id: u64,
    /// Employee name exactly as recorded.
    pub name: String,
    /// Swipe direction.
    pub status: DutyStatus,
    /// Wall-clock timestamp of the swipe (no offset).
    pub timestamp: NaiveDateTime,
}

impl DutyEvent {
    /// Calendar date of the swipe.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time-of-day of the swipe.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Hour of day, 0–23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of week of the swipe.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }
}

/// Truncate an hour count to two decimal places.
///
/// Truncation (not rounding) is the documented behaviour for session
/// durations: `9.519` becomes `9.51`, `-9.519` becomes `-9.51`.
pub fn truncate_hours(hours: f64) -> f64 {
    (hours * 100.0).trunc() / 100.0
}

/// A reconstructed work interval for one employee on one calendar date.
///
/// Exists only when the date has at least one DutyOn *and* one DutyOff
/// event. Bounds are first-on / last-off; intermediate swipes on the
/// same date are collapsed away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutySession {
    /// Employee name.
    pub name: String,
    /// Calendar date the session belongs to.
    pub date: NaiveDate,
    /// Time of the earliest DutyOn swipe.
    pub duty_on: NaiveTime,
    /// Time of the latest DutyOff swipe.
    pub duty_off: NaiveTime,
    /// `duty_off − duty_on` in hours, truncated to two decimals.
    ///
    /// Negative when the last DutyOff precedes the first DutyOn (the
    /// reconstructor does not reorder suspicious data).
    pub duration_hours: f64,
}

impl DutySession {
    /// Build a session from the first-on / last-off bounds of one date.
    pub fn from_bounds(
        name: impl Into<String>,
        date: NaiveDate,
        first_on: NaiveDateTime,
        last_off: NaiveDateTime,
    ) -> Self {
        let secs = (last_off - first_on).num_seconds() as f64;
        Self {
            name: name.into(),
            date,
            duty_on: first_on.time(),
            duty_off: last_off.time(),
            duration_hours: truncate_hours(secs / 3600.0),
        }
    }
}

/// Attendance record for one (employee, date) pair.
///
/// Produced for every pair with at least one event, whether or not a
/// full session could be reconstructed. `duration_hours` is `None`
/// when either swipe side is missing; the presentation layer renders
/// that as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPresence {
    /// Employee name.
    pub name: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Number of DutyOn swipes on this date.
    pub duty_on_count: u32,
    /// Number of DutyOff swipes on this date.
    pub duty_off_count: u32,
    /// Earliest DutyOn time, if any.
    pub first_on: Option<NaiveTime>,
    /// Latest DutyOff time, if any.
    pub last_off: Option<NaiveTime>,
    /// Session duration in hours, when both sides exist.
    pub duration_hours: Option<f64>,
}

impl DayPresence {
    /// `true` when both a DutyOn and a DutyOff exist for this date.
    pub fn has_full_session(&self) -> bool {
        self.first_on.is_some() && self.last_off.is_some()
    }
}
