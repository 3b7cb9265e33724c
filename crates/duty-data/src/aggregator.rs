//! Pure aggregations over duty events and reconstructed sessions.
//!
//! Every function here is a deterministic reduction with no side
//! effects; empty inputs produce empty outputs, never errors.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use duty_core::models::{DutyEvent, DutySession, DutyStatus};
use duty_core::stats::DurationStats;

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Per-status event tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub duty_on: u64,
    pub duty_off: u64,
}

impl StatusCounts {
    /// Add a single event to the tally.
    pub fn add(&mut self, status: DutyStatus) {
        match status {
            DutyStatus::DutyOn => self.duty_on += 1,
            DutyStatus::DutyOff => self.duty_off += 1,
        }
    }

    /// Sum of both statuses.
    pub fn total(&self) -> u64 {
        self.duty_on + self.duty_off
    }
}

// ── Aggregate rows ────────────────────────────────────────────────────────────

/// Event activity for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub counts: StatusCounts,
    /// Number of distinct employees with at least one event on this date.
    pub unique_employees: usize,
}

/// All-time activity for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSummary {
    pub name: String,
    pub counts: StatusCounts,
    /// Number of distinct dates with at least one event.
    pub active_days: usize,
}

/// Work-hour statistics for one employee, derived from reconstructed
/// sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeHours {
    pub name: String,
    /// Sum of session durations in hours.
    pub total_hours: f64,
    /// Mean / min / max / std over session durations. `stats.count` is
    /// the number of full sessions (days with both swipe sides).
    pub stats: DurationStats,
}

// ── DutyAggregator ────────────────────────────────────────────────────────────

/// Stateless helper that reduces event and session collections into
/// summary rows.
pub struct DutyAggregator;

impl DutyAggregator {
    /// Per-date DutyOn/DutyOff counts and distinct-employee counts,
    /// sorted by date.
    pub fn aggregate_daily(events: &[DutyEvent]) -> Vec<DailySummary> {
        let mut map: BTreeMap<NaiveDate, (StatusCounts, HashSet<&str>)> = BTreeMap::new();

        for event in events {
            let entry = map.entry(event.date()).or_default();
            entry.0.add(event.status);
            entry.1.insert(event.name.as_str());
        }

        map.into_iter()
            .map(|(date, (counts, names))| DailySummary {
                date,
                counts,
                unique_employees: names.len(),
            })
            .collect()
    }

    /// Per-employee totals and distinct-date counts, sorted by name.
    pub fn aggregate_employees(events: &[DutyEvent]) -> Vec<EmployeeSummary> {
        let mut map: BTreeMap<&str, (StatusCounts, HashSet<NaiveDate>)> = BTreeMap::new();

        for event in events {
            let entry = map.entry(event.name.as_str()).or_default();
            entry.0.add(event.status);
            entry.1.insert(event.date());
        }

        map.into_iter()
            .map(|(name, (counts, dates))| EmployeeSummary {
                name: name.to_string(),
                counts,
                active_days: dates.len(),
            })
            .collect()
    }

    /// Event counts by hour of day (index 0–23).
    pub fn hourly_histogram(events: &[DutyEvent]) -> [StatusCounts; 24] {
        let mut hours = [StatusCounts::default(); 24];
        for event in events {
            hours[event.hour() as usize].add(event.status);
        }
        hours
    }

    /// Event counts by day of week (index 0 = Monday … 6 = Sunday).
    pub fn weekday_histogram(events: &[DutyEvent]) -> [StatusCounts; 7] {
        let mut days = [StatusCounts::default(); 7];
        for event in events {
            days[event.weekday().num_days_from_monday() as usize].add(event.status);
        }
        days
    }

    /// Per-employee duration statistics over reconstructed sessions,
    /// sorted by name.
    pub fn aggregate_hours(sessions: &[DutySession]) -> Vec<EmployeeHours> {
        let mut map: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

        for session in sessions {
            map.entry(session.name.as_str())
                .or_default()
                .push(session.duration_hours);
        }

        map.into_iter()
            .filter_map(|(name, durations)| {
                DurationStats::from_values(&durations).map(|stats| EmployeeHours {
                    name: name.to_string(),
                    total_hours: durations.iter().sum(),
                    stats,
                })
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn event(id: u64, name: &str, status: DutyStatus, ts: &str) -> DutyEvent {
        DutyEvent {
            id,
            name: name.to_string(),
            status,
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    fn sample_events() -> Vec<DutyEvent> {
        vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Bob", DutyStatus::DutyOn, "2024-01-01 09:00:00"),
            event(3, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
            event(4, "Alice", DutyStatus::DutyOn, "2024-01-02 08:00:00"),
        ]
    }

    // ── aggregate_daily ───────────────────────────────────────────────────────

    #[test]
    fn test_daily_groups_by_date() {
        let daily = DutyAggregator::aggregate_daily(&sample_events());

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2024-01-01");
        assert_eq!(daily[0].counts.duty_on, 2);
        assert_eq!(daily[0].counts.duty_off, 1);
        assert_eq!(daily[0].unique_employees, 2);
        assert_eq!(daily[1].counts.duty_on, 1);
        assert_eq!(daily[1].unique_employees, 1);
    }

    #[test]
    fn test_daily_counts_partition_input() {
        // Counts partitioned by status must sum to the input row count.
        let events = sample_events();
        let daily = DutyAggregator::aggregate_daily(&events);

        let total: u64 = daily.iter().map(|d| d.counts.total()).sum();
        assert_eq!(total, events.len() as u64);
    }

    #[test]
    fn test_daily_empty_events() {
        assert!(DutyAggregator::aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_daily_sorted_by_date() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-20 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOn, "2024-01-10 08:00:00"),
            event(3, "Alice", DutyStatus::DutyOn, "2024-01-15 08:00:00"),
        ];
        let daily = DutyAggregator::aggregate_daily(&events);

        let dates: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-10", "2024-01-15", "2024-01-20"]);
    }

    // ── aggregate_employees ───────────────────────────────────────────────────

    #[test]
    fn test_employees_totals_and_active_days() {
        let employees = DutyAggregator::aggregate_employees(&sample_events());

        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].name, "Alice");
        assert_eq!(employees[0].counts.total(), 3);
        assert_eq!(employees[0].active_days, 2);
        assert_eq!(employees[1].name, "Bob");
        assert_eq!(employees[1].counts.total(), 1);
        assert_eq!(employees[1].active_days, 1);
    }

    #[test]
    fn test_employees_empty_events() {
        assert!(DutyAggregator::aggregate_employees(&[]).is_empty());
    }

    // ── hourly_histogram ──────────────────────────────────────────────────────

    #[test]
    fn test_hourly_histogram_placement() {
        let hours = DutyAggregator::hourly_histogram(&sample_events());

        assert_eq!(hours[8].duty_on, 2); // Alice on both days
        assert_eq!(hours[9].duty_on, 1); // Bob
        assert_eq!(hours[17].duty_off, 1);
        assert_eq!(hours[12], StatusCounts::default());
    }

    #[test]
    fn test_hourly_histogram_total_matches_input() {
        let events = sample_events();
        let hours = DutyAggregator::hourly_histogram(&events);

        let total: u64 = hours.iter().map(|c| c.total()).sum();
        assert_eq!(total, events.len() as u64);
    }

    #[test]
    fn test_hourly_histogram_empty() {
        let hours = DutyAggregator::hourly_histogram(&[]);
        assert!(hours.iter().all(|c| c.total() == 0));
    }

    // ── weekday_histogram ─────────────────────────────────────────────────────

    #[test]
    fn test_weekday_histogram_placement() {
        // 2024-01-01 was a Monday, 2024-01-02 a Tuesday.
        let days = DutyAggregator::weekday_histogram(&sample_events());

        assert_eq!(days[0].duty_on, 2);
        assert_eq!(days[0].duty_off, 1);
        assert_eq!(days[1].duty_on, 1);
        assert_eq!(days[6], StatusCounts::default());
    }

    #[test]
    fn test_weekday_histogram_empty() {
        let days = DutyAggregator::weekday_histogram(&[]);
        assert!(days.iter().all(|c| c.total() == 0));
    }

    // ── aggregate_hours ───────────────────────────────────────────────────────

    fn session(name: &str, date: &str, hours: f64) -> DutySession {
        DutySession {
            name: name.to_string(),
            date: date.parse().unwrap(),
            duty_on: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            duty_off: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            duration_hours: hours,
        }
    }

    #[test]
    fn test_hours_per_employee_stats() {
        let sessions = vec![
            session("Alice", "2024-01-01", 8.0),
            session("Alice", "2024-01-02", 10.0),
            session("Bob", "2024-01-01", 7.5),
        ];
        let hours = DutyAggregator::aggregate_hours(&sessions);

        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].name, "Alice");
        assert_eq!(hours[0].stats.count, 2);
        assert!((hours[0].stats.mean - 9.0).abs() < 1e-9);
        assert_eq!(hours[0].stats.min, 8.0);
        assert_eq!(hours[0].stats.max, 10.0);
        assert!((hours[0].total_hours - 18.0).abs() < 1e-9);

        assert_eq!(hours[1].name, "Bob");
        assert_eq!(hours[1].stats.count, 1);
        assert_eq!(hours[1].stats.std_dev, 0.0);
    }

    #[test]
    fn test_hours_empty_sessions() {
        assert!(DutyAggregator::aggregate_hours(&[]).is_empty());
    }

    // ── StatusCounts ──────────────────────────────────────────────────────────

    #[test]
    fn test_status_counts_add_and_total() {
        let mut counts = StatusCounts::default();
        counts.add(DutyStatus::DutyOn);
        counts.add(DutyStatus::DutyOn);
        counts.add(DutyStatus::DutyOff);

        assert_eq!(counts.duty_on, 2);
        assert_eq!(counts.duty_off, 1);
        assert_eq!(counts.total(), 3);
    }
}
