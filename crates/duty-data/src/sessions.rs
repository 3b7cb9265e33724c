//! Duty-session reconstruction.
//!
//! Groups swipe events by (employee, calendar date) and pairs the first
//! DutyOn with the last DutyOff of each date into a [`DutySession`].

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use duty_core::models::{truncate_hours, DayPresence, DutyEvent, DutySession, DutyStatus};
use tracing::debug;

// ── DayBounds ─────────────────────────────────────────────────────────────────

/// Running first-on / last-off bounds for one (employee, date) group.
#[derive(Debug, Clone, Default)]
struct DayBounds {
    first_on: Option<NaiveDateTime>,
    last_off: Option<NaiveDateTime>,
    on_count: u32,
    off_count: u32,
}

impl DayBounds {
    /// Fold one event into the bounds.
    ///
    /// For equal timestamps the first DutyOn seen wins and the last
    /// DutyOff seen wins, so ties resolve by stable input order.
    fn add(&mut self, event: &DutyEvent) {
        match event.status {
            DutyStatus::DutyOn => {
                self.on_count += 1;
                if self.first_on.map(|t| event.timestamp < t).unwrap_or(true) {
                    self.first_on = Some(event.timestamp);
                }
            }
            DutyStatus::DutyOff => {
                self.off_count += 1;
                if self.last_off.map(|t| event.timestamp >= t).unwrap_or(true) {
                    self.last_off = Some(event.timestamp);
                }
            }
        }
    }

    fn duration_hours(&self) -> Option<f64> {
        match (self.first_on, self.last_off) {
            (Some(on), Some(off)) => {
                Some(truncate_hours((off - on).num_seconds() as f64 / 3600.0))
            }
            _ => None,
        }
    }
}

// ── SessionReconstructor ──────────────────────────────────────────────────────

/// Stateless helper that rebuilds duty sessions from raw swipe events.
///
/// A session cannot span two calendar dates; multiple on/off swipes on
/// the same date collapse to the single first-on/last-off pair (the
/// intermediate swipes still count toward presence).
pub struct SessionReconstructor;

impl SessionReconstructor {
    /// Rebuild one [`DutySession`] per (employee, date) group that has
    /// both a DutyOn and a DutyOff event.
    ///
    /// Output is sorted by (name, date).
    pub fn reconstruct(events: &[DutyEvent]) -> Vec<DutySession> {
        let sessions: Vec<DutySession> = Self::group_by_day(events)
            .into_iter()
            .filter_map(|((name, date), bounds)| match (bounds.first_on, bounds.last_off) {
                (Some(on), Some(off)) => Some(DutySession::from_bounds(name, date, on, off)),
                _ => None,
            })
            .collect();

        debug!(
            "Reconstructed {} sessions from {} events",
            sessions.len(),
            events.len()
        );
        sessions
    }

    /// One [`DayPresence`] per (employee, date) group with at least one
    /// event, whether or not a full session exists.
    ///
    /// Output is sorted by (name, date).
    pub fn daily_presence(events: &[DutyEvent]) -> Vec<DayPresence> {
        Self::group_by_day(events)
            .into_iter()
            .map(|((name, date), bounds)| DayPresence {
                name,
                date,
                duty_on_count: bounds.on_count,
                duty_off_count: bounds.off_count,
                first_on: bounds.first_on.map(|t| t.time()),
                last_off: bounds.last_off.map(|t| t.time()),
                duration_hours: bounds.duration_hours(),
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Fold events into per-(name, date) bounds. BTreeMap keys give the
    /// sorted output order for free.
    fn group_by_day(events: &[DutyEvent]) -> BTreeMap<(String, NaiveDate), DayBounds> {
        let mut map: BTreeMap<(String, NaiveDate), DayBounds> = BTreeMap::new();
        for event in events {
            map.entry((event.name.clone(), event.date()))
                .or_default()
                .add(event);
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn event(id: u64, name: &str, status: DutyStatus, ts: &str) -> DutyEvent {
        DutyEvent {
            id,
            name: name.to_string(),
            status,
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // ── reconstruct ───────────────────────────────────────────────────────────

    #[test]
    fn test_reconstruct_simple_pair() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-01 17:30:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "Alice");
        assert_eq!(sessions[0].duty_on, time(8, 0));
        assert_eq!(sessions[0].duty_off, time(17, 30));
        assert_eq!(sessions[0].duration_hours, 9.5);
    }

    #[test]
    fn test_reconstruct_multiple_ons_uses_earliest() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOn, "2024-01-01 08:05:00"),
            event(3, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duty_on, time(8, 0));
        assert_eq!(sessions[0].duration_hours, 9.0);
    }

    #[test]
    fn test_reconstruct_multiple_offs_uses_latest() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-01 12:00:00"),
            event(3, "Alice", DutyStatus::DutyOn, "2024-01-01 13:00:00"),
            event(4, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);

        // Intermediate pair collapses away: 08:00 → 17:00.
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duty_on, time(8, 0));
        assert_eq!(sessions[0].duty_off, time(17, 0));
        assert_eq!(sessions[0].duration_hours, 9.0);
    }

    #[test]
    fn test_reconstruct_only_on_produces_no_session() {
        let events = vec![event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00")];
        assert!(SessionReconstructor::reconstruct(&events).is_empty());
    }

    #[test]
    fn test_reconstruct_only_off_produces_no_session() {
        let events = vec![event(1, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00")];
        assert!(SessionReconstructor::reconstruct(&events).is_empty());
    }

    #[test]
    fn test_reconstruct_never_spans_dates() {
        // Night shift: on at 22:00, off at 06:00 next day. Grouping is
        // strictly by calendar date, so no session is produced.
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 22:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-02 06:00:00"),
        ];
        assert!(SessionReconstructor::reconstruct(&events).is_empty());

        let presence = SessionReconstructor::daily_presence(&events);
        assert_eq!(presence.len(), 2);
    }

    #[test]
    fn test_reconstruct_separates_employees() {
        let events = vec![
            event(1, "Bob", DutyStatus::DutyOn, "2024-01-01 09:00:00"),
            event(2, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(3, "Alice", DutyStatus::DutyOff, "2024-01-01 16:00:00"),
            event(4, "Bob", DutyStatus::DutyOff, "2024-01-01 18:00:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);

        assert_eq!(sessions.len(), 2);
        // Sorted by name.
        assert_eq!(sessions[0].name, "Alice");
        assert_eq!(sessions[0].duration_hours, 8.0);
        assert_eq!(sessions[1].name, "Bob");
        assert_eq!(sessions[1].duration_hours, 9.0);
    }

    #[test]
    fn test_reconstruct_sorted_by_name_then_date() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-02 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-02 16:00:00"),
            event(3, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(4, "Alice", DutyStatus::DutyOff, "2024-01-01 16:00:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);

        let dates: Vec<String> = sessions.iter().map(|s| s.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_reconstruct_empty_input() {
        assert!(SessionReconstructor::reconstruct(&[]).is_empty());
    }

    // ── daily_presence ────────────────────────────────────────────────────────

    #[test]
    fn test_presence_counts_both_statuses() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOn, "2024-01-01 08:05:00"),
            event(3, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
        ];
        let presence = SessionReconstructor::daily_presence(&events);

        assert_eq!(presence.len(), 1);
        assert_eq!(presence[0].duty_on_count, 2);
        assert_eq!(presence[0].duty_off_count, 1);
        assert_eq!(presence[0].duration_hours, Some(9.0));
    }

    #[test]
    fn test_presence_off_only_has_no_duration() {
        let events = vec![event(1, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00")];
        let presence = SessionReconstructor::daily_presence(&events);

        assert_eq!(presence.len(), 1);
        assert_eq!(presence[0].duty_on_count, 0);
        assert_eq!(presence[0].duty_off_count, 1);
        assert!(presence[0].first_on.is_none());
        assert_eq!(presence[0].last_off, Some(time(17, 0)));
        assert!(presence[0].duration_hours.is_none());
        assert!(!presence[0].has_full_session());
    }

    #[test]
    fn test_presence_empty_input() {
        assert!(SessionReconstructor::daily_presence(&[]).is_empty());
    }

    #[test]
    fn test_presence_matches_session_duration() {
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-01 16:20:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);
        let presence = SessionReconstructor::daily_presence(&events);

        assert_eq!(
            presence[0].duration_hours,
            Some(sessions[0].duration_hours)
        );
        // 8h20m truncated to two decimals.
        assert_eq!(presence[0].duration_hours, Some(8.33));
    }

    // ── tie-breaks ────────────────────────────────────────────────────────────

    #[test]
    fn test_equal_timestamp_ties_are_stable() {
        // Two DutyOffs at the same instant: the later input row wins, but
        // either way the resulting time is identical.
        let events = vec![
            event(1, "Alice", DutyStatus::DutyOn, "2024-01-01 08:00:00"),
            event(2, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
            event(3, "Alice", DutyStatus::DutyOff, "2024-01-01 17:00:00"),
        ];
        let sessions = SessionReconstructor::reconstruct(&events);
        assert_eq!(sessions[0].duty_off, time(17, 0));
    }
}
