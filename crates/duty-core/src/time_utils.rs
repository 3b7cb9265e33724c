use chrono::{DateTime, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses duty-log timestamp strings into wall-clock datetimes.
///
/// The duty log records local wall-clock times without an offset. Inputs
/// that do carry an offset (RFC 3339) are converted into the configured
/// timezone before the offset is dropped, so that calendar-date grouping
/// stays consistent across mixed inputs.
pub struct TimestampParser {
    default_tz: Tz,
}

impl TimestampParser {
    /// Create a parser with the given IANA timezone name as the default.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimestampParser: unrecognised timezone \"{}\", falling back to UTC",
                tz_name
            );
            Tz::UTC
        });
        Self { default_tz: tz }
    }

    /// Parse a timestamp string into a wall-clock [`NaiveDateTime`].
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS[.f]` and the `T`-separated variant
    /// verbatim, and RFC 3339 strings (including the `Z` suffix) via
    /// conversion into the configured timezone. Returns `None` for empty
    /// strings or unrecognised formats.
    pub fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        if s.is_empty() {
            return None;
        }

        const FMTS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
        ];
        for fmt in FMTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
        }

        // Offset-bearing form: replace a trailing 'Z' with '+00:00', then
        // convert into the configured timezone and drop the offset.
        let normalised = if let Some(stripped) = s.strip_suffix('Z') {
            format!("{}+00:00", stripped)
        } else {
            s.to_string()
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&self.default_tz).naive_local());
        }

        warn!("TimestampParser: could not parse timestamp \"{}\"", s);
        None
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name.parse::<Tz>().is_ok()
    }

    /// Expose the configured default timezone.
    pub fn default_tz(&self) -> Tz {
        self.default_tz
    }
}

// ── Weekday labels ────────────────────────────────────────────────────────────

/// Full English weekday name, as used in report and dashboard labels.
///
/// The short three-letter form comes from chrono's `Display` impl.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    // ── parse: naive formats ──────────────────────────────────────────────────

    #[test]
    fn test_parse_space_separated() {
        let parser = TimestampParser::new("UTC");
        let dt = parser.parse("2024-01-01 08:00:00").unwrap();
        assert_eq!(dt.date().day(), 1);
        assert_eq!(dt.time().hour(), 8);
    }

    #[test]
    fn test_parse_t_separated() {
        let parser = TimestampParser::new("UTC");
        let dt = parser.parse("2024-01-01T17:30:00").unwrap();
        assert_eq!(dt.time().hour(), 17);
        assert_eq!(dt.time().minute(), 30);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parser = TimestampParser::new("UTC");
        let dt = parser.parse("2024-01-01 08:00:00.250").unwrap();
        assert_eq!(dt.time().second(), 0);
    }

    // ── parse: offset-bearing inputs ──────────────────────────────────────────

    #[test]
    fn test_parse_rfc3339_z_converted_to_timezone() {
        // 12:00 UTC is 07:00 in New York during January (EST, UTC-5).
        let parser = TimestampParser::new("America/New_York");
        let dt = parser.parse("2024-01-01T12:00:00Z").unwrap();
        assert_eq!(dt.time().hour(), 7);
        assert_eq!(dt.date().day(), 1);
    }

    #[test]
    fn test_parse_rfc3339_offset_with_utc_default() {
        let parser = TimestampParser::new("UTC");
        let dt = parser.parse("2024-01-01T08:00:00+02:00").unwrap();
        assert_eq!(dt.time().hour(), 6);
    }

    // ── parse: failures ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_empty_returns_none() {
        let parser = TimestampParser::new("UTC");
        assert!(parser.parse("").is_none());
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        let parser = TimestampParser::new("UTC");
        assert!(parser.parse("yesterday at nine").is_none());
        assert!(parser.parse("2024-13-01 08:00:00").is_none());
    }

    #[test]
    fn test_parse_trailing_garbage_rejected() {
        let parser = TimestampParser::new("UTC");
        assert!(parser.parse("2024-01-01 08:00:00 extra").is_none());
    }

    // ── timezone handling ─────────────────────────────────────────────────────

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let parser = TimestampParser::new("Mars/Olympus_Mons");
        assert_eq!(parser.default_tz(), Tz::UTC);
    }

    #[test]
    fn test_validate_timezone() {
        assert!(TimestampParser::validate_timezone("Europe/Berlin"));
        assert!(TimestampParser::validate_timezone("UTC"));
        assert!(!TimestampParser::validate_timezone("Not/A_Zone"));
    }

    // ── weekday_name ──────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_name_full() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }

    #[test]
    fn test_weekday_short_via_display() {
        assert_eq!(Weekday::Wed.to_string(), "Wed");
    }
}
