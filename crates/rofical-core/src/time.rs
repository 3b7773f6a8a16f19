//! Time range resolution for calendar queries.
//!
//! This module provides [`TimeRange`] for the window a fetch covers, and
//! [`TimeRangeResolver`] which derives each bound once from an optional
//! override string and the configured timezone, then serves the cached
//! value for the rest of the run.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Errors from resolving a time range bound.
#[derive(Debug, Error)]
pub enum TimeRangeError {
    /// An override string was neither an ISO date-time nor an ISO date.
    #[error("invalid date override {value:?}, expected an ISO date or date-time")]
    InvalidOverride { value: String },
}

/// A query window `[start, end)` in the configured timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    /// Start of the window (inclusive).
    pub start: DateTime<Tz>,
    /// End of the window (exclusive).
    pub end: DateTime<Tz>,
}

/// Resolves the query window bounds once per run.
///
/// Each bound comes from its override string when one is set, parsed as a
/// naive date-time (falling back to a bare date at midnight) and localized
/// into the configured timezone, and from the current instant otherwise.
/// The first successful resolution of a bound is cached; later calls return
/// the same value.
#[derive(Debug)]
pub struct TimeRangeResolver {
    tz: Tz,
    start_override: Option<String>,
    end_override: Option<String>,
    start: OnceLock<DateTime<Tz>>,
    end: OnceLock<DateTime<Tz>>,
}

impl TimeRangeResolver {
    /// Creates a resolver for the given timezone and optional overrides.
    pub fn new(tz: Tz, start_override: Option<String>, end_override: Option<String>) -> Self {
        Self {
            tz,
            start_override,
            end_override,
            start: OnceLock::new(),
            end: OnceLock::new(),
        }
    }

    /// Resolves the start bound, computing it on first call.
    pub fn start(&self) -> Result<DateTime<Tz>, TimeRangeError> {
        resolve_bound(&self.start, self.start_override.as_deref(), self.tz)
    }

    /// Resolves the end bound, computing it on first call.
    pub fn end(&self) -> Result<DateTime<Tz>, TimeRangeError> {
        resolve_bound(&self.end, self.end_override.as_deref(), self.tz)
    }

    /// Resolves both bounds into a [`TimeRange`].
    pub fn range(&self) -> Result<TimeRange, TimeRangeError> {
        Ok(TimeRange {
            start: self.start()?,
            end: self.end()?,
        })
    }
}

fn resolve_bound(
    cell: &OnceLock<DateTime<Tz>>,
    override_value: Option<&str>,
    tz: Tz,
) -> Result<DateTime<Tz>, TimeRangeError> {
    if let Some(resolved) = cell.get() {
        return Ok(*resolved);
    }
    let computed = match override_value {
        Some(value) => localize(tz, parse_override(value)?),
        None => Utc::now().with_timezone(&tz),
    };
    Ok(*cell.get_or_init(|| computed))
}

fn parse_override(value: &str) -> Result<NaiveDateTime, TimeRangeError> {
    if let Ok(datetime) = value.parse::<NaiveDateTime>() {
        return Ok(datetime);
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date.and_hms_opt(0, 0, 0).expect("valid time"));
    }
    Err(TimeRangeError::InvalidOverride {
        value: value.to_string(),
    })
}

/// Localizes a naive wall-clock time into `tz`.
///
/// Ambiguous times (clocks rolled back) take the earlier instant. Times
/// inside a clocks-forward gap shift ahead one hour to the next valid
/// wall clock.
pub(crate) fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    #[test]
    fn datetime_override_in_utc() {
        let resolver = TimeRangeResolver::new(
            chrono_tz::UTC,
            Some("2024-01-01T00:00:00".to_string()),
            None,
        );
        let start = resolver.start().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn datetime_override_with_microseconds() {
        let resolver = TimeRangeResolver::new(
            chrono_tz::UTC,
            Some("2024-03-15T14:30:05.123456".to_string()),
            None,
        );
        let start = resolver.start().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-03-15T14:30:05.123456+00:00");
    }

    #[test]
    fn date_override_becomes_local_midnight() {
        let resolver = TimeRangeResolver::new(
            tz("Europe/Paris"),
            Some("2024-01-01".to_string()),
            Some("2024-01-02".to_string()),
        );
        let range = resolver.range().unwrap();
        assert_eq!(range.start.to_rfc3339(), "2024-01-01T00:00:00+01:00");
        assert_eq!(range.end.to_rfc3339(), "2024-01-02T00:00:00+01:00");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let resolver =
            TimeRangeResolver::new(chrono_tz::UTC, Some("not-a-date".to_string()), None);
        let err = resolver.start().unwrap_err();
        assert!(matches!(err, TimeRangeError::InvalidOverride { ref value } if value == "not-a-date"));
    }

    #[test]
    fn bounds_resolve_once() {
        // Without overrides each bound falls back to the current instant,
        // so repeated calls only agree because the first result is cached.
        let resolver = TimeRangeResolver::new(chrono_tz::UTC, None, None);
        let first = resolver.start().unwrap();
        let second = resolver.start().unwrap();
        assert_eq!(first, second);

        let end_first = resolver.end().unwrap();
        let end_second = resolver.end().unwrap();
        assert_eq!(end_first, end_second);
    }

    #[test]
    fn start_and_end_resolve_independently() {
        let resolver = TimeRangeResolver::new(
            chrono_tz::UTC,
            Some("2024-01-01T08:00:00".to_string()),
            Some("2024-01-02T23:59:59.999999".to_string()),
        );
        let range = resolver.range().unwrap();
        assert_eq!(range.start.to_rfc3339(), "2024-01-01T08:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2024-01-02T23:59:59.999999+00:00");
    }

    mod localization {
        use super::*;

        #[test]
        fn gap_shifts_forward() {
            // 02:30 does not exist on the US spring-forward date.
            let resolver = TimeRangeResolver::new(
                tz("America/New_York"),
                Some("2024-03-10T02:30:00".to_string()),
                None,
            );
            let start = resolver.start().unwrap();
            assert_eq!(start.to_rfc3339(), "2024-03-10T03:30:00-04:00");
        }

        #[test]
        fn ambiguous_takes_earlier_instant() {
            // 01:30 occurs twice on the US fall-back date; the DST reading
            // comes first.
            let resolver = TimeRangeResolver::new(
                tz("America/New_York"),
                Some("2024-11-03T01:30:00".to_string()),
                None,
            );
            let start = resolver.start().unwrap();
            assert_eq!(start.to_rfc3339(), "2024-11-03T01:30:00-04:00");
        }
    }
}
