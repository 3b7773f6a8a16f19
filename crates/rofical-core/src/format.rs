//! Fixed-width agenda line rendering.
//!
//! Each event becomes one [`DisplayLine`] with five columns: day label,
//! time label, conference marker, summary, conference code. Column widths
//! are fixed so the lines align in the launcher menu, and a line that
//! carries a conference code ends with it, which is what selection
//! decoding keys on.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::event::{CalendarEvent, EventSchedule};
use crate::time::localize;

/// Prefix shown before the summary when the event carries a conference.
pub const CONFERENCE_MARKER: &str = "📹 ";

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// The day column of an agenda line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    /// The event starts on the current local date.
    Today,
    /// The event starts on the next local date.
    Tomorrow,
    /// Any other local date, shown as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// The time column of an agenda line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabel {
    /// Both bounds sit at local midnight.
    AllDay,
    /// Local wall-clock start and end.
    Range { start: NaiveTime, end: NaiveTime },
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllDay => f.write_str("All day"),
            Self::Range { start, end } => {
                write!(f, "{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
        }
    }
}

/// One rendered agenda line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Day column label.
    pub day: DayLabel,
    /// Time column label.
    pub time: TimeLabel,
    /// The event summary, before truncation.
    pub summary: String,
    /// Conference code shown in the trailing column.
    pub conference_id: Option<String>,
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.conference_id.is_some() {
            CONFERENCE_MARKER
        } else {
            ""
        };
        write!(
            f,
            "{:<12} {:<16} {}{:<46.46} {:<12}",
            self.day.to_string(),
            self.time.to_string(),
            marker,
            self.summary,
            self.conference_id.as_deref().unwrap_or(""),
        )
    }
}

/// Renders one event into a [`DisplayLine`].
///
/// Timed bounds are converted into `tz`; all-day dates count as midnight
/// there. The day label measures whole days from the event start to `now`
/// advanced to the end of its local day, so events on the current local
/// date read "Today" and events on the next read "Tomorrow".
pub fn format_event(event: &CalendarEvent, tz: Tz, now: DateTime<Utc>) -> DisplayLine {
    let (start_local, end_local) = match &event.schedule {
        EventSchedule::Timed { start, end } => (start.with_timezone(&tz), end.with_timezone(&tz)),
        EventSchedule::AllDay { start, end } => (midnight_in(tz, *start), midnight_in(tz, *end)),
    };

    let time = match &event.schedule {
        EventSchedule::AllDay { .. } => TimeLabel::AllDay,
        EventSchedule::Timed { .. } => {
            if start_local.time() == NaiveTime::MIN && end_local.time() == NaiveTime::MIN {
                TimeLabel::AllDay
            } else {
                TimeLabel::Range {
                    start: start_local.time(),
                    end: end_local.time(),
                }
            }
        }
    };

    DisplayLine {
        day: day_label(start_local, now.with_timezone(&tz)),
        time,
        summary: event.summary.clone(),
        conference_id: event.conference_id.clone(),
    }
}

fn day_label(start_local: DateTime<Tz>, now_local: DateTime<Tz>) -> DayLabel {
    let reference = end_of_day(now_local);
    let delta = reference - start_local;
    // Floored, not truncated: an event later tomorrow is -1, not 0.
    let days = delta
        .num_microseconds()
        .map(|us| us.div_euclid(MICROS_PER_DAY))
        .unwrap_or_else(|| delta.num_days());
    match days {
        0 => DayLabel::Today,
        -1 => DayLabel::Tomorrow,
        _ => DayLabel::Date(start_local.date_naive()),
    }
}

fn end_of_day(now_local: DateTime<Tz>) -> DateTime<Tz> {
    let end = now_local
        .date_naive()
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .expect("valid time");
    localize(now_local.timezone(), end)
}

fn midnight_in(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_hms_opt(0, 0, 0).expect("valid time"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn offset_dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    fn timed(summary: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(
            "ev",
            summary,
            EventSchedule::Timed {
                start: offset_dt(start),
                end: offset_dt(end),
            },
        )
    }

    fn all_day(summary: &str, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        CalendarEvent::new("ev", summary, EventSchedule::AllDay { start, end })
    }

    mod day_labels {
        use super::*;

        #[test]
        fn event_today() {
            let event = timed("Standup", "2024-03-15T09:00:00+00:00", "2024-03-15T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0));
            assert_eq!(line.day, DayLabel::Today);
        }

        #[test]
        fn event_early_tomorrow() {
            // One hour past the end-of-day reference. Truncating division
            // would call this day zero.
            let event = timed("Standup", "2024-03-16T01:00:00+00:00", "2024-03-16T02:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 22, 0, 0));
            assert_eq!(line.day, DayLabel::Tomorrow);
        }

        #[test]
        fn event_late_tomorrow() {
            let event = timed("Review", "2024-03-16T23:00:00+00:00", "2024-03-16T23:30:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0));
            assert_eq!(line.day, DayLabel::Tomorrow);
        }

        #[test]
        fn event_beyond_tomorrow_shows_date() {
            let event = timed("Offsite", "2024-03-18T10:00:00+00:00", "2024-03-18T16:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0));
            assert_eq!(line.day, DayLabel::Date(date(2024, 3, 18)));
            assert_eq!(line.day.to_string(), "2024-03-18");
        }

        #[test]
        fn past_event_shows_date() {
            let event = timed("Retro", "2024-03-14T09:00:00+00:00", "2024-03-14T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0));
            assert_eq!(line.day, DayLabel::Date(date(2024, 3, 14)));
        }

        #[test]
        fn label_follows_the_display_timezone() {
            // 23:30 UTC is already tomorrow in Paris.
            let event = timed("Late call", "2024-01-10T23:30:00+00:00", "2024-01-11T00:00:00+00:00");
            let line = format_event(&event, tz("Europe/Paris"), utc(2024, 1, 10, 22, 0, 0));
            assert_eq!(line.day, DayLabel::Tomorrow);

            let line = format_event(&event, chrono_tz::UTC, utc(2024, 1, 10, 22, 0, 0));
            assert_eq!(line.day, DayLabel::Today);
        }
    }

    mod time_labels {
        use super::*;

        #[test]
        fn all_day_event_reads_all_day() {
            let event = all_day("Company holiday", date(2024, 6, 1), date(2024, 6, 1));
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 6, 1, 10, 0, 0));
            assert_eq!(line.time, TimeLabel::AllDay);
            assert_eq!(line.time.to_string(), "All day");
        }

        #[test]
        fn timed_midnight_to_midnight_reads_all_day() {
            let event = timed("Maintenance", "2024-06-01T00:00:00+00:00", "2024-06-02T00:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 6, 1, 10, 0, 0));
            assert_eq!(line.time, TimeLabel::AllDay);
        }

        #[test]
        fn timed_event_reads_as_range() {
            let event = timed("Standup", "2024-03-15T09:05:00+00:00", "2024-03-15T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0));
            assert_eq!(line.time.to_string(), "09:05 - 10:00");
        }

        #[test]
        fn times_convert_into_the_display_timezone() {
            let event = timed("Sync", "2024-01-10T09:00:00+00:00", "2024-01-10T10:00:00+00:00");
            let line = format_event(&event, tz("Europe/Paris"), utc(2024, 1, 10, 8, 0, 0));
            assert_eq!(line.time.to_string(), "10:00 - 11:00");
        }

        #[test]
        fn midnight_check_applies_to_local_times() {
            // Midnight-to-midnight in UTC is 01:00 in Paris, so not all day
            // there.
            let event = timed("Window", "2024-01-10T00:00:00+00:00", "2024-01-11T00:00:00+00:00");
            let line = format_event(&event, tz("Europe/Paris"), utc(2024, 1, 10, 8, 0, 0));
            assert_eq!(line.time.to_string(), "01:00 - 01:00");
        }
    }

    mod lines {
        use super::*;

        #[test]
        fn conference_line_layout() {
            let event = timed("Standup", "2024-03-15T09:00:00+00:00", "2024-03-15T10:00:00+00:00")
                .with_conference_id("xyz-abcd-efg");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0)).to_string();

            let expected = format!(
                "{:<12} {:<16} 📹 {:<46.46} {:<12}",
                "Today", "09:00 - 10:00", "Standup", "xyz-abcd-efg"
            );
            assert_eq!(line, expected);
            assert!(line.starts_with("Today        09:00 - 10:00    📹 Standup"));
            assert!(line.ends_with("xyz-abcd-efg"));
            assert_eq!(line.chars().count(), 91);
        }

        #[test]
        fn line_without_conference_has_no_marker() {
            let event = timed("Focus block", "2024-03-15T09:00:00+00:00", "2024-03-15T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0)).to_string();

            assert!(!line.contains(CONFERENCE_MARKER));
            assert_eq!(line.chars().count(), 89);
        }

        #[test]
        fn long_summary_truncates_to_46_chars() {
            let summary = "a".repeat(60);
            let event = timed(&summary, "2024-03-15T09:00:00+00:00", "2024-03-15T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0)).to_string();

            assert!(line.contains(&"a".repeat(46)));
            assert!(!line.contains(&"a".repeat(47)));
            assert_eq!(line.chars().count(), 89);
        }

        #[test]
        fn empty_summary_still_lines_up() {
            let event = timed("", "2024-03-15T09:00:00+00:00", "2024-03-15T10:00:00+00:00");
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 3, 15, 8, 0, 0)).to_string();
            assert_eq!(line.chars().count(), 89);
        }

        #[test]
        fn all_day_line_layout() {
            let event = all_day("Company holiday", date(2024, 6, 1), date(2024, 6, 2));
            let line = format_event(&event, chrono_tz::UTC, utc(2024, 6, 1, 10, 0, 0)).to_string();
            assert!(line.starts_with("Today        All day          Company holiday"));
        }
    }
}
