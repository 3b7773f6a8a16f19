//! Event types for calendar events.
//!
//! This module provides the core event types:
//! - [`CalendarEvent`]: the canonical event as consumed by the pipeline
//! - [`EventSchedule`]: the start/end pair, either timed or all-day

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// When an event takes place.
///
/// Calendar events come in two shapes:
/// - **Timed**: start and end instants, each keeping the offset the calendar
///   service reported
/// - **AllDay**: start and end calendar dates, with no clock times
///
/// One variant holds both bounds, so an event with a timed start and an
/// all-day end cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventSchedule {
    /// A timed event with offset-preserving start and end instants.
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
    /// An all-day event spanning whole calendar dates.
    AllDay { start: NaiveDate, end: NaiveDate },
}

impl EventSchedule {
    /// Returns `true` if this is an all-day schedule.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay { .. })
    }

    /// Returns the key events are ordered by.
    ///
    /// Timed starts render as RFC 3339 with their source offset; all-day
    /// starts render as `YYYY-MM-DD`. Both forms open with the date, so
    /// they collate together under plain string comparison.
    pub fn sort_key(&self) -> String {
        match self {
            Self::Timed { start, .. } => start.to_rfc3339(),
            Self::AllDay { start, .. } => start.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A calendar event as consumed by the display pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier assigned by the calendar service.
    pub id: String,
    /// The event title. Empty when the service omits it.
    pub summary: String,
    /// When the event takes place.
    pub schedule: EventSchedule,
    /// Conference code of the attached meeting, if any (e.g. "abc-defg-hij").
    pub conference_id: Option<String>,
}

impl CalendarEvent {
    /// Creates a new event with no conference attached.
    pub fn new(id: impl Into<String>, summary: impl Into<String>, schedule: EventSchedule) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            schedule,
            conference_id: None,
        }
    }

    /// Builder method to attach a conference code.
    pub fn with_conference_id(mut self, conference_id: impl Into<String>) -> Self {
        self.conference_id = Some(conference_id.into());
        self
    }

    /// Returns `true` if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.schedule.is_all_day()
    }

    /// Returns the key this event is ordered by.
    pub fn sort_key(&self) -> String {
        self.schedule.sort_key()
    }
}
