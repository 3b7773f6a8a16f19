//! Core types: events, time ranges, line formatting, menu actions

pub mod event;
pub mod format;
pub mod selection;
pub mod time;

pub use event::{CalendarEvent, EventSchedule};
pub use format::{CONFERENCE_MARKER, DayLabel, DisplayLine, TimeLabel, format_event};
pub use selection::{MenuAction, decode_selection, meeting_url};
pub use time::{TimeRange, TimeRangeError, TimeRangeResolver};
