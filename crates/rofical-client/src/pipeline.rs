//! The agenda pipeline: fetch every calendar, merge, sort, format.

use chrono::{DateTime, Utc};
use rofical_core::{DisplayLine, TimeRange, format_event};
use rofical_transport::{CalendarTransport, EventFetcher};
use tracing::debug;

use crate::config::Settings;
use crate::error::ClientResult;

/// Fetches the configured calendars and renders the merged agenda.
///
/// Events concatenate in calendar order and then sort by their start
/// key. The sort is stable, so events with equal keys keep the
/// concatenation order.
pub async fn collect_agenda<T: CalendarTransport>(
    fetcher: &EventFetcher<T>,
    settings: &Settings,
    range: &TimeRange,
    now: DateTime<Utc>,
) -> ClientResult<Vec<DisplayLine>> {
    let mut events = fetcher
        .fetch_all(
            &settings.calendar_ids,
            range.start.fixed_offset(),
            range.end.fixed_offset(),
        )
        .await?;

    events.sort_by_cached_key(|event| event.sort_key());
    debug!(events = events.len(), "collected agenda");

    Ok(events
        .into_iter()
        .map(|event| format_event(&event, settings.timezone, now))
        .collect())
}
