//! Paged event retrieval across one or more calendars.

use chrono::{DateTime, FixedOffset};
use rofical_core::CalendarEvent;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::transport::{CalendarTransport, ListQuery};

/// Ceiling on pages fetched per calendar before the fetch is abandoned.
///
/// A well-behaved service terminates its token chain long before this;
/// the ceiling turns a cyclic or endless cursor into an error instead of
/// an unbounded loop.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Retrieves events from calendars, following pagination cursors.
#[derive(Debug)]
pub struct EventFetcher<T> {
    transport: T,
    max_pages: usize,
}

impl<T: CalendarTransport> EventFetcher<T> {
    /// Creates a fetcher with the default page ceiling.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Overrides the page ceiling.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches every event of one calendar inside the window.
    ///
    /// Pages are followed until the service stops returning a cursor.
    /// Items accumulate in page order. Any page failure abandons the
    /// calendar and surfaces the error as-is.
    pub async fn fetch(
        &self,
        calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> ApiResult<Vec<CalendarEvent>> {
        let mut all_events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if pages >= self.max_pages {
                return Err(ApiError::pagination(format!(
                    "calendar {} exceeded {} pages",
                    calendar_id, self.max_pages
                )));
            }

            let page = self
                .transport
                .list(ListQuery {
                    calendar_id,
                    time_min,
                    time_max,
                    page_token: page_token.as_deref(),
                })
                .await?;
            pages += 1;

            all_events.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            calendar_id,
            pages,
            events = all_events.len(),
            "fetched calendar"
        );

        Ok(all_events)
    }

    /// Fetches events from several calendars, one calendar at a time.
    ///
    /// Results concatenate in the order the calendars are given. The
    /// first failing calendar aborts the rest.
    pub async fn fetch_all(
        &self,
        calendar_ids: &[String],
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> ApiResult<Vec<CalendarEvent>> {
        let mut all_events = Vec::new();

        for calendar_id in calendar_ids {
            let events = self.fetch(calendar_id, time_min, time_max).await?;
            all_events.extend(events);
        }

        Ok(all_events)
    }
}
