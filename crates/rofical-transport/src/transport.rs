//! The calendar transport trait.
//!
//! [`CalendarTransport`] is the seam between the paginated fetcher and the
//! network. It exposes exactly one operation: list a single page of events
//! for one calendar within a time window. Pagination policy lives in the
//! fetcher, authentication in the implementation.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, FixedOffset};

use rofical_core::CalendarEvent;

use crate::error::ApiResult;

/// A boxed future for async trait methods.
///
/// Async functions in traits are not yet stable in a form that supports
/// dynamic dispatch; boxed futures keep the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters for one page request against a calendar.
#[derive(Debug, Clone)]
pub struct ListQuery<'a> {
    /// Calendar identifier (e.g. "primary" or an email address).
    pub calendar_id: &'a str,
    /// Lower bound (inclusive) for event start.
    pub time_min: DateTime<FixedOffset>,
    /// Upper bound (exclusive) for event start.
    pub time_max: DateTime<FixedOffset>,
    /// Continuation cursor from the previous page, if any.
    pub page_token: Option<&'a str>,
}

/// One page of events plus the cursor to the next.
#[derive(Debug, Clone, Default)]
pub struct EventsPage {
    /// Events in service order.
    pub items: Vec<CalendarEvent>,
    /// Cursor for the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// An authenticated event-listing capability.
pub trait CalendarTransport: Send + Sync {
    /// Fetches one page of events.
    fn list<'a>(&'a self, query: ListQuery<'a>) -> BoxFuture<'a, ApiResult<EventsPage>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::DateTime;

    /// A transport that always fails, for exercising error paths.
    struct FailingTransport;

    impl CalendarTransport for FailingTransport {
        fn list<'a>(&'a self, _query: ListQuery<'a>) -> BoxFuture<'a, ApiResult<EventsPage>> {
            Box::pin(async { Err(ApiError::network("connection refused")) })
        }
    }

    fn bound(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[tokio::test]
    async fn transport_objects_are_dyn_compatible() {
        let transport: Box<dyn CalendarTransport> = Box::new(FailingTransport);
        let result = transport
            .list(ListQuery {
                calendar_id: "primary",
                time_min: bound("2024-01-01T00:00:00+00:00"),
                time_max: bound("2024-01-02T00:00:00+00:00"),
                page_token: None,
            })
            .await;
        assert!(result.is_err());
    }
}
