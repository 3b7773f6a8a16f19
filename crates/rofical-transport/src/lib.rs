//! Calendar transport: the listing trait, its Google Calendar
//! implementation, and the paginated fetcher built on top.

pub mod error;
pub mod fetch;
pub mod google;
pub mod transport;

pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use fetch::EventFetcher;
pub use google::GoogleEventsClient;
pub use transport::{BoxFuture, CalendarTransport, EventsPage, ListQuery};
