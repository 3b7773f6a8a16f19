//! Google Calendar API client.
//!
//! A thin HTTP client for the events endpoint of the Google Calendar API
//! v3: request building, status triage, and lenient conversion of the
//! wire format into core events.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use rofical_core::{CalendarEvent, EventSchedule};

use crate::error::{ApiError, ApiResult};
use crate::transport::{BoxFuture, CalendarTransport, EventsPage, ListQuery};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
///
/// Holds a bearer access token obtained elsewhere; acquiring and
/// refreshing credentials is outside this crate.
#[derive(Debug)]
pub struct GoogleEventsClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleEventsClient {
    /// Creates a new client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Fetches a single page of events.
    ///
    /// Recurring events are expanded into instances and the service orders
    /// them by start time within the calendar.
    async fn list_events_page(&self, query: ListQuery<'_>) -> ApiResult<EventsPage> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(query.calendar_id)
        );

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", query.time_min.to_rfc3339()),
                ("timeMax", query.time_max.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]);

        if let Some(token) = query.page_token {
            request = request.query(&[("pageToken", token.to_string())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::network("request timeout")
            } else if e.is_connect() {
                ApiError::network(format!("connection failed: {}", e))
            } else {
                ApiError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();

        // Handle rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ApiError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        // Handle authentication errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::authentication("access token expired or invalid"));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::authorization("access denied to calendar"));
        }

        // Handle other errors
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        // Parse response
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {}", e)))?;

        let list: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::invalid_response(format!("failed to parse response: {}", e)))?;

        let items = list.items.into_iter().filter_map(convert_event).collect();

        Ok(EventsPage {
            items,
            next_page_token: list.next_page_token,
        })
    }
}

impl CalendarTransport for GoogleEventsClient {
    fn list<'a>(&'a self, query: ListQuery<'a>) -> BoxFuture<'a, ApiResult<EventsPage>> {
        Box::pin(async move { self.list_events_page(query).await })
    }
}

/// Converts a wire event into a core event.
///
/// Cancelled events, and events whose times are missing, unparsable, or
/// mixed (a timed start against an all-day end), are skipped with a
/// warning rather than failing the page.
fn convert_event(event: ApiEvent) -> Option<CalendarEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id?;
    let summary = event.summary.unwrap_or_default();

    let start = event.start.and_then(parse_event_time);
    let end = event.end.and_then(parse_event_time);

    let schedule = match (start, end) {
        (Some(EventBound::Instant(start)), Some(EventBound::Instant(end))) => {
            EventSchedule::Timed { start, end }
        }
        (Some(EventBound::Date(start)), Some(EventBound::Date(end))) => {
            EventSchedule::AllDay { start, end }
        }
        _ => {
            warn!("event {} has missing or mismatched start/end times", id);
            return None;
        }
    };

    let conference_id = event
        .conference_data
        .and_then(|cd| cd.conference_id)
        .filter(|id| !id.is_empty());

    Some(CalendarEvent {
        id,
        summary,
        schedule,
        conference_id,
    })
}

/// A start or end bound parsed from the wire.
enum EventBound {
    Instant(DateTime<FixedOffset>),
    Date(NaiveDate),
}

fn parse_event_time(time: ApiEventTime) -> Option<EventBound> {
    match (time.date_time, time.date) {
        (Some(dt), _) => DateTime::parse_from_rfc3339(&dt)
            .map_err(|e| warn!("failed to parse event time {:?}: {}", dt, e))
            .ok()
            .map(EventBound::Instant),
        (None, Some(date)) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| warn!("failed to parse event date {:?}: {}", date, e))
            .ok()
            .map(EventBound::Date),
        (None, None) => None,
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    start: Option<ApiEventTime>,
    end: Option<ApiEventTime>,
    status: Option<String>,
    conference_data: Option<ApiConferenceData>,
}

/// Event time from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

/// Conference data from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConferenceData {
    conference_id: Option<String>,
}
