//! Error types for calendar API operations.
//!
//! Every transport failure surfaces as an [`ApiError`] carrying a kind the
//! caller can match on. Failures are terminal: nothing in this crate
//! retries, so one error aborts the whole fetch.

use std::fmt;

use thiserror::Error;

/// The category of an API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Authentication failed, the access token is invalid or expired.
    Authentication,
    /// Authorization failed, the calendar is not accessible.
    Authorization,
    /// Network error: connection failed, timeout, DNS resolution.
    Network,
    /// Rate limit exceeded.
    RateLimited,
    /// The server returned an error status.
    Server,
    /// The response could not be parsed.
    InvalidResponse,
    /// The pagination cursor chain exceeded the page ceiling.
    Pagination,
}

impl ApiErrorKind {
    /// Returns a stable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Network => "network",
            Self::RateLimited => "rate_limited",
            Self::Server => "server",
            Self::InvalidResponse => "invalid_response",
            Self::Pagination => "pagination",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from the calendar API or the transport beneath it.
#[derive(Debug, Error)]
pub struct ApiError {
    /// The kind categorizing this error.
    kind: ApiErrorKind,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    /// Creates a new API error with the given kind and message.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Authentication, message)
    }

    /// Creates an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Authorization, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::RateLimited, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidResponse, message)
    }

    /// Creates a pagination ceiling error.
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Pagination, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A specialized Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
