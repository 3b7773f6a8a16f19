//! Client error types.

use std::fmt;

use rofical_core::TimeRangeError;
use rofical_transport::ApiError;

use crate::config::ConfigError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(ConfigError),
    /// Time window resolution error.
    TimeRange(TimeRangeError),
    /// Calendar API error.
    Api(ApiError),
    /// Action failed (opening the meeting URL).
    Action(String),
}

impl ClientError {
    /// The process exit code for this error.
    ///
    /// Configuration problems exit with 2, API failures with 3, anything
    /// else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::TimeRange(_) => 2,
            Self::Api(_) => 3,
            Self::Action(_) => 1,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {}", err),
            Self::TimeRange(err) => write!(f, "configuration error: {}", err),
            Self::Api(err) => write!(f, "API error: {}", err),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::TimeRange(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::Action(_) => None,
        }
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<TimeRangeError> for ClientError {
    fn from(err: TimeRangeError) -> Self {
        Self::TimeRange(err)
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}
