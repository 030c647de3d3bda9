//! Errors encountered while serving accident types.

use http::StatusCode;
use serde::Serialize;
use std::fmt;
use std::result;

/// `Result` type for `Error`.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Which end of the date range a parameter belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateBound {
    /// `start_date`
    Start,
    /// `end_date`
    End,
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors encountered while serving accident types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A date query parameter was not `YYYY-MM-DD`.
    #[error("Invalid {bound} date format")]
    InvalidDate {
        /// The parameter that failed to parse.
        bound: DateBound,
        /// The parse failure.
        source: chrono::ParseError,
    },

    /// The request to Procore could not be completed.
    #[error("API request failed: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// Procore answered with a non-success status.
    #[error("procore API returned status: {}", .0.as_u16())]
    UpstreamStatus(StatusCode),

    /// Procore answered with something other than a list of accident logs.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// JSON body sent to clients when a request fails.
///
/// `details` is only present for upstream failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short description of what went wrong.
    pub error: String,

    /// The underlying cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Error {
    /// Whether this error was caused by the client’s request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDate { .. })
    }

    /// HTTP status to respond with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Body to respond with.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        if self.is_client_error() {
            ErrorBody { error: self.to_string(), details: None }
        } else {
            ErrorBody {
                error: "Failed to fetch accident logs".to_owned(),
                details: Some(self.to_string()),
            }
        }
    }
}
