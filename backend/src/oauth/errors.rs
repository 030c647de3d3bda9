//! Errors encountered exchanging an authorization code.

use http::StatusCode;
use serde::Serialize;
use std::result;

/// `Result` type for `Error`.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors encountered exchanging an authorization code.
///
/// The `Display` output is sent to the client as is, so it never includes
/// details of underlying errors. Those are available through `source()`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request body was not a JSON object with an optional `code`.
    #[error("Invalid request body")]
    MalformedRequest(#[source] serde_json::Error),

    /// A required parameter was missing or empty.
    #[error("Authorization code is required")]
    MissingCode,

    /// No token endpoint was configured.
    #[error("failed to create token request")]
    NoTokenUrl,

    /// The token endpoint could not be reached.
    #[error("failed to call token endpoint")]
    Unavailable(#[source] reqwest::Error),

    /// The token endpoint’s response could not be read.
    #[error("failed to read token response")]
    Read(#[source] reqwest::Error),

    /// The token endpoint refused the exchange. Contains its response body.
    #[error("{body}")]
    Rejected {
        /// HTTP status returned by the token endpoint.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The token endpoint returned something other than a token.
    #[error("failed to parse token response")]
    Decode(#[source] serde_json::Error),
}

/// JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub error: String,
}

impl Error {
    /// Whether this error was caused by the client’s request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedRequest(_) | Self::MissingCode)
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
        ErrorBody { error: self.to_string() }
    }
}
