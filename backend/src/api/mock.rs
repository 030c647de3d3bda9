//! Mock implementations of the APIs for testing.

use super::definition::{AccidentsApi, AccidentsBase, AuthApi, AuthBase};
use crate::accidents::{self, AccidentLog, DateRange};
use crate::oauth::{self, AuthToken};
use http::StatusCode;
use std::sync::{Mutex, PoisonError};

/// Mock accident service state that returns predefined accident logs.
#[derive(Debug, Default)]
pub struct MockAccidents {
    /// Accident logs to return.
    pub logs: Vec<AccidentLog>,
    /// Status to fail with instead of returning logs (if Some).
    pub upstream_status: Option<StatusCode>,
    /// Ranges that were fetched, in order.
    fetched: Mutex<Vec<DateRange>>,
}

impl MockAccidents {
    /// Create a mock state that returns `logs`.
    #[must_use]
    pub fn new(logs: Vec<AccidentLog>) -> Self {
        Self { logs, ..Self::default() }
    }

    /// Create a mock state where Procore returns a failure status.
    #[must_use]
    pub fn with_upstream_status(status: StatusCode) -> Self {
        Self { upstream_status: Some(status), ..Self::default() }
    }

    /// Date ranges requested so far.
    pub fn fetched(&self) -> Vec<DateRange> {
        self.fetched.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AccidentsBase for MockAccidents {
    async fn fetch_accident_logs(
        &self,
        range: &DateRange,
        _log: &slog::Logger,
    ) -> accidents::Result<Vec<AccidentLog>> {
        self.fetched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*range);

        if let Some(status) = self.upstream_status {
            Err(accidents::Error::UpstreamStatus(status))
        } else {
            Ok(self.logs.clone())
        }
    }
}

/// Mock implementation type for the `AccidentsApi` trait.
pub enum MockAccidentsApi {}

impl AccidentsApi for MockAccidentsApi {
    type Context = MockAccidents;
}

/// Mock auth service state that returns a predefined token.
#[derive(Debug)]
pub struct MockAuth {
    /// The token to return.
    pub token: AuthToken,
    /// Body the token endpoint rejects the exchange with (if Some).
    pub rejection: Option<String>,
    /// Codes that were exchanged, in order.
    codes: Mutex<Vec<String>>,
}

impl MockAuth {
    /// Create a mock state with a successful default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: AuthToken {
                access_token: "mock_token_12345".to_owned(),
                token_type: "bearer".to_owned(),
                expires_in: 5400,
            },
            rejection: None,
            codes: Mutex::default(),
        }
    }

    /// Create a mock state where the token endpoint rejects every code.
    #[must_use]
    pub fn with_rejection(body: String) -> Self {
        Self { rejection: Some(body), ..Self::new() }
    }

    /// Codes exchanged so far.
    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBase for MockAuth {
    async fn exchange_code(
        &self,
        code: &str,
        _log: &slog::Logger,
    ) -> oauth::Result<AuthToken> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(code.to_owned());

        if let Some(body) = &self.rejection {
            Err(oauth::Error::Rejected {
                status: StatusCode::BAD_REQUEST,
                body: body.clone(),
            })
        } else {
            Ok(self.token.clone())
        }
    }
}

/// Mock implementation type for the `AuthApi` trait.
pub enum MockAuthApi {}

impl AuthApi for MockAuthApi {
    type Context = MockAuth;
}
