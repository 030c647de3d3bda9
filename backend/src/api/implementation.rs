//! Production implementation of the APIs.
//!
//! This module contains the concrete implementations of the API traits,
//! which call Procore and its OAuth token endpoint.

use super::definition::{AccidentsApi, AccidentsBase, AuthApi, AuthBase};
use crate::accidents::{
    self, AccidentLog, DateRange, ProcoreConfig, UPSTREAM_TIMEOUT,
};
use crate::oauth::{self, AuthToken, OAuthConfig, TOKEN_TIMEOUT};

/// State for the accident-type service (Procore configuration and client).
#[derive(Clone, Debug)]
pub struct AccidentsState {
    /// Where and as whom to fetch accident logs.
    pub procore: ProcoreConfig,
    /// HTTP client for making requests to Procore.
    pub http_client: reqwest::Client,
}

impl AccidentsState {
    /// Create state with a client that times out after [`UPSTREAM_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can’t be initialized.
    pub fn new(procore: ProcoreConfig) -> reqwest::Result<Self> {
        Ok(Self {
            procore,
            http_client: reqwest::Client::builder()
                .timeout(UPSTREAM_TIMEOUT)
                .build()?,
        })
    }
}

impl AccidentsBase for AccidentsState {
    async fn fetch_accident_logs(
        &self,
        range: &DateRange,
        log: &slog::Logger,
    ) -> accidents::Result<Vec<AccidentLog>> {
        accidents::fetch_accident_logs(
            &self.http_client,
            &self.procore,
            range,
            log,
        )
        .await
    }
}

/// State for the auth-token service (OAuth client and HTTP client).
#[derive(Clone, Debug)]
pub struct AuthState {
    /// OAuth client configuration.
    pub oauth: OAuthConfig,
    /// HTTP client for making requests to the token endpoint.
    pub http_client: reqwest::Client,
}

impl AuthState {
    /// Create state with a client that times out after [`TOKEN_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can’t be initialized.
    pub fn new(oauth: OAuthConfig) -> reqwest::Result<Self> {
        Ok(Self {
            oauth,
            http_client: reqwest::Client::builder()
                .timeout(TOKEN_TIMEOUT)
                .build()?,
        })
    }
}

impl AuthBase for AuthState {
    async fn exchange_code(
        &self,
        code: &str,
        log: &slog::Logger,
    ) -> oauth::Result<AuthToken> {
        oauth::exchange_code(&self.http_client, &self.oauth, code, log).await
    }
}

/// Implementation type for the `AccidentsApi` trait.
///
/// This is an empty enum that serves as the implementation marker.
/// All the actual logic is in the default trait methods.
pub enum AccidentsApiImpl {}

impl AccidentsApi for AccidentsApiImpl {
    type Context = AccidentsState;
}

/// Implementation type for the `AuthApi` trait.
pub enum AuthApiImpl {}

impl AuthApi for AuthApiImpl {
    type Context = AuthState;
}
