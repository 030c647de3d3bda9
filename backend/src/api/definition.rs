//! API contract definitions.
//!
//! This module contains the trait definitions and type signatures that define
//! the API surface of both services. These are independent of any particular
//! implementation; the only thing an implementation supplies is the upstream
//! call.

use super::response;
use crate::accidents::{
    self, AccidentLog, AccidentParams, AccidentTypeResult, DateRange,
    filter_logs,
};
use crate::oauth::{self, AuthToken, parse_auth_request};
use chrono::NaiveDate;
use dropshot::{Body, HttpError, HttpResponseOk, RequestContext, UntypedBody};
use http::{Response, StatusCode};
use schemars::JsonSchema;
use serde::Serialize;
use std::future::Future;

/// Response from `/health`
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Health status (always `"ok"`).
    ///
    /// This indicates that the API server is up and nothing more.
    pub status: String,
}

impl HealthResponse {
    /// The only response.
    fn ok() -> Self {
        Self { status: "ok".to_owned() }
    }
}

/// Upstream access for the accident-type service.
///
/// Implement this trait to change where accident logs come from (e.g., for
/// testing with mocks).
pub trait AccidentsBase: Send + Sync {
    /// Fetch all accident logs in `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the logs could not be fetched.
    fn fetch_accident_logs(
        &self,
        range: &DateRange,
        log: &slog::Logger,
    ) -> impl Future<Output = accidents::Result<Vec<AccidentLog>>> + Send;
}

/// Upstream access for the auth-token service.
pub trait AuthBase: Send + Sync {
    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails.
    fn exchange_code(
        &self,
        code: &str,
        log: &slog::Logger,
    ) -> impl Future<Output = oauth::Result<AuthToken>> + Send;
}

/// Validate `params`, fetch matching accident logs, and extract their types.
///
/// `today` is used to fill in default dates.
///
/// # Errors
///
/// Returns an error without fetching anything if `params` are invalid, or
/// any error from [`AccidentsBase::fetch_accident_logs()`].
pub async fn accident_types<C: AccidentsBase>(
    context: &C,
    params: AccidentParams,
    today: NaiveDate,
    log: &slog::Logger,
) -> accidents::Result<Vec<AccidentTypeResult>> {
    let query = params.validate(today)?;
    let logs = context.fetch_accident_logs(&query.range, log).await?;
    let results = filter_logs(&logs, query.accident_type.as_deref());
    slog::info!(
        log,
        "Found {} accident types in {} logs",
        results.len(),
        logs.len()
    );
    Ok(results)
}

/// Get the code out of an `/auth` request body and exchange it.
///
/// # Errors
///
/// Returns an error without contacting the token endpoint if the body is
/// malformed or has no code, or any error from
/// [`AuthBase::exchange_code()`].
pub async fn auth_token<C: AuthBase>(
    context: &C,
    body: &[u8],
    log: &slog::Logger,
) -> oauth::Result<AuthToken> {
    let code = parse_auth_request(body)?;
    context.exchange_code(&code, log).await
}

/// Accident-type service.
///
/// This trait defines the HTTP API surface using Dropshot’s endpoint
/// attributes. The default implementations delegate upstream calls to the
/// `AccidentsBase` trait, allowing for multiple implementations (production,
/// mock, etc.).
#[dropshot::api_description]
pub trait AccidentsApi {
    /// The context type must implement `AccidentsBase`.
    type Context: AccidentsBase;

    /// Handle `GET /accidents`
    ///
    /// Returns accident logs tagged with an accident type. Responds with a
    /// JSON array, or `{"error": …}` with status 400 or 500.
    ///
    /// Optional query parameters: `start_date` and `end_date` (`YYYY-MM-DD`),
    /// and `accident_type`. These are read from the raw query string so that
    /// every response, even for an odd query, has CORS headers.
    #[endpoint {
        method = GET,
        path = "/accidents",
    }]
    async fn get_accidents(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<Response<Body>, HttpError> {
        let log = &rqctx.log;
        let today = chrono::Local::now().date_naive();
        let params = AccidentParams::from_query(rqctx.request.uri().query());
        match accident_types(rqctx.context(), params, today, log).await {
            Ok(results) => {
                response::json(response::cors_builder(), StatusCode::OK, &results)
            }
            Err(error) => {
                if error.is_client_error() {
                    slog::info!(log, "Rejected accident query: {error}");
                } else {
                    slog::error!(log, "Procore API error: {error}");
                }
                response::json(
                    response::cors_builder(),
                    error.status_code(),
                    &error.to_body(),
                )
            }
        }
    }

    /// Handle `OPTIONS /accidents` (CORS preflight)
    #[endpoint {
        method = OPTIONS,
        path = "/accidents",
    }]
    async fn preflight_accidents(
        _rqctx: RequestContext<Self::Context>,
    ) -> Result<Response<Body>, HttpError> {
        response::empty(response::cors_builder(), StatusCode::NO_CONTENT)
    }

    /// Handle `GET /health`
    #[endpoint {
        method = GET,
        path = "/health",
    }]
    async fn accidents_health(
        _rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<HealthResponse>, HttpError> {
        Ok(HttpResponseOk(HealthResponse::ok()))
    }
}

/// Auth-token service.
///
/// The default implementations delegate the token exchange to the `AuthBase`
/// trait.
#[dropshot::api_description]
pub trait AuthApi {
    /// The context type must implement `AuthBase`.
    type Context: AuthBase;

    /// Handle `POST /auth`
    ///
    /// Expects `{"code": "…"}` and responds with the access token, or
    /// `{"error": …}` with status 400 or 500.
    #[endpoint {
        method = POST,
        path = "/auth",
    }]
    async fn post_auth(
        rqctx: RequestContext<Self::Context>,
        body: UntypedBody,
    ) -> Result<Response<Body>, HttpError> {
        let log = &rqctx.log;
        match auth_token(rqctx.context(), body.as_bytes(), log).await {
            Ok(token) => {
                response::json(response::builder(), StatusCode::OK, &token)
            }
            Err(error) => {
                if error.is_client_error() {
                    slog::info!(log, "Rejected auth request: {error}");
                } else {
                    slog::error!(log, "Token exchange failed: {error}");
                }
                response::json(
                    response::builder(),
                    error.status_code(),
                    &error.to_body(),
                )
            }
        }
    }

    /// Handle `GET /home`
    #[endpoint {
        method = GET,
        path = "/home",
    }]
    async fn home(
        _rqctx: RequestContext<Self::Context>,
    ) -> Result<Response<Body>, HttpError> {
        response::text(response::builder(), StatusCode::OK, "Hello World\n")
    }

    /// Handle `GET /health`
    #[endpoint {
        method = GET,
        path = "/health",
    }]
    async fn auth_health(
        _rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<HealthResponse>, HttpError> {
        Ok(HttpResponseOk(HealthResponse::ok()))
    }
}
