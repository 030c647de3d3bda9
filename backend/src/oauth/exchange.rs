//! Exchange an OAuth authorization code for an access token.

use super::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redirect URI registered for out-of-band (copy and paste) codes.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// How long to wait for the token endpoint before giving up.
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth client configuration.
///
/// Nothing here is required at startup; an exchange without a token URL
/// fails, and missing credentials are sent as empty strings.
#[derive(Clone, Debug, Default)]
pub struct OAuthConfig {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Token endpoint, e.g. `https://login-sandbox.procore.com/oauth/token`.
    pub token_url: Option<String>,
}

/// Body of a request to `/auth`.
#[derive(Debug, Deserialize)]
struct AuthRequest {
    /// The authorization code.
    #[serde(default)]
    code: Option<String>,
}

/// Get the authorization code out of a `/auth` request body.
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] if the body isn’t a JSON object, or
/// [`Error::MissingCode`] if it doesn’t contain a non-empty `code`.
pub fn parse_auth_request(body: &[u8]) -> Result<String> {
    let request: AuthRequest =
        serde_json::from_slice(body).map_err(Error::MalformedRequest)?;
    request.code.filter(|code| !code.is_empty()).ok_or(Error::MissingCode)
}

/// Form sent to the token endpoint.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    /// Always `"authorization_code"`.
    grant_type: &'a str,
    /// The OAuth client ID.
    client_id: &'a str,
    /// The OAuth client secret.
    client_secret: &'a str,
    /// The authorization code.
    code: &'a str,
    /// Must match the redirect URI the code was issued for.
    redirect_uri: &'a str,
}

/// An access token, as returned by the token endpoint and relayed to clients.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthToken {
    /// The access token.
    pub access_token: String,
    /// Token type, usually `"bearer"`.
    pub token_type: String,
    /// Number of seconds until the access token expires.
    pub expires_in: u64,
}

/// Exchange `code` for an access token.
///
/// This makes exactly one request. The token is not cached.
///
/// # Errors
///
/// Returns an error if no token URL is configured, if the token endpoint
/// can’t be reached or returns a failure status, or if its response isn’t a
/// token.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &OAuthConfig,
    code: &str,
    log: &slog::Logger,
) -> Result<AuthToken> {
    let token_url = config.token_url.as_deref().ok_or(Error::NoTokenUrl)?;

    let response = client
        .post(token_url)
        .form(&TokenRequest {
            grant_type: "authorization_code",
            client_id: &config.client_id,
            client_secret: &config.client_secret,
            code,
            redirect_uri: OOB_REDIRECT_URI,
        })
        .send()
        .await
        .map_err(|error| {
            slog::error!(log, "Token request failed: {error}");
            Error::Unavailable(error)
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|error| {
        slog::error!(log, "Failed to read token response: {error}");
        Error::Read(error)
    })?;

    if !status.is_success() {
        slog::warn!(log, "Token endpoint returned {status}");
        return Err(Error::Rejected { status, body });
    }

    serde_json::from_str(&body).map_err(|error| {
        slog::error!(log, "Failed to parse token response: {error}");
        Error::Decode(error)
    })
}
