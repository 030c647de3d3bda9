//! Build responses whose status, headers, and body we control completely.
//!
//! Dropshot’s typed responses can’t carry the `{"error": …}` bodies clients
//! of these services expect, or CORS headers on errors.

use dropshot::{Body, HttpError};
use http::header;
use http::response::Builder;
use http::{Response, StatusCode};
use serde::Serialize;

/// Headers that let browsers on any origin call the accident service.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Start a response.
#[must_use]
pub fn builder() -> Builder {
    Response::builder()
}

/// Start a response that allows cross-origin `GET` requests.
#[must_use]
pub fn cors_builder() -> Builder {
    CORS_HEADERS
        .into_iter()
        .fold(builder(), |builder, (name, value)| builder.header(name, value))
}

/// Finish a response with a JSON body.
///
/// # Errors
///
/// Returns a 500 error if `body` can’t be serialized or the response can’t
/// be built.
pub fn json<T: Serialize>(
    builder: Builder,
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, HttpError> {
    let body = serde_json::to_vec(body).map_err(|error| {
        HttpError::for_internal_error(format!(
            "Failed to serialize response: {error}"
        ))
    })?;
    finish(
        builder
            .status(status)
            .header(header::CONTENT_TYPE, "application/json"),
        Body::with_content(body),
    )
}

/// Finish a response with a plain text body.
///
/// # Errors
///
/// Returns a 500 error if the response can’t be built.
pub fn text(
    builder: Builder,
    status: StatusCode,
    body: &'static str,
) -> Result<Response<Body>, HttpError> {
    finish(
        builder
            .status(status)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        Body::with_content(body),
    )
}

/// Finish a response with no body.
///
/// # Errors
///
/// Returns a 500 error if the response can’t be built.
pub fn empty(
    builder: Builder,
    status: StatusCode,
) -> Result<Response<Body>, HttpError> {
    finish(builder.status(status), Body::empty())
}

/// Attach the body.
fn finish(builder: Builder, body: Body) -> Result<Response<Body>, HttpError> {
    builder.body(body).map_err(|error| {
        HttpError::for_internal_error(format!(
            "Failed to build response: {error}"
        ))
    })
}
