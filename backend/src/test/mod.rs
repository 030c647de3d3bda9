//! Test helpers for running servers and faking Procore.

use dropshot::{
    ApiDescription, Body, ConfigDropshot, HttpError, HttpServer,
    HttpServerStarter, Path, RequestContext, ServerContext, UntypedBody,
    endpoint,
};
use http::{HeaderMap, Response, StatusCode, header};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Mutex;

/// Path of the fake token endpoint.
pub const TOKEN_PATH: &str = "/oauth/token";

/// A logger that discards everything.
#[must_use]
pub fn quiet_log() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// Start a server on an ephemeral port on localhost.
///
/// Must be called from within a tokio runtime.
///
/// # Panics
///
/// Panics if the server can’t be started.
pub fn start<C: ServerContext>(
    api: ApiDescription<C>,
    context: C,
) -> HttpServer<C> {
    let config = ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024,
        ..ConfigDropshot::default()
    };
    HttpServerStarter::new(&config, api, context, &quiet_log())
        .unwrap()
        .start()
}

/// Base URL of a running server, e.g. `http://127.0.0.1:34567`.
#[must_use]
pub fn base_url<C: ServerContext>(server: &HttpServer<C>) -> String {
    format!("http://{}", server.local_addr())
}

/// URL of `path` on a running server.
#[must_use]
pub fn url<C: ServerContext>(server: &HttpServer<C>, path: &str) -> String {
    format!("{}{path}", base_url(server))
}

/// A request received by [`FakeProcore`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Raw query string.
    pub query: Option<String>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: String,
}

/// A canned response.
#[derive(Clone, Debug)]
struct Canned {
    /// Status to respond with.
    status: StatusCode,
    /// JSON body to respond with.
    body: String,
}

impl Canned {
    /// Build the response.
    fn to_response(&self) -> Result<Response<Body>, HttpError> {
        Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::with_content(self.body.clone()))
            .map_err(|error| HttpError::for_internal_error(error.to_string()))
    }
}

/// Stand-in for the Procore REST API and its OAuth token endpoint.
///
/// Responds to every request on an endpoint with the same canned response
/// and records what it received.
#[derive(Debug)]
pub struct FakeProcore {
    /// Response to `GET /rest/v1.0/projects/{project_id}/accident_logs`.
    accident_logs: Canned,
    /// Response to `POST /oauth/token`.
    token: Canned,
    /// Requests received so far.
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeProcore {
    /// Fake that answers accident log requests with `body`.
    #[must_use]
    pub fn accident_logs(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            accident_logs: Canned { status, body: body.to_string() },
            token: Canned {
                status: StatusCode::NOT_FOUND,
                body: "{}".to_owned(),
            },
            requests: Mutex::default(),
        }
    }

    /// Fake that answers token requests with `body`.
    #[must_use]
    pub fn token(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            accident_logs: Canned {
                status: StatusCode::NOT_FOUND,
                body: "[]".to_owned(),
            },
            token: Canned { status, body: body.to_string() },
            requests: Mutex::default(),
        }
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if a request handler panicked while recording.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Record a request.
    fn record(&self, rqctx: &RequestContext<Self>, body: &[u8]) {
        let uri = rqctx.request.uri();
        self.requests.lock().unwrap().push(RecordedRequest {
            path: uri.path().to_owned(),
            query: uri.query().map(str::to_owned),
            headers: rqctx.request.headers().clone(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
}

/// Path parameters for the accident log list.
#[derive(Debug, Deserialize, JsonSchema)]
struct ProjectPath {
    /// Project ID.
    #[expect(dead_code, reason = "recorded through the request path")]
    project_id: String,
}

/// Fake `GET /rest/v1.0/projects/{project_id}/accident_logs`
#[endpoint {
    method = GET,
    path = "/rest/v1.0/projects/{project_id}/accident_logs",
}]
async fn fake_accident_logs(
    rqctx: RequestContext<FakeProcore>,
    _path: Path<ProjectPath>,
) -> Result<Response<Body>, HttpError> {
    let fake = rqctx.context();
    fake.record(&rqctx, &[]);
    fake.accident_logs.to_response()
}

/// Fake `POST /oauth/token`
#[endpoint {
    method = POST,
    path = "/oauth/token",
}]
async fn fake_token(
    rqctx: RequestContext<FakeProcore>,
    body: UntypedBody,
) -> Result<Response<Body>, HttpError> {
    let fake = rqctx.context();
    fake.record(&rqctx, body.as_bytes());
    fake.token.to_response()
}

/// Start a fake Procore on an ephemeral port.
///
/// # Panics
///
/// Panics if the server can’t be started.
#[must_use]
pub fn start_fake_procore(fake: FakeProcore) -> HttpServer<FakeProcore> {
    let mut api = ApiDescription::new();
    api.register(fake_accident_logs).unwrap();
    api.register(fake_token).unwrap();
    start(api, fake)
}
