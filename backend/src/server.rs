//! Server startup and configuration.

use anyhow::anyhow;
use dropshot::{ApiDescription, ConfigDropshot, HttpServerStarter, ServerContext};
use procore_relay::accidents::ProcoreConfig;
use procore_relay::api::{
    AccidentsApiImpl, AccidentsState, AuthApiImpl, AuthState,
    accidents_api_mod, auth_api_mod,
};
use procore_relay::oauth::OAuthConfig;
use std::net::SocketAddr;

/// Start the accident-type service.
///
/// # Errors
///
/// Returns an error if:
/// - The API description cannot be created
/// - The HTTP client cannot be created
/// - The server cannot be created
/// - The server encounters an error during operation
#[tokio::main]
pub async fn serve_accidents(
    address: SocketAddr,
    procore: ProcoreConfig,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    let api = accidents_api_mod::api_description::<AccidentsApiImpl>()
        .map_err(|error| {
            anyhow!("Failed to create API description: {error}")
        })?;

    slog::info!(
        log,
        "Reading accident logs";
        "project_id" => &procore.project_id,
        "company_id" => &procore.company_id,
        "base_url" => &procore.base_url
    );
    let state = AccidentsState::new(procore)?;

    run(address, api, state, "Accident-type service", log).await
}

/// Start the auth-token service.
///
/// # Errors
///
/// Returns an error if:
/// - The API description cannot be created
/// - The HTTP client cannot be created
/// - The server cannot be created
/// - The server encounters an error during operation
#[tokio::main]
pub async fn serve_auth(
    address: SocketAddr,
    oauth: OAuthConfig,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    let api = auth_api_mod::api_description::<AuthApiImpl>().map_err(
        |error| anyhow!("Failed to create API description: {error}"),
    )?;

    if oauth.token_url.is_none() {
        slog::warn!(log, "No token URL configured; every exchange will fail");
    }
    let state = AuthState::new(oauth)?;

    run(address, api, state, "Auth-token service", log).await
}

/// Run a server until it fails.
async fn run<C: ServerContext>(
    address: SocketAddr,
    api: ApiDescription<C>,
    state: C,
    name: &str,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    let config_dropshot = ConfigDropshot {
        bind_address: address,
        default_request_body_max_bytes: 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..ConfigDropshot::default()
    };

    let server = HttpServerStarter::new(&config_dropshot, api, state, log)
        .map_err(|error| anyhow!("Failed to create server: {error}"))?
        .start();

    slog::info!(log, "{name} running on http://{}", server.local_addr());

    server
        .await
        .map_err(|error| anyhow!("Server error: {error}"))
}
