//! procore-relay executable.

use anyhow::anyhow;
use procore_relay::api;
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;
mod params;
mod server;

use params::{Command, Params, Parser, Service};

/// Wrapper to handle errors.
///
/// See [`cli()`].
fn main() -> ExitCode {
    // Must happen before parsing so `.env` can supply parameters.
    let dotenv = dotenvy::dotenv();
    let params = Params::parse();
    cli(&params, dotenv).unwrap_or_else(|error| {
        let error = format!("{error}\n");
        if error.to_lowercase().starts_with("error") {
            params.warn(error).unwrap();
        } else {
            params.warn(format!("Error: {error}")).unwrap();
        }

        ExitCode::FAILURE
    })
}

/// Do the actual work.
///
/// Returns the exit code to use.
///
/// # Errors
///
/// This returns any errors encountered during the run so that they can be
/// outputted nicely in [`main()`].
fn cli(
    params: &Params,
    dotenv: dotenvy::Result<PathBuf>,
) -> anyhow::Result<ExitCode> {
    match &params.command {
        Command::Accidents(accidents_params) => {
            let log = logging::init(params.verbose);
            log_dotenv(&log, dotenv);
            server::serve_accidents(
                accidents_params.address(),
                accidents_params.procore_config(),
                &log,
            )?;
        }
        Command::Auth(auth_params) => {
            let log = logging::init(params.verbose);
            log_dotenv(&log, dotenv);
            server::serve_auth(
                auth_params.address(),
                auth_params.oauth_config(),
                &log,
            )?;
        }
        Command::Openapi(openapi_params) => {
            generate_openapi(openapi_params)?;
        }
        Command::Version => {
            println!("{}", env!("GIT_VERSION"));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Report how loading `.env` went.
fn log_dotenv(log: &slog::Logger, dotenv: dotenvy::Result<PathBuf>) {
    match dotenv {
        Ok(path) => slog::debug!(log, "Loaded environment from {path:?}"),
        Err(error) if error.not_found() => {
            slog::info!(log, "No .env file found");
        }
        Err(error) => slog::warn!(log, "Could not load .env file: {error}"),
    }
}

/// Generate `OpenAPI` specification.
///
/// Uses the trait-based API stub to generate the spec without requiring
/// an implementation.
///
/// # Errors
///
/// Returns an error if the `OpenAPI` spec cannot be generated or written.
fn generate_openapi(params: &params::OpenapiParams) -> anyhow::Result<()> {
    // Use version from Cargo.toml via CARGO_PKG_VERSION environment variable
    let version = semver::Version::parse(env!("CARGO_PKG_VERSION"))?;

    let json_value = match params.service {
        Service::Accidents => api::accidents_api_mod::stub_api_description()
            .map_err(|error| {
                anyhow!("Failed to create API description: {error}")
            })?
            .openapi("Procore Accident Types", version)
            .json()?,
        Service::Auth => api::auth_api_mod::stub_api_description()
            .map_err(|error| {
                anyhow!("Failed to create API description: {error}")
            })?
            .openapi("Procore Auth Token", version)
            .json()?,
    };
    let json_string = serde_json::to_string_pretty(&json_value)?;

    if let Some(output_path) = &params.output {
        std::fs::write(output_path, format!("{json_string}\n"))?;
    } else {
        println!("{json_string}");
    }

    Ok(())
}
