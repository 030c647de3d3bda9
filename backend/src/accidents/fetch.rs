//! Fetch accident logs from Procore.

use super::{AccidentLog, DateRange, Error, Result};
use reqwest::header;
use std::time::Duration;

/// Procore sandbox. Production is `https://api.procore.com`.
pub const DEFAULT_BASE_URL: &str = "https://sandbox.procore.com";

/// How long to wait for Procore before giving up.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Header Procore uses to select the company.
const COMPANY_ID_HEADER: &str = "Procore-Company-Id";

/// Procore credentials and project to read accident logs from.
#[derive(Clone, Debug)]
pub struct ProcoreConfig {
    /// Base URL of the Procore REST API, without a trailing slash.
    pub base_url: String,
    /// Project to read accident logs from.
    pub project_id: String,
    /// Company that owns the project.
    pub company_id: String,
    /// Bearer token for the Procore API.
    pub api_token: String,
}

impl ProcoreConfig {
    /// URL of the accident log list for the configured project.
    #[must_use]
    pub fn accident_logs_url(&self) -> String {
        format!(
            "{}/rest/v1.0/projects/{}/accident_logs",
            self.base_url.trim_end_matches('/'),
            self.project_id,
        )
    }
}

/// Fetch all accident logs in `range` with a single request.
///
/// There are no retries; the first failure is returned.
///
/// # Errors
///
/// Returns:
///
///   * [`Error::UpstreamUnavailable`] if the request could not be sent or the
///     response could not be read (including timeouts).
///   * [`Error::UpstreamStatus`] if Procore didn’t return a success status.
///   * [`Error::Decode`] if the body wasn’t a list of accident logs.
pub async fn fetch_accident_logs(
    client: &reqwest::Client,
    config: &ProcoreConfig,
    range: &DateRange,
    log: &slog::Logger,
) -> Result<Vec<AccidentLog>> {
    let url = config.accident_logs_url();
    slog::debug!(
        log,
        "Fetching accident logs";
        "url" => &url,
        "start_date" => range.start_param(),
        "end_date" => range.end_param()
    );

    let response = client
        .get(&url)
        .header(COMPANY_ID_HEADER, &config.company_id)
        .bearer_auth(&config.api_token)
        .header(header::ACCEPT, "application/json")
        .query(&[
            ("start_date", range.start_param()),
            ("end_date", range.end_param()),
        ])
        .send()
        .await
        .map_err(Error::UpstreamUnavailable)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus(status));
    }

    let body = response.bytes().await.map_err(Error::UpstreamUnavailable)?;
    let logs: Vec<AccidentLog> =
        serde_json::from_slice(&body).map_err(Error::Decode)?;

    slog::debug!(log, "Fetched {} accident logs", logs.len());
    Ok(logs)
}
