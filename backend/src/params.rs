//! Code to deal with executable parameters.

use clap::builder::NonEmptyStringValueParser;
use procore_relay::accidents::{DEFAULT_BASE_URL, ProcoreConfig};
use procore_relay::oauth::OAuthConfig;
use std::io::{self, IsTerminal, Write};
use std::net::{IpAddr, SocketAddr};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

pub use clap::Parser;

/// Relay services for Procore accident logs and OAuth tokens
#[derive(Debug, clap::Parser)]
#[clap(version, about)]
pub struct Params {
    /// Whether or not to output in color
    #[clap(long, default_value = "auto", value_name = "WHEN", global = true)]
    pub color: ColorChoice,

    /// Verbosity (may be repeated up to three times)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Serve the accident-type service (`GET /accidents`)
    Accidents(AccidentsParams),
    /// Serve the auth-token service (`POST /auth`)
    Auth(AuthParams),
    /// Generate `OpenAPI` specification
    Openapi(OpenapiParams),
    /// Print version
    Version,
}

/// Parameters for the `accidents` subcommand
#[derive(Debug, clap::Args)]
pub struct AccidentsParams {
    /// IP address to listen on
    #[arg(long, env = "BIND_IP", default_value = "0.0.0.0")]
    pub bind_ip: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Procore project to read accident logs from
    #[arg(long, env = "PROCORE_PROJECT_ID", value_parser = NonEmptyStringValueParser::new())]
    pub project_id: String,

    /// Procore company that owns the project
    #[arg(long, env = "PROCORE_COMPANY_ID", value_parser = NonEmptyStringValueParser::new())]
    pub company_id: String,

    /// Bearer token for the Procore API
    #[arg(
        long,
        env = "PROCORE_API_TOKEN",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_token: String,

    /// Base URL of the Procore API
    #[arg(long, env = "PROCORE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub procore_base_url: String,
}

impl AccidentsParams {
    /// Address to listen on.
    pub const fn address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Procore configuration to pass to the server.
    pub fn procore_config(&self) -> ProcoreConfig {
        ProcoreConfig {
            base_url: self.procore_base_url.clone(),
            project_id: self.project_id.clone(),
            company_id: self.company_id.clone(),
            api_token: self.api_token.clone(),
        }
    }
}

/// Parameters for the `auth` subcommand
#[derive(Debug, clap::Args)]
pub struct AuthParams {
    /// IP address to listen on
    #[arg(long, env = "BIND_IP", default_value = "0.0.0.0")]
    pub bind_ip: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Procore OAuth client ID
    #[arg(long, env = "PROCORE_CLIENT_ID", default_value = "")]
    pub client_id: String,

    /// Procore OAuth client secret
    #[arg(long, env = "PROCORE_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub client_secret: String,

    /// OAuth token endpoint
    #[arg(long, env = "TOCKEN_URL")]
    pub token_url: Option<String>,
}

impl AuthParams {
    /// Address to listen on.
    pub const fn address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// OAuth configuration to pass to the server.
    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token_url: self.token_url.clone().filter(|url| !url.is_empty()),
        }
    }
}

/// Parameters for the `openapi` subcommand
#[derive(Debug, clap::Args)]
pub struct OpenapiParams {
    /// Which service to describe
    #[arg(value_enum)]
    pub service: Service,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// A service provided by this executable
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Service {
    /// The accident-type service
    Accidents,
    /// The auth-token service
    Auth,
}

impl Params {
    /// Print a warning message in error color to `err_stream()`.
    pub fn warn<S: AsRef<str>>(&self, message: S) -> io::Result<()> {
        let mut err_out = self.err_stream();
        err_out.set_color(&error_color())?;
        err_out.write_all(message.as_ref().as_bytes())?;
        err_out.reset()?;

        Ok(())
    }

    /// Get stream to use for errors.
    pub fn err_stream(&self) -> StandardStream {
        StandardStream::stderr(self.color_choice(&io::stderr()))
    }

    /// Whether or not to output on a stream in color.
    ///
    /// Checks if passed stream is a terminal.
    pub fn color_choice<T: IsTerminal>(
        &self,
        stream: &T,
    ) -> termcolor::ColorChoice {
        if self.color == ColorChoice::Auto && !stream.is_terminal() {
            termcolor::ColorChoice::Never
        } else {
            self.color.into()
        }
    }
}

/// Whether or not to output in color
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Output in color when running in a terminal that supports it
    #[default]
    Auto,

    /// Always output in color
    Always,

    /// Never output in color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Returns color used to output errors.
pub fn error_color() -> ColorSpec {
    let mut color = ColorSpec::new();
    color.set_fg(Some(Color::Red));
    color.set_intense(true);
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Params::command().debug_assert();
    }

    #[test]
    fn accidents_flags() {
        let params = Params::try_parse_from([
            "procore-relay",
            "accidents",
            "--port",
            "9090",
            "--project-id",
            "1234",
            "--company-id",
            "56",
            "--api-token",
            "secret",
            "--procore-base-url",
            "http://localhost:9000",
        ])
        .unwrap();
        let Command::Accidents(accidents) = params.command else {
            panic!("expected accidents subcommand");
        };
        assert!(accidents.address().port() == 9090);
        assert!(accidents.procore_config().project_id == "1234");
        assert!(accidents.procore_config().base_url == "http://localhost:9000");
    }

    #[test]
    fn accidents_empty_credential_is_fatal() {
        assert!(let Err(_) = Params::try_parse_from([
            "procore-relay",
            "accidents",
            "--project-id",
            "",
            "--company-id",
            "56",
            "--api-token",
            "secret",
        ]));
    }

    #[test]
    fn auth_empty_token_url_is_none() {
        let params = Params::try_parse_from([
            "procore-relay",
            "auth",
            "--token-url",
            "",
        ])
        .unwrap();
        let Command::Auth(auth) = params.command else {
            panic!("expected auth subcommand");
        };
        assert!(auth.oauth_config().token_url.is_none());
    }
}
