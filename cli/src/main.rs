use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing access token; pass --token or set USERDASH_TOKEN")]
    MissingToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("credential rejected (HTTP {0})")]
    Unauthorized(u16),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "userdash-cli", about = "Profile API CLI")]
struct Cli {
    #[arg(long, env = "USERDASH_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "USERDASH_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Print the profile behind the access token.
    Me,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, token: cli.token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Me => run_me(&ctx).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(endpoint(&cli.base_url, wire::HEALTH_PATH)).send().await?;
    check_status(response.status(), "health check failed")?;
    println!("ok");
    Ok(())
}

async fn run_me(cli: &CliContext) -> Result<(), CliError> {
    let token = cli
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(CliError::MissingToken)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&wire::bearer_value(token))?);

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    let response = client.get(endpoint(&cli.base_url, wire::PROFILE_PATH)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    check_status(status, &body)?;

    let profile: wire::Profile = serde_json::from_str(&body)?;
    print_json(&serde_json::to_value(profile)?)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn check_status(status: StatusCode, message: &str) -> Result<(), CliError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(CliError::Unauthorized(status.as_u16()));
    }
    Err(CliError::ServerError { status: status.as_u16(), message: message.to_owned() })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
