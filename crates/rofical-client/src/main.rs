//! rofical CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use rofical_client::cli::Cli;
use rofical_client::config::{ConfigError, ConfigResolver, Overrides};
use rofical_client::error::{ClientError, ClientResult};
use rofical_client::{actions, pipeline};
use rofical_core::{MenuAction, TimeRangeResolver, decode_selection};
use rofical_transport::{EventFetcher, GoogleEventsClient};

// Fetches run strictly one at a time, so one thread is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // rofi calls the script twice: once with no argument to fill the
    // menu, once with the picked line as the argument.
    match decode_selection(cli.selection.as_deref()) {
        MenuAction::Display => display_agenda(cli).await,
        MenuAction::OpenMeeting(code) => actions::open_meeting(&code),
        MenuAction::Ignore => Ok(()),
    }
}

async fn display_agenda(cli: Cli) -> ClientResult<()> {
    let resolver = match cli.config {
        Some(ref path) => ConfigResolver::new(path),
        None => ConfigResolver::from_default_path(),
    };
    let overrides = Overrides {
        start_date: Some(cli.start.clone()),
        end_date: Some(cli.end.clone()),
    };
    let settings = resolver.resolve(&overrides)?;

    let range = TimeRangeResolver::new(
        settings.timezone,
        settings.start_date.clone(),
        settings.end_date.clone(),
    )
    .range()?;

    let access_token = cli
        .access_token
        .ok_or(ClientError::Config(ConfigError::MissingAccessToken))?;
    let client = GoogleEventsClient::new(access_token, Duration::from_secs(cli.timeout));
    let fetcher = EventFetcher::new(client);

    let lines = pipeline::collect_agenda(&fetcher, settings, &range, chrono::Utc::now()).await?;
    for line in &lines {
        println!("{}", line);
    }

    Ok(())
}
