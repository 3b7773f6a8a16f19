//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDateTime};
use clap::Parser;

/// rofical - Google Calendar agenda for rofi
#[derive(Debug, Parser)]
#[command(name = "rofical")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to settings file
    #[arg(long, short, env = "ROFICAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Window start, an ISO date or date-time (defaults to now)
    #[arg(long, short = 's', visible_alias = "start-date", default_value_t = default_start())]
    pub start: String,

    /// Window end, an ISO date or date-time (defaults to tomorrow night)
    #[arg(long, short = 'e', visible_alias = "end-date", default_value_t = default_end())]
    pub end: String,

    /// OAuth access token for the calendar API
    #[arg(long, env = "ROFICAL_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// The menu line the user picked, as rofi passes it back
    pub selection: Option<String>,
}

/// Window start default: the current local time.
fn default_start() -> String {
    start_default_from(Local::now().naive_local())
}

/// Window end default: the last microsecond of tomorrow, local time.
fn default_end() -> String {
    end_default_from(Local::now().naive_local())
}

fn start_default_from(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn end_default_from(now: NaiveDateTime) -> String {
    let tomorrow = now.date() + Duration::days(1);
    tomorrow
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .expect("valid time")
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
