//! Client settings.
//!
//! All settings live in a single `settings.toml` under a `[settings]`
//! table, at `~/.config/rofical/settings.toml` by default:
//!
//! ```toml
//! [settings]
//! timezone = "Europe/Paris"
//! calendar_id = ["primary", "team@example.com"]
//! start_date = "2024-01-01"        # optional
//! end_date = "2024-01-02T18:00:00" # optional
//! ```
//!
//! `timezone` and `calendar_id` are required; the window bounds are
//! optional and the command line takes precedence over them.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or the `[settings]` table is missing.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The `timezone` key is missing.
    #[error("settings are missing the required `timezone` key")]
    MissingTimezone,
    /// The `timezone` value is not a known IANA name.
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
    /// The `calendar_id` key is missing.
    #[error("settings are missing the required `calendar_id` key")]
    MissingCalendarIds,
    /// No access token was supplied.
    #[error("no access token, set ROFICAL_ACCESS_TOKEN or pass --access-token")]
    MissingAccessToken,
}

// ---------------------------------------------------------------------------
// Settings (settings.toml)
// ---------------------------------------------------------------------------

/// On-disk layout: everything nests under `[settings]`.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    settings: RawSettings,
}

/// The `[settings]` table before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    timezone: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    calendar_id: Option<Vec<String>>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Display timezone for the agenda.
    pub timezone: Tz,
    /// Window start override, an ISO date or date-time.
    pub start_date: Option<String>,
    /// Window end override, an ISO date or date-time.
    pub end_date: Option<String>,
    /// Calendars to fetch, in the order their events concatenate.
    pub calendar_ids: Vec<String>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// ConfigResolver
// ---------------------------------------------------------------------------

/// Loads settings once and hands out the frozen result.
///
/// The first successful `resolve` fixes the settings for the lifetime of
/// the resolver; later calls see the same values even if the file or the
/// overrides change in between. A failed load leaves the resolver empty,
/// so the next call retries.
#[derive(Debug)]
pub struct ConfigResolver {
    path: PathBuf,
    cell: OnceLock<Settings>,
}

impl ConfigResolver {
    /// Creates a resolver reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Creates a resolver reading from the default path.
    pub fn from_default_path() -> Self {
        Self::new(default_settings_path())
    }

    /// Returns the settings, loading and validating them on first call.
    pub fn resolve(&self, overrides: &Overrides) -> Result<&Settings, ConfigError> {
        if let Some(settings) = self.cell.get() {
            return Ok(settings);
        }
        let loaded = load_settings(&self.path, overrides)?;
        Ok(self.cell.get_or_init(|| loaded))
    }
}

/// Default settings path: `~/.config/rofical/settings.toml`.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rofical")
        .join("settings.toml")
}

fn load_settings(path: &Path, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: SettingsFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = file.settings;

    let timezone_name = raw.timezone.ok_or(ConfigError::MissingTimezone)?;
    let timezone = timezone_name
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(timezone_name))?;

    let calendar_ids = raw.calendar_id.ok_or(ConfigError::MissingCalendarIds)?;

    Ok(Settings {
        timezone,
        start_date: overrides.start_date.clone().or(raw.start_date),
        end_date: overrides.end_date.clone().or(raw.end_date),
        calendar_ids,
    })
}
