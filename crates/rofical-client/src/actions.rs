//! Actions taken when a menu line is selected.

use rofical_core::meeting_url;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens the Google Meet page for a conference code in the default browser.
pub fn open_meeting(code: &str) -> ClientResult<()> {
    let url = meeting_url(code);

    info!(url = %url, "opening meeting URL");
    open::that(&url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;

    Ok(())
}
