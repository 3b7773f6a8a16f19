//! Decoding a menu selection back into an action.
//!
//! The launcher echoes a previously printed agenda line back as a plain
//! string. Lines that carry a conference end with its code, so decoding
//! only has to look at the tail.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing conference code, e.g. `abc-defg-hij`.
static CONFERENCE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w{3}-\w{4}-\w{3})$").expect("Invalid conference code regex"));

/// What to do once the menu returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// No selection was supplied; render the agenda.
    Display,
    /// The selected line ends with a conference code; open its meeting.
    OpenMeeting(String),
    /// The selection carries no conference code; do nothing.
    Ignore,
}

/// Decodes the optional selection a menu echoed back.
///
/// `None` means the menu has not run yet and the agenda should be shown.
/// An empty or code-less selection decodes to [`MenuAction::Ignore`].
pub fn decode_selection(selection: Option<&str>) -> MenuAction {
    match selection {
        None => MenuAction::Display,
        Some(line) => match CONFERENCE_CODE_REGEX.captures(line) {
            Some(captures) => MenuAction::OpenMeeting(captures[1].to_string()),
            None => MenuAction::Ignore,
        },
    }
}

/// Returns the join URL for a conference code.
pub fn meeting_url(code: &str) -> String {
    format!("https://meet.google.com/{}", code)
}
