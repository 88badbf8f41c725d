//! Rendering of commit hunks for output
//!
//! Templates may use two placeholders that git itself does not know:
//! [`REPO_NAME_PLACEHOLDER`] and [`REPO_PATH_PLACEHOLDER`]. git leaves them
//! untouched, and they are substituted here once the repository is known.

use crate::core::models::Repository;

/// Replaced by the repository name
pub const REPO_NAME_PLACEHOLDER: &str = "%rn";

/// Replaced by the repository short path
pub const REPO_PATH_PLACEHOLDER: &str = "%rp";

/// Joins the first line of a hunk to the rest in one-line mode
pub const HEADER_BODY_SEPARATOR: &str = ": ";

/// Substitute repository placeholders, optionally collapsing to one line
#[must_use]
pub fn format_hunk(hunk: &str, repository: &Repository, oneline: bool) -> String {
    let text = hunk
        .replace(REPO_NAME_PLACEHOLDER, repository.name())
        .replace(REPO_PATH_PLACEHOLDER, repository.short_path());
    if oneline { to_oneline(&text) } else { text }
}

/// Collapse a multi-line hunk to a single line
///
/// The first line becomes a header, separated from the body by
/// [`HEADER_BODY_SEPARATOR`]. Body lines are trimmed and joined with a single
/// space; blank lines are dropped. The result never contains a line break,
/// so collapsing twice gives the same text.
#[must_use]
pub fn to_oneline(text: &str) -> String {
    let (header, body) = text.split_once('\n').unwrap_or((text, ""));
    let header = header.trim();
    let body = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match (header.is_empty(), body.is_empty()) {
        (_, true) => header.to_string(),
        (true, false) => body,
        (false, false) => format!("{header}{HEADER_BODY_SEPARATOR}{body}"),
    }
}
