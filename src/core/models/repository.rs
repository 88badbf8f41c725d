//! Repository model
//!
//! A repository is identified by its absolute path. The short path and name
//! are derived once, when the record is created, and never change.

use std::path::Path;

use super::Matchable;

/// Path separator stripped from the front of a short path
const SEPARATOR: char = '/';

/// A checked-out repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    path: String,
    short_path: String,
    name: String,
}

impl Repository {
    /// Create a repository record for `path`
    ///
    /// The first root in `roots` that prefixes `path` is stripped to form the
    /// short path, so root order decides which root claims a nested path.
    pub fn new(path: impl Into<String>, roots: &[String]) -> Self {
        let path = path.into();
        let short_path = short_path(roots, &path);
        let name = base_name(&path);
        Self {
            path,
            short_path,
            name,
        }
    }

    /// Absolute path of the repository
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path relative to the root that contains it
    #[must_use]
    pub fn short_path(&self) -> &str {
        &self.short_path
    }

    /// Final path segment
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Matchable for Repository {
    fn matched_text(&self) -> &str {
        &self.path
    }
}

fn short_path(roots: &[String], path: &str) -> String {
    let relative = roots
        .iter()
        .find_map(|root| path.strip_prefix(root.as_str()))
        .unwrap_or(path);
    relative.strip_prefix(SEPARATOR).unwrap_or(relative).to_string()
}

fn base_name(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    Path::new(path)
        .file_name()
        .map_or_else(|| SEPARATOR.to_string(), |name| name.to_string_lossy().into_owned())
}
