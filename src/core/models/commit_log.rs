//! Commit log model

use std::sync::Arc;

use super::{Matchable, Repository};
use crate::core::services::formatter;

/// One commit record of a repository's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLog {
    hunk: String,
    repository: Arc<Repository>,
}

impl CommitLog {
    /// Create a log record; `hunk` is already free of sentinel and trailing CR
    #[must_use]
    pub const fn new(hunk: String, repository: Arc<Repository>) -> Self {
        Self { hunk, repository }
    }

    /// Raw formatted text of the commit
    #[must_use]
    pub fn hunk(&self) -> &str {
        &self.hunk
    }

    /// Repository this commit belongs to
    #[must_use]
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Render the record for output
    #[must_use]
    pub fn format(&self, oneline: bool) -> String {
        formatter::format_hunk(&self.hunk, &self.repository, oneline)
    }
}

impl Matchable for CommitLog {
    fn matched_text(&self) -> &str {
        &self.hunk
    }
}
