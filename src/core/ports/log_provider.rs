//! Commit log port

use async_trait::async_trait;

use super::ByteStream;
use crate::core::models::Repository;
use crate::error::Result;

/// Produces the raw formatted history of one repository
#[async_trait]
pub trait LogProvider: Send + Sync {
    /// Start reading the history of `repository`
    ///
    /// `template` is a git pretty-format string that already ends with the
    /// record sentinel. Failing to start is fatal for the whole run.
    async fn open(&self, repository: &Repository, template: &str) -> Result<ByteStream>;
}
