//! git-backed commit log provider
//!
//! Runs `git log --pretty=format:<template>` inside each repository and
//! hands back its stdout. git's own diagnostics are discarded: a repository
//! without commits simply yields no records.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::process::ChildOutput;
use crate::core::models::Repository;
use crate::core::ports::{ByteStream, LogProvider};
use crate::error::{Error, Result};

/// Reads commit history with the `git` executable
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLogProvider;

impl GitLogProvider {
    fn command(repository: &Repository, template: &str) -> Command {
        let mut command = Command::new("git");
        command
            .arg("log")
            .arg(format!("--pretty=format:{template}"))
            .current_dir(repository.path())
            .stderr(Stdio::null());
        command
    }
}

#[async_trait]
impl LogProvider for GitLogProvider {
    async fn open(&self, repository: &Repository, template: &str) -> Result<ByteStream> {
        let output = ChildOutput::spawn(&mut Self::command(repository, template)).map_err(|source| {
            Error::Fetch {
                path: repository.path().to_string(),
                source,
            }
        })?;
        Ok(Box::pin(output))
    }
}
