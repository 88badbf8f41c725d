//! ghq-backed repository listing
//!
//! Roots come from `ghq root --all` and repository paths from
//! `ghq list -p`, streamed as ghq prints them.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::process::ChildOutput;
use crate::core::ports::{ByteStream, RepositoryLister};
use crate::error::{Error, Result};

const GHQ: &str = "ghq";

/// Lists repositories managed by ghq
#[derive(Debug, Clone, Copy, Default)]
pub struct GhqLister;

/// Check that ghq can be run at all
///
/// # Errors
///
/// Returns [`Error::Startup`] if `ghq -v` cannot be started or fails.
pub async fn ensure_installed() -> Result<()> {
    let status = Command::new(GHQ)
        .arg("-v")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(startup_error("ghq -v"))?;

    if status.success() {
        Ok(())
    } else {
        Err(startup_error("ghq -v")(io::Error::other(format!("exited with {status}"))))
    }
}

fn startup_error(command: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |source| Error::Startup {
        command: command.to_string(),
        source,
    }
}

#[async_trait]
impl RepositoryLister for GhqLister {
    async fn roots(&self) -> Result<Vec<String>> {
        let output = Command::new(GHQ)
            .args(["root", "--all"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(startup_error("ghq root --all"))?;

        if !output.status.success() {
            log::warn!("`ghq root --all` exited with {}", output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .map(String::from)
            .collect())
    }

    async fn paths(&self) -> Result<ByteStream> {
        let mut command = Command::new(GHQ);
        command.args(["list", "-p"]);
        let output = ChildOutput::spawn(&mut command).map_err(startup_error("ghq list -p"))?;
        Ok(Box::pin(output))
    }
}
