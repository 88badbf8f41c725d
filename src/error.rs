//! Error types for the log pipeline
//!
//! Every failure is terminal: there is no retryable error in repolog.
//! Each variant names the stage that failed so the top level can report it
//! once before exiting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// A required external tool could not be started
    #[error("failed to start `{command}`")]
    Startup {
        /// The command line that failed
        command: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An include/exclude pattern is not a valid regular expression
    #[error("invalid filter pattern `{pattern}`")]
    Pattern {
        /// The offending pattern text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The log command for one repository could not be started
    #[error("failed to read commit logs of {path}")]
    Fetch {
        /// Repository path
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading from a running collaborator failed
    #[error("failed to read {stage}")]
    Read {
        /// What was being read
        stage: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be loaded
    #[error("invalid configuration file {}: {message}", path.display())]
    Config {
        /// Path of the configuration file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// A pipeline task panicked or was cancelled
    #[error("pipeline task failed")]
    Task(#[from] tokio::task::JoinError),

    /// The fetch concurrency pool was closed while tasks were waiting
    #[error("fetch concurrency pool closed")]
    Pool(#[from] tokio::sync::AcquireError),
}

impl Error {
    /// Build a [`Error::Read`] for the given stage
    #[must_use]
    pub const fn read(stage: &'static str, source: io::Error) -> Self {
        Self::Read { stage, source }
    }
}
