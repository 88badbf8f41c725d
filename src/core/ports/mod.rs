//! Port traits for the pipeline's external collaborators
//!
//! The pipeline only needs "a source of repository identifiers" and "a
//! source of raw per-repository log text". How those bytes are produced
//! (ghq, git, standard input, a test double) lives in `adapters`.

mod log_provider;
mod repository_lister;

use std::pin::Pin;

use tokio::io::AsyncRead;

pub use log_provider::LogProvider;
pub use repository_lister::RepositoryLister;

/// Raw byte output of a collaborator, read incrementally
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;
