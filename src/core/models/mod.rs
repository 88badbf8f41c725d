//! Record types flowing through the pipeline
//!
//! - [`Repository`] - a checked-out repository, identified by its path
//! - [`CommitLog`] - one commit record, tied to its repository
//! - [`Matchable`] - what include/exclude filters test against

mod commit_log;
mod matchable;
mod repository;

pub use commit_log::CommitLog;
pub use matchable::Matchable;
pub use repository::Repository;
