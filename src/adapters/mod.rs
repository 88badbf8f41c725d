//! Adapter implementations for port traits
//!
//! This module contains the concrete collaborators that spawn processes:
//!
//! - `ghq` - Repository listing through ghq
//! - `git/` - Commit history through git log
//! - `process` - Child stdout as an async byte stream

pub mod ghq;
pub mod git;
pub mod process;

pub use ghq::GhqLister;
pub use git::GitLogProvider;
pub use process::ChildOutput;
