//! Core pipeline logic for repolog
//!
//! Nothing in here spawns processes or touches the terminal. Collaborators
//! are reached only through the port traits.
//!
//! ## Architecture
//!
//! - `models/` - Record types (Repository, CommitLog, Matchable)
//! - `ports/` - Trait definitions for external collaborators
//! - `services/` - Pipeline stages
//! - `stream` - The bounded hand-off stream every stage speaks

pub mod models;
pub mod ports;
pub mod services;
pub mod stream;
