//! Pipeline stages
//!
//! - [`source`] - Produce repository records
//! - [`filter`] - Generic include/exclude stages over any [`Matchable`](crate::core::models::Matchable)
//! - [`fetcher`] - Bounded-parallel per-repository log reads
//! - [`tokenizer`] - Split raw log output into hunks
//! - [`formatter`] - Placeholder substitution and one-line mode
//! - [`pipeline`] - All of the above wired together

pub mod fetcher;
pub mod filter;
pub mod formatter;
pub mod pipeline;
pub mod source;
pub mod tokenizer;

pub use fetcher::{DEFAULT_PARALLELISM, LogFetcher, effective_parallelism};
pub use filter::{FilterMode, FilterSet, Patterns, filter_stage};
pub use formatter::{format_hunk, to_oneline};
pub use pipeline::{DEFAULT_FORMAT, Pipeline, PipelineOptions};
pub use tokenizer::{HunkCodec, SENTINEL, SENTINEL_MARKER};
