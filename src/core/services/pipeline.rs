//! End-to-end log pipeline
//!
//! ```text
//! repositories -> repo include -> repo exclude -> fetch -> log include -> log exclude -> format
//! ```
//!
//! Repository filters run before the fetch stage, so an excluded repository
//! never has its log read.

use std::sync::Arc;

use super::fetcher::{DEFAULT_PARALLELISM, LogFetcher};
use super::filter::FilterSet;
use crate::core::models::{CommitLog, Repository};
use crate::core::ports::LogProvider;
use crate::core::stream::RecordStream;
use crate::error::Result;

/// Log template used when none is configured
pub const DEFAULT_FORMAT: &str = "[%rn] <%an> %B";

/// Everything the pipeline can be configured with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Drop repositories whose path matches any of these
    pub exclude_repo: Vec<String>,
    /// Keep only repositories whose path matches all of these
    pub include_repo: Vec<String>,
    /// Drop commits whose text matches any of these
    pub exclude_log: Vec<String>,
    /// Keep only commits whose text matches all of these
    pub include_log: Vec<String>,
    /// git pretty-format template, with `%rn`/`%rp` placeholders
    pub format: String,
    /// Maximum repositories read at once; values below 1 mean 1
    pub parallelism: i64,
    /// Collapse each commit to one line
    pub oneline: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            exclude_repo: Vec::new(),
            include_repo: Vec::new(),
            exclude_log: Vec::new(),
            include_log: Vec::new(),
            format: DEFAULT_FORMAT.to_string(),
            parallelism: DEFAULT_PARALLELISM,
            oneline: false,
        }
    }
}

/// A configured pipeline with all patterns compiled
#[derive(Debug, Clone)]
pub struct Pipeline {
    repo_filters: FilterSet,
    log_filters: FilterSet,
    format: String,
    parallelism: i64,
    oneline: bool,
}

impl Pipeline {
    /// Compile every pattern in `options`
    ///
    /// Fails on the first malformed pattern, before any collaborator runs.
    pub fn new(options: &PipelineOptions) -> Result<Self> {
        let repo_filters = FilterSet::compile(&options.include_repo, &options.exclude_repo)?;
        let log_filters = FilterSet::compile(&options.include_log, &options.exclude_log)?;
        log::debug!(
            "compiled {} repo and {} log filter stage(s)",
            repo_filters.include().len() + repo_filters.exclude().len(),
            log_filters.include().len() + log_filters.exclude().len(),
        );
        Ok(Self {
            repo_filters,
            log_filters,
            format: options.format.clone(),
            parallelism: options.parallelism,
            oneline: options.oneline,
        })
    }

    /// Filtered commit logs of the filtered repositories
    #[must_use]
    pub fn logs(
        &self,
        repositories: RecordStream<Arc<Repository>>,
        provider: Arc<dyn LogProvider>,
    ) -> RecordStream<CommitLog> {
        let repositories = self.repo_filters.apply(repositories);
        let fetcher = LogFetcher::new(provider, &self.format, self.parallelism);
        self.log_filters.apply(fetcher.fetch(repositories))
    }

    /// Formatted output lines, one per surviving commit
    #[must_use]
    pub fn lines(
        &self,
        repositories: RecordStream<Arc<Repository>>,
        provider: Arc<dyn LogProvider>,
    ) -> RecordStream<String> {
        let oneline = self.oneline;
        self.logs(repositories, provider).map(move |log| log.format(oneline))
    }
}
