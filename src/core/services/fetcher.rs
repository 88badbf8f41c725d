//! Bounded-parallel fetch of per-repository commit logs
//!
//! One task per repository reads its log output, tokenizes it into hunks and
//! pushes [`CommitLog`] records into a single merged stream. A semaphore
//! caps how many repositories are read at once. The permit is held by the
//! task itself, so it is released when the task ends however it ends.
//!
//! Records of one repository keep their order; records of different
//! repositories interleave in completion order.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::codec::FramedRead;

use super::tokenizer::{HunkCodec, SENTINEL_MARKER};
use crate::core::models::{CommitLog, Repository};
use crate::core::ports::LogProvider;
use crate::core::stream::{Emitter, RecordStream};
use crate::error::{Error, Result};

/// Parallelism used when none is configured
pub const DEFAULT_PARALLELISM: i64 = 50;

/// Coerce a configured parallelism to a usable pool size (at least 1)
#[must_use]
pub fn effective_parallelism(max_parallelism: i64) -> usize {
    usize::try_from(max_parallelism).unwrap_or(0).max(1)
}

/// Fans repositories out to a [`LogProvider`] with capped concurrency
#[derive(Clone)]
pub struct LogFetcher {
    provider: Arc<dyn LogProvider>,
    template: Arc<str>,
    parallelism: usize,
}

impl std::fmt::Debug for LogFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFetcher")
            .field("template", &self.template)
            .field("parallelism", &self.parallelism)
            .finish_non_exhaustive()
    }
}

impl LogFetcher {
    /// Create a fetcher; the sentinel marker is appended to `template`
    pub fn new(provider: Arc<dyn LogProvider>, template: &str, max_parallelism: i64) -> Self {
        Self {
            provider,
            template: format!("{template}{SENTINEL_MARKER}").into(),
            parallelism: effective_parallelism(max_parallelism),
        }
    }

    /// Template handed to the provider, sentinel included
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Maximum number of repositories read at once
    #[must_use]
    pub const fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Stream the commit logs of every incoming repository
    ///
    /// The returned stream ends once every repository has been drained.
    /// The first failure ends it with an error.
    #[must_use]
    pub fn fetch(&self, repositories: RecordStream<Arc<Repository>>) -> RecordStream<CommitLog> {
        let fetcher = self.clone();
        let mut repositories = repositories;
        RecordStream::spawn(move |out| async move {
            let pool = Arc::new(Semaphore::new(fetcher.parallelism));
            let mut tasks = JoinSet::new();

            while let Some(repository) = repositories.next().await {
                let repository = repository?;
                let permit = Arc::clone(&pool).acquire_owned().await?;
                if out.is_closed() {
                    break;
                }
                while let Some(joined) = tasks.try_join_next() {
                    joined?;
                }

                let fetcher = fetcher.clone();
                let out = out.clone();
                tasks.spawn(async move {
                    let _permit = permit;
                    if let Err(err) = fetcher.forward(&repository, &out).await {
                        out.fail(err).await;
                    }
                });
            }

            while let Some(joined) = tasks.join_next().await {
                joined?;
            }
            Ok(())
        })
    }

    async fn forward(&self, repository: &Arc<Repository>, out: &Emitter<CommitLog>) -> Result<()> {
        log::debug!("reading commit logs of {}", repository.path());
        let output = self.provider.open(repository, &self.template).await?;
        let mut hunks = FramedRead::new(output, HunkCodec::new());
        let mut count = 0_usize;

        while let Some(hunk) = hunks.next().await {
            let hunk = hunk.map_err(|source| Error::read("commit log output", source))?;
            if !out.emit(CommitLog::new(hunk, Arc::clone(repository))).await {
                break;
            }
            count += 1;
        }

        log::debug!("read {count} commit(s) from {}", repository.path());
        Ok(())
    }
}
