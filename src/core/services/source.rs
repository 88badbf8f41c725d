//! Repository sources
//!
//! - [`from_listing`] - ask a [`RepositoryLister`] for roots, then paths
//! - [`from_lines`] - read one path per line from any reader (e.g. stdin)

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::core::models::Repository;
use crate::core::ports::RepositoryLister;
use crate::core::stream::RecordStream;
use crate::error::{Error, Result};

/// Stream the repositories known to `lister`
///
/// Both collaborators are started before anything is streamed, so failing to
/// start either one yields an error and no records at all.
pub async fn from_listing(lister: &dyn RepositoryLister) -> Result<RecordStream<Arc<Repository>>> {
    let roots = lister.roots().await?;
    log::debug!("repository roots: {roots:?}");
    let paths = lister.paths().await?;
    Ok(read_repositories(paths, roots, "repository listing"))
}

/// Stream repositories from newline-separated absolute paths
pub fn from_lines<R>(reader: R) -> RecordStream<Arc<Repository>>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    read_repositories(reader, Vec::new(), "repository paths from input")
}

fn read_repositories<R>(
    reader: R,
    roots: Vec<String>,
    stage: &'static str,
) -> RecordStream<Arc<Repository>>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    RecordStream::spawn(move |out| async move {
        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|source| Error::read(stage, source))?;
            if read == 0 {
                break;
            }
            let Ok(text) = std::str::from_utf8(&line) else {
                log::warn!(
                    "skipping repository path that is not valid UTF-8: {}",
                    String::from_utf8_lossy(&line).trim()
                );
                continue;
            };
            let path = text.trim();
            if path.is_empty() {
                continue;
            }
            if !out.emit(Arc::new(Repository::new(path, &roots))).await {
                break;
            }
        }
        Ok(())
    })
}
