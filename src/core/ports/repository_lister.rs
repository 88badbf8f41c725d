//! Repository listing port

use async_trait::async_trait;

use super::ByteStream;
use crate::error::Result;

/// Lists the repositories managed under a set of root directories
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    /// Root directories, in the order they should claim nested paths
    ///
    /// An empty list is valid.
    async fn roots(&self) -> Result<Vec<String>>;

    /// Newline-delimited absolute repository paths
    async fn paths(&self) -> Result<ByteStream>;
}
