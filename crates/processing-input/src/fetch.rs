//! Seam between the collection and whatever transports files locally.

use std::path::PathBuf;

use async_trait::async_trait;
use file_validation::ImapFilePath;

/// Something that can make a validated file available on local disk.
///
/// Implementations must be idempotent: a file already present locally is left
/// as is and its path returned.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ensure `file` exists locally and return where it lives.
    async fn fetch(&self, file: &ImapFilePath) -> Result<PathBuf, Self::Error>;
}
