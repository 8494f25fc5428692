// Local filesystem adapter - File system operations through tokio::fs

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::error::{WebvidError, WebvidResult};
use crate::ports::FsPort;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, path: &Path) -> WebvidResult<bool> {
        match tokio::fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WebvidError::filesystem(path, format!("Failed to stat: {}", e))),
        }
    }

    async fn create_directory(&self, path: &Path) -> WebvidResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| WebvidError::filesystem(path, format!("Failed to create directory: {}", e)))
    }

    async fn move_file(&self, from: &Path, to: &Path) -> WebvidResult<()> {
        // Ensure destination directory exists
        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_directory(parent).await?;
        }

        tokio::fs::rename(from, to).await.map_err(|e| {
            WebvidError::filesystem(
                from,
                format!("Failed to move file to {}: {}", to.display(), e),
            )
        })
    }

    async fn delete_file(&self, path: &Path) -> WebvidResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| WebvidError::filesystem(path, format!("Failed to delete file: {}", e)))
    }
}
