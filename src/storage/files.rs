//! Local-disk file storage

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::FileStorage;

/// File storage rooted at an upload directory
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create storage rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, file_ref: &str) -> Result<PathBuf> {
        let relative = Path::new(file_ref);
        // File references are storage-internal names, never user paths
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(Error::storage(format!(
                "invalid file reference: {}",
                file_ref
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn read(&self, file_ref: &str) -> Result<Vec<u8>> {
        let path = self.resolve(file_ref)?;
        Ok(tokio::fs::read(&path).await?)
    }
}
