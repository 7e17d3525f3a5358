// Local filesystem adapter - File system operations backed by std::fs

use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.is_file())
    }

    async fn directory_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.is_dir())
    }

    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    async fn resolve_path(&self, path: &Path) -> Result<PathBuf, DomainError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = std::env::current_dir()
            .map_err(|e| DomainError::FsFail(format!("Failed to read working directory: {}", e)))?;
        Ok(cwd.join(path))
    }
}
