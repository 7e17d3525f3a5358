// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EngineCommand;

/// Port for running the external media engine
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run one engine invocation to completion.
    ///
    /// A non-zero exit is reported through `ExecutionReport::success`, not as
    /// an error; errors are reserved for the engine not running at all.
    async fn execute(&self, command: &EngineCommand) -> Result<ExecutionReport, DomainError>;

    /// Check whether the engine binary can be located
    async fn engine_available(&self) -> bool;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError>;

    /// Resolve relative path to absolute path
    async fn resolve_path(&self, path: &Path) -> Result<PathBuf, DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Snapshot of the effective configuration
    async fn current(&self) -> AppConfig;

    /// Load configuration from file; keys absent from the file take defaults
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Save configuration to file
    async fn save_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Override one value by dotted key, e.g. `encoding.crf`
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Get configuration file path
    async fn get_config_file_path(&self) -> Option<PathBuf>;
}

/// Port for the video-playback widget the host application supplies
#[async_trait]
pub trait PlayerPort: Send + Sync {
    /// Open a local video file, ready to play from the start. May follow a
    /// `dispose` of the previous source.
    async fn load(&self, path: &Path) -> Result<(), DomainError>;

    async fn play(&self) -> Result<(), DomainError>;

    async fn pause(&self) -> Result<(), DomainError>;

    async fn seek_to(&self, position: Duration) -> Result<(), DomainError>;

    /// Current playback position
    async fn position(&self) -> Result<Duration, DomainError>;

    /// Length of the loaded video, once known
    async fn duration(&self) -> Result<Option<Duration>, DomainError>;

    async fn is_playing(&self) -> Result<bool, DomainError>;

    /// Release the resources held for the loaded source
    async fn dispose(&self) -> Result<(), DomainError>;
}
