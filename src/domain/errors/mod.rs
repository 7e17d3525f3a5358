// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Input file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Start/end pair does not describe a usable range
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    /// Source URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Filesystem operation failed
    #[error("Filesystem error: {0}")]
    FsFail(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The ffmpeg binary could not be located or spawned
    #[error("Media engine not found: {0}")]
    EngineNotFound(String),

    /// The engine ran but exited unsuccessfully
    #[error("Media engine failed (exit code {}): {message}", exit_code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    EngineFailed {
        exit_code: Option<i32>,
        message: String,
    },

    /// The engine did not finish within the configured timeout
    #[error("Media engine timed out: {0}")]
    EngineTimeout(String),

    /// The playback widget reported a failure
    #[error("Player error: {0}")]
    PlayerError(String),

    /// Playback call issued before a video was loaded
    #[error("No video loaded in player")]
    PlayerNotLoaded,

    /// Playback call issued after the player was disposed
    #[error("Player has been disposed")]
    PlayerDisposed,
}

/// Result alias used across the library
pub type DomainResult<T> = Result<T, DomainError>;
