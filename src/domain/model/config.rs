// Application configuration model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineSettings,
    pub output: OutputSettings,
    pub encoding: EncodingDefaults,
    pub hls: HlsSettings,
    pub logging: LoggingSettings,
}

/// How the ffmpeg binary is located and run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Explicit binary path; `PATH` lookup when unset or missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub threads: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout_secs: 3600,
            threads: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Root under which per-operation folders are created
    pub storage_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            storage_dir: std::env::temp_dir().join("trimkit"),
        }
    }
}

/// Codec defaults substituted into re-encoding commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingDefaults {
    pub video_codec: String,
    pub audio_codec: String,
    pub preset: String,
    pub crf: u8,
}

impl Default for EncodingDefaults {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "medium".to_string(),
            crf: 23,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsSettings {
    pub segment_seconds: u32,
    pub playlist_name: String,
    pub master_playlist_name: String,
    /// Segments are written as `<prefix>_<n>.ts`
    pub segment_prefix: String,
}

impl Default for HlsSettings {
    fn default() -> Self {
        Self {
            segment_seconds: 10,
            playlist_name: "playlist.m3u8".to_string(),
            master_playlist_name: "master.m3u8".to_string(),
            segment_prefix: "segment".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// `pretty`, `compact` or `json`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> DomainResult<()> {
        if self.encoding.crf > 51 {
            return Err(DomainError::ConfigError(
                "CRF value cannot exceed 51".to_string(),
            ));
        }
        if self.hls.segment_seconds == 0 {
            return Err(DomainError::ConfigError(
                "HLS segment duration must be positive".to_string(),
            ));
        }
        if self.engine.threads == 0 {
            return Err(DomainError::ConfigError(
                "Thread count must be positive".to_string(),
            ));
        }
        if self.engine.timeout_secs == 0 {
            return Err(DomainError::ConfigError(
                "Engine timeout must be positive".to_string(),
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(DomainError::ConfigError(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                self.logging.level
            )));
        }
        if !matches!(
            self.logging.format.to_lowercase().as_str(),
            "pretty" | "compact" | "json"
        ) {
            return Err(DomainError::ConfigError(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                self.logging.format
            )));
        }
        for name in [
            &self.hls.playlist_name,
            &self.hls.master_playlist_name,
            &self.hls.segment_prefix,
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(DomainError::ConfigError(format!(
                    "Invalid HLS file name: '{}'",
                    name
                )));
            }
        }
        Ok(())
    }
}
