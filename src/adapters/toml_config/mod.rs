// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "trimkit.toml";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: Arc<RwLock<AppConfig>>,
    config_file_path: Arc<RwLock<Option<PathBuf>>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding defaults
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_file_path: Arc::new(RwLock::new(None)),
        }
    }

    fn read(&self) -> AppConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, config: AppConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    fn remember_path(&self, path: &Path) {
        if let Ok(mut guard) = self.config_file_path.write() {
            *guard = Some(path.to_path_buf());
        }
    }

    /// Deserialize config from TOML string
    fn deserialize_config(content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value.trim().parse::<T>().map_err(|_| {
        DomainError::ConfigError(format!("Invalid value for {}: '{}'", key, value))
    })
}

/// Apply a dotted-key override to `config`
fn apply_override(config: &mut AppConfig, key: &str, value: &str) -> Result<(), DomainError> {
    match key {
        "engine.ffmpeg_path" => config.engine.ffmpeg_path = Some(PathBuf::from(value)),
        "engine.timeout_secs" => config.engine.timeout_secs = parse_value(key, value)?,
        "engine.threads" => config.engine.threads = parse_value(key, value)?,
        "output.storage_dir" => config.output.storage_dir = PathBuf::from(value),
        "encoding.video_codec" => config.encoding.video_codec = value.to_string(),
        "encoding.audio_codec" => config.encoding.audio_codec = value.to_string(),
        "encoding.preset" => config.encoding.preset = value.to_string(),
        "encoding.crf" => config.encoding.crf = parse_value(key, value)?,
        "hls.segment_seconds" => config.hls.segment_seconds = parse_value(key, value)?,
        "hls.playlist_name" => config.hls.playlist_name = value.to_string(),
        "hls.master_playlist_name" => config.hls.master_playlist_name = value.to_string(),
        "hls.segment_prefix" => config.hls.segment_prefix = value.to_string(),
        "logging.level" => config.logging.level = value.to_string(),
        "logging.format" => config.logging.format = value.to_string(),
        _ => {
            return Err(DomainError::ConfigError(format!(
                "Unknown configuration key: {}",
                key
            )))
        }
    }
    Ok(())
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn current(&self) -> AppConfig {
        self.read()
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        if !file_path.exists() {
            return Err(DomainError::FsFail(format!(
                "Config file does not exist: {}",
                file_path.display()
            )));
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to read config file: {}", e)))?;
        let config = Self::deserialize_config(&content)?;
        config.validate()?;

        self.write(config);
        self.remember_path(file_path);
        tracing::info!("Loaded configuration from {}", file_path.display());
        Ok(())
    }

    async fn save_config(&self, file_path: &Path) -> Result<(), DomainError> {
        // Ensure parent directory exists
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::FsFail(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(&self.read())
            .map_err(|e| DomainError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(file_path, content)
            .map_err(|e| DomainError::FsFail(format!("Failed to write config file: {}", e)))?;

        self.remember_path(file_path);
        Ok(())
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut config = self.read();
        apply_override(&mut config, key, value)?;
        self.write(config);
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        self.read().validate()
    }

    async fn get_config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn starts_with_defaults() {
        let adapter = TomlConfigAdapter::new();
        assert_eq!(adapter.current().await, AppConfig::default());
        assert!(adapter.get_config_file_path().await.is_none());
        assert!(adapter.validate_config().await.is_ok());
    }

    #[tokio::test]
    async fn set_config_overrides_typed_values() {
        let adapter = TomlConfigAdapter::new();
        adapter.set_config("encoding.crf", "18").await.unwrap();
        adapter.set_config("hls.segment_prefix", "chunk").await.unwrap();
        adapter.set_config("output.storage_dir", "/data/out").await.unwrap();

        let config = adapter.current().await;
        assert_eq!(config.encoding.crf, 18);
        assert_eq!(config.hls.segment_prefix, "chunk");
        assert_eq!(config.output.storage_dir, PathBuf::from("/data/out"));
    }

    #[tokio::test]
    async fn set_config_rejects_bad_input() {
        let adapter = TomlConfigAdapter::new();
        assert!(adapter.set_config("encoding.crf", "high").await.is_err());
        assert!(adapter.set_config("no.such.key", "1").await.is_err());

        adapter.set_config("encoding.crf", "70").await.unwrap();
        assert!(adapter.validate_config().await.is_err());
    }

    #[tokio::test]
    async fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf").join("trimkit.toml");

        let adapter = TomlConfigAdapter::new();
        adapter.set_config("encoding.preset", "slow").await.unwrap();
        adapter.set_config("hls.segment_seconds", "6").await.unwrap();
        adapter.save_config(&path).await.unwrap();

        let reloaded = TomlConfigAdapter::new();
        reloaded.load_config(&path).await.unwrap();
        let config = reloaded.current().await;
        assert_eq!(config.encoding.preset, "slow");
        assert_eq!(config.hls.segment_seconds, 6);
        assert_eq!(reloaded.get_config_file_path().await, Some(path));
    }

    #[tokio::test]
    async fn load_rejects_missing_and_invalid_files() {
        let temp = TempDir::new().unwrap();
        let adapter = TomlConfigAdapter::new();
        assert!(adapter.load_config(&temp.path().join("nope.toml")).await.is_err());

        let bad = temp.path().join("bad.toml");
        std::fs::write(&bad, "[encoding]\ncrf = \"x\"\n").unwrap();
        let err = adapter.load_config(&bad).await.unwrap_err();
        assert!(matches!(err, DomainError::ConfigError(_)));

        let invalid = temp.path().join("invalid.toml");
        std::fs::write(&invalid, "[hls]\nsegment_seconds = 0\n").unwrap();
        assert!(adapter.load_config(&invalid).await.is_err());
    }
}
