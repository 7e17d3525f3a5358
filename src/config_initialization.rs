//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::toml_config::DEFAULT_CONFIG_FILE;
use crate::cli::Cli;
use crate::ports::ConfigPort;

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("TRIMKIT_FFMPEG_PATH", "engine.ffmpeg_path"),
    ("TRIMKIT_TIMEOUT_SECS", "engine.timeout_secs"),
    ("TRIMKIT_THREADS", "engine.threads"),
    ("TRIMKIT_STORAGE_DIR", "output.storage_dir"),
    ("TRIMKIT_VIDEO_CODEC", "encoding.video_codec"),
    ("TRIMKIT_AUDIO_CODEC", "encoding.audio_codec"),
    ("TRIMKIT_PRESET", "encoding.preset"),
    ("TRIMKIT_CRF", "encoding.crf"),
    ("TRIMKIT_SEGMENT_SECONDS", "hls.segment_seconds"),
    ("TRIMKIT_LOG_LEVEL", "logging.level"),
    ("TRIMKIT_LOG_FORMAT", "logging.format"),
];

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(config: &dyn ConfigPort, cli: &Cli) -> Result<()> {
    // Step 1: defaults are already held by the adapter
    // Step 2: config file
    load_config_file(config, cli.config.as_deref()).await?;

    // Step 3: environment variables
    apply_environment_overrides(config, |name| std::env::var(name).ok()).await?;

    // Step 4: CLI arguments
    apply_cli_configuration_overrides(config, cli).await?;

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;
    Ok(())
}

/// Load an explicitly named file, or `trimkit.toml` from the working
/// directory when one exists. A named file that is missing is an error.
pub async fn load_config_file(config: &dyn ConfigPort, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                debug!("No {} in working directory, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(None);
            }
            default
        }
    };

    config
        .load_config(&path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Ok(Some(path))
}

/// Apply `TRIMKIT_*` variables found through `lookup`
pub async fn apply_environment_overrides<F>(config: &dyn ConfigPort, lookup: F) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for &(env_var, key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            config
                .set_config(key, &value)
                .await
                .with_context(|| format!("Invalid value in {}", env_var))?;
            debug!("Environment override: {} = {}", key, value);
            env_overrides += 1;
        }
    }

    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(env_overrides)
}

/// Apply global CLI flags that map onto configuration keys
pub async fn apply_cli_configuration_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize> {
    let mut overrides: Vec<(&str, String)> = Vec::new();
    if let Some(level) = &cli.log_level {
        overrides.push(("logging.level", level.clone()));
    }
    if let Some(format) = &cli.log_format {
        overrides.push(("logging.format", format.clone()));
    }
    if let Some(path) = &cli.ffmpeg_path {
        overrides.push(("engine.ffmpeg_path", path.display().to_string()));
    }
    if let Some(timeout) = cli.timeout_secs {
        overrides.push(("engine.timeout_secs", timeout.to_string()));
    }

    for (key, value) in &overrides {
        config
            .set_config(key, value)
            .await
            .with_context(|| format!("Invalid command-line value for {}", key))?;
        debug!("CLI override: {} = {}", key, value);
    }
    Ok(overrides.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TomlConfigAdapter;
    use clap::Parser;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn environment_overrides_file_values() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.toml");
        std::fs::write(&file, "[encoding]\ncrf = 30\npreset = \"fast\"\n").unwrap();

        let config = TomlConfigAdapter::new();
        load_config_file(&config, Some(&file)).await.unwrap();

        let env: HashMap<&str, &str> = [("TRIMKIT_CRF", "20")].into_iter().collect();
        let applied = apply_environment_overrides(&config, |name| env.get(name).map(|v| v.to_string()))
            .await
            .unwrap();

        let current = config.current().await;
        assert_eq!(applied, 1);
        assert_eq!(current.encoding.crf, 20);
        assert_eq!(current.encoding.preset, "fast");
    }

    #[tokio::test]
    async fn bad_environment_value_is_reported() {
        let config = TomlConfigAdapter::new();
        let result = apply_environment_overrides(&config, |name| {
            (name == "TRIMKIT_THREADS").then(|| "many".to_string())
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cli_flags_win() {
        let config = TomlConfigAdapter::new();
        config.set_config("logging.level", "warn").await.unwrap();

        let cli = Cli::try_parse_from([
            "trimkit", "--log-level", "debug", "--timeout-secs", "60", "hls", "-i", "in.mp4",
        ])
        .unwrap();
        let applied = apply_cli_configuration_overrides(&config, &cli).await.unwrap();

        let current = config.current().await;
        assert_eq!(applied, 2);
        assert_eq!(current.logging.level, "debug");
        assert_eq!(current.engine.timeout_secs, 60);
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let config = TomlConfigAdapter::new();
        let result = load_config_file(&config, Some(Path::new("/definitely/not/here.toml"))).await;
        assert!(result.is_err());
    }
}
