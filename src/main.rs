//! TrimKit command-line entry point
//!
//! # Usage
//!
//! ```bash
//! trimkit trim -i talk.mp4 -s 00:01:00 -e 00:02:30
//! trimkit transcode -i talk.mov --scale 0.5 --bitrate 1500k
//! trimkit convert -u https://cdn.example.com/live/index.m3u8 --format mkv
//! trimkit hls -i talk.mp4 --segment-seconds 6
//! trimkit hls-multi -i talk.mp4 --variant 1.0:5350k:5000k --variant 0.5:1498k:1400k
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use trimkit::adapters::TomlConfigAdapter;
use trimkit::app::DefaultAppContainer;
use trimkit::cli::{commands, Cli, Commands};
use trimkit::config_initialization::initialize_configuration_hierarchy;
use trimkit::output::OutputWriter;
use trimkit::ports::ConfigPort;
use trimkit::utils::logging::{LoggingConfig, LoggingSystem};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve configuration before logging so the configured level applies
    let config_port: Arc<dyn ConfigPort> = Arc::new(TomlConfigAdapter::new());
    initialize_configuration_hierarchy(config_port.as_ref(), &cli).await?;
    let config = config_port.current().await;

    let logging = LoggingSystem::new(
        LoggingConfig::from_settings(&config.logging).context("Invalid logging settings")?,
    );
    logging.initialize()?;
    logging.log_system_info();

    let container = DefaultAppContainer::new(Arc::clone(&config_port), cli.dry_run).await;
    if !container.execute_port().engine_available().await {
        bail!("ffmpeg not found; install it or pass --ffmpeg-path");
    }
    let writer = OutputWriter::new(cli.output);

    info!(command = cli.command.name(), dry_run = cli.dry_run, "Executing command");
    match cli.command {
        Commands::Trim(args) => commands::trim(&container, &writer, args).await?,
        Commands::Transcode(args) => commands::transcode(&container, &writer, args).await?,
        Commands::Convert(args) => commands::convert(&container, &writer, args).await?,
        Commands::Hls(args) => commands::hls(&container, &writer, args).await?,
        Commands::HlsMulti(args) => commands::hls_multi(&container, &writer, args).await?,
    }

    info!("TrimKit completed successfully");
    Ok(())
}
