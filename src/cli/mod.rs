//! CLI module for TrimKit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputMode;

pub mod args;
pub mod commands;

/// TrimKit video toolkit
///
/// Trims, transcodes and segments videos by driving the ffmpeg command-line
/// tool.
#[derive(Parser, Debug)]
#[command(name = "trimkit")]
#[command(about = "TrimKit - trim, transcode and package videos with ffmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./trimkit.toml when present)
    #[arg(long, global = true, env = "TRIMKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Kill the engine after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Print the engine command instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Result format (text, json, yaml)
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputMode,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a time range out of a video
    Trim(args::TrimArgs),
    /// Re-encode a video
    Transcode(args::TranscodeArgs),
    /// Save a network stream to a local file
    Convert(args::ConvertArgs),
    /// Segment a video into an HLS playlist
    Hls(args::HlsArgs),
    /// Segment a video into a multi-bitrate HLS set
    HlsMulti(args::HlsMultiArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Trim(_) => "trim",
            Commands::Transcode(_) => "transcode",
            Commands::Convert(_) => "convert",
            Commands::Hls(_) => "hls",
            Commands::HlsMulti(_) => "hls-multi",
        }
    }
}
