//! TrimKit video toolkit library
//!
//! Trims, transcodes, converts and HLS-segments videos by assembling command
//! lines for the external `ffmpeg` tool and awaiting one subprocess per
//! operation. Playback is delegated to a host-supplied player through
//! [`ports::PlayerPort`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{
    AppConfig, ConvertRequest, GifOptions, HlsRequest, HlsResult, MediaOutput, MultiVariantHlsRequest,
    OutputFormat, OutputLocation, TimeSpec, TranscodeRequest, TrimRequest, VariantOption,
};
pub use engine::EngineCommand;
