//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::errors::DomainResult;
use crate::domain::model::*;

/// Where results are written; unset parts fall back to configuration
#[derive(Args, Debug, Default, Clone)]
pub struct LocationArgs {
    /// Root output directory
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Folder under the root directory
    #[arg(long)]
    pub folder: Option<String>,

    /// Output file name (default: derived from the input plus a timestamp)
    #[arg(long)]
    pub name: Option<String>,
}

impl LocationArgs {
    pub fn to_location(&self) -> OutputLocation {
        OutputLocation {
            storage_dir: self.storage_dir.clone(),
            folder_name: self.folder.clone(),
            file_name: self.name.clone(),
        }
    }
}

fn parse_format(format: &Option<String>) -> DomainResult<Option<OutputFormat>> {
    format.as_deref().map(OutputFormat::parse).transpose()
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Output container (default: same as input)
    #[arg(long)]
    pub format: Option<String>,

    /// Re-encode instead of stream copy
    #[arg(long)]
    pub encode: bool,

    /// GIF frame rate
    #[arg(long, default_value_t = 10)]
    pub gif_fps: u32,

    /// GIF width in pixels
    #[arg(long, default_value_t = 480)]
    pub gif_scale: u32,

    /// Raw engine argument replacing the codec section (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl TrimArgs {
    pub fn into_request(self) -> DomainResult<TrimRequest> {
        let start = TimeSpec::parse(&self.start)?;
        let end = TimeSpec::parse(&self.end)?;
        let mut request = TrimRequest::new(self.input, start, end)?
            .with_location(self.location.to_location())
            .with_encoding(self.encode)
            .with_gif_options(GifOptions {
                fps: self.gif_fps,
                scale: self.gif_scale,
            });
        if let Some(format) = parse_format(&self.format)? {
            request = request.with_format(format);
        }
        if !self.engine_args.is_empty() {
            request = request.with_custom_args(self.engine_args);
        }
        Ok(request)
    }
}

/// Arguments for the transcode command
#[derive(Args, Debug)]
pub struct TranscodeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output container (default: mp4)
    #[arg(long)]
    pub format: Option<String>,

    /// Video codec (default from configuration)
    #[arg(long)]
    pub video_codec: Option<String>,

    /// Audio codec (default from configuration)
    #[arg(long)]
    pub audio_codec: Option<String>,

    /// Encoding preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Constant Rate Factor (0-51)
    #[arg(long)]
    pub crf: Option<u8>,

    /// Resolution factor in (0, 1]
    #[arg(long)]
    pub scale: Option<f64>,

    /// Target video bitrate, e.g. 2500k
    #[arg(long)]
    pub bitrate: Option<String>,

    /// Peak video bitrate
    #[arg(long)]
    pub max_bitrate: Option<String>,

    /// Extra engine argument appended before the output (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl TranscodeArgs {
    pub fn into_request(self) -> DomainResult<TranscodeRequest> {
        Ok(TranscodeRequest {
            format: parse_format(&self.format)?,
            location: self.location.to_location(),
            video_codec: self.video_codec,
            audio_codec: self.audio_codec,
            preset: self.preset,
            crf: self.crf,
            scale: self.scale,
            bitrate: self.bitrate,
            max_bitrate: self.max_bitrate,
            extra_args: self.engine_args,
            ..TranscodeRequest::new(self.input)
        })
    }
}

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source URL (http, https, rtmp, rtsp or file)
    #[arg(short, long)]
    pub url: String,

    /// Output container (default: mp4)
    #[arg(long)]
    pub format: Option<String>,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl ConvertArgs {
    pub fn into_request(self) -> DomainResult<ConvertRequest> {
        let mut request = ConvertRequest::new(self.url);
        request.location = self.location.to_location();
        request.format = parse_format(&self.format)?;
        Ok(request)
    }
}

/// Arguments for the hls command
#[derive(Args, Debug)]
pub struct HlsArgs {
    /// Input video file path or URL
    #[arg(short, long)]
    pub input: String,

    /// Segment duration in seconds (default from configuration)
    #[arg(long)]
    pub segment_seconds: Option<u32>,

    /// Re-encode instead of stream copy
    #[arg(long)]
    pub reencode: bool,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl HlsArgs {
    pub fn into_request(self) -> HlsRequest {
        let mut request = HlsRequest::new(self.input);
        request.location = self.location.to_location();
        request.segment_seconds = self.segment_seconds;
        request.reencode = self.reencode;
        request
    }
}

/// Arguments for the hls-multi command
#[derive(Args, Debug)]
pub struct HlsMultiArgs {
    /// Input video file path or URL
    #[arg(short, long)]
    pub input: String,

    /// Segment duration in seconds (default from configuration)
    #[arg(long)]
    pub segment_seconds: Option<u32>,

    /// Rendition as SCALE:MAXRATE:BITRATE, e.g. 0.5:1498k:1400k (repeatable;
    /// default: 1.0, 0.75 and 0.5 renditions)
    #[arg(long = "variant")]
    pub variants: Vec<VariantOption>,

    /// Drop the audio track from every rendition
    #[arg(long)]
    pub no_audio: bool,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl HlsMultiArgs {
    pub fn into_request(self) -> MultiVariantHlsRequest {
        let mut request = MultiVariantHlsRequest::new(self.input);
        if !self.variants.is_empty() {
            request = request.with_variants(self.variants);
        }
        request.location = self.location.to_location();
        request.segment_seconds = self.segment_seconds;
        request.include_audio = !self.no_audio;
        request
    }
}
