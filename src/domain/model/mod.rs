// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::rules::{RangeRules, VariantRules};

pub mod config;

pub use config::*;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self {
            seconds: millis as f64 / 1000.0,
        }
    }

    /// Convert from Duration
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            seconds: duration.as_secs_f64(),
        }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Whole milliseconds, rounded to nearest
    pub fn as_millis(&self) -> u64 {
        (self.seconds.max(0.0) * 1000.0).round() as u64
    }

    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> DomainResult<Self> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a non-negative number: {}",
                    time_str
                )));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            [mm, ss] => (0, parse_minutes(mm)?, parse_seconds(ss)?),
            [hh, mm, ss] => (parse_field(hh, "hours")?, parse_minutes(mm)?, parse_seconds(ss)?),
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                    time_str
                )))
            }
        };

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
        ))
    }

    /// Format as `HH:MM:SS.mmm`, the form ffmpeg accepts for `-ss` and `-t`
    pub fn to_engine_timestamp(&self) -> String {
        let total_ms = self.as_millis();
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let millis = total_ms % 1000;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

fn parse_field(value: &str, name: &str) -> DomainResult<u32> {
    value
        .parse::<u32>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: {}", name, value)))
}

fn parse_minutes(value: &str) -> DomainResult<u32> {
    let minutes = parse_field(value, "minutes")?;
    if minutes >= 60 {
        return Err(DomainError::BadArgs(
            "Minutes must be less than 60".to_string(),
        ));
    }
    Ok(minutes)
}

fn parse_seconds(value: &str) -> DomainResult<f64> {
    let seconds = value
        .parse::<f64>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid seconds format: {}", value)))?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(
            "Seconds must be less than 60".to_string(),
        ));
    }
    Ok(seconds)
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_engine_timestamp())
    }
}

/// Output container format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputFormat {
    Mp4,
    Mov,
    Mkv,
    Webm,
    Avi,
    Gif,
    /// Any other extension, passed through to ffmpeg untouched
    Custom(String),
}

impl OutputFormat {
    /// Parse a format name or extension (case-insensitive, leading dot allowed)
    pub fn parse(format: &str) -> DomainResult<Self> {
        let normalized = format.trim().trim_start_matches('.').to_lowercase();
        let parsed = match normalized.as_str() {
            "" => {
                return Err(DomainError::BadArgs(
                    "Output format cannot be empty".to_string(),
                ))
            }
            "mp4" => Self::Mp4,
            "mov" => Self::Mov,
            "mkv" => Self::Mkv,
            "webm" => Self::Webm,
            "avi" => Self::Avi,
            "gif" => Self::Gif,
            other => {
                if !other.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(DomainError::BadArgs(format!(
                        "Invalid output format: {}",
                        format
                    )));
                }
                Self::Custom(other.to_string())
            }
        };
        Ok(parsed)
    }

    /// Format of an existing file, by extension; falls back to mp4
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| Self::parse(&ext.to_string_lossy()).ok())
            .unwrap_or(Self::Mp4)
    }

    pub fn extension(&self) -> &str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Webm => "webm",
            Self::Avi => "avi",
            Self::Gif => "gif",
            Self::Custom(ext) => ext,
        }
    }

    pub fn is_gif(&self) -> bool {
        matches!(self, Self::Gif)
    }

    /// Containers that benefit from `+faststart` and need ADTS audio remapped
    pub fn is_iso_bmff(&self) -> bool {
        matches!(self, Self::Mp4 | Self::Mov)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// GIF rendering options
#[derive(Debug, Clone, PartialEq)]
pub struct GifOptions {
    pub fps: u32,
    /// Output width in pixels, height follows the aspect ratio
    pub scale: u32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self { fps: 10, scale: 480 }
    }
}

/// Where an operation writes its output. Unset fields fall back to
/// configuration and per-operation defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputLocation {
    pub storage_dir: Option<PathBuf>,
    pub folder_name: Option<String>,
    pub file_name: Option<String>,
}

impl OutputLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_folder_name(mut self, folder: impl Into<String>) -> Self {
        self.folder_name = Some(folder.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

/// Trim request
#[derive(Debug, Clone)]
pub struct TrimRequest {
    pub input_path: PathBuf,
    pub start: TimeSpec,
    pub end: TimeSpec,
    pub location: OutputLocation,
    /// Defaults to the input's own container
    pub format: Option<OutputFormat>,
    /// Re-encode instead of stream copy
    pub apply_encoding: bool,
    /// Replaces the codec section of the generated command
    pub custom_args: Option<Vec<String>>,
    pub gif: GifOptions,
}

impl TrimRequest {
    /// Create a new trim request with range validation
    pub fn new(input_path: impl Into<PathBuf>, start: TimeSpec, end: TimeSpec) -> DomainResult<Self> {
        RangeRules::validate(&start, &end)?;
        Ok(Self {
            input_path: input_path.into(),
            start,
            end,
            location: OutputLocation::default(),
            format: None,
            apply_encoding: false,
            custom_args: None,
            gif: GifOptions::default(),
        })
    }

    pub fn with_location(mut self, location: OutputLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_encoding(mut self, apply_encoding: bool) -> Self {
        self.apply_encoding = apply_encoding;
        self
    }

    pub fn with_custom_args(mut self, args: Vec<String>) -> Self {
        self.custom_args = Some(args);
        self
    }

    pub fn with_gif_options(mut self, gif: GifOptions) -> Self {
        self.gif = gif;
        self
    }

    /// Clip length
    pub fn duration(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.end.seconds - self.start.seconds)
    }

    /// Effective output format
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .clone()
            .unwrap_or_else(|| OutputFormat::from_path(&self.input_path))
    }
}

/// Transcode request
#[derive(Debug, Clone, Default)]
pub struct TranscodeRequest {
    pub input_path: PathBuf,
    pub location: OutputLocation,
    pub format: Option<OutputFormat>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub preset: Option<String>,
    pub crf: Option<u8>,
    /// Fraction of the source resolution, `0 < scale <= 1`
    pub scale: Option<f64>,
    /// Target bitrate (e.g. `2000k`); switches from CRF to bitrate control
    pub bitrate: Option<String>,
    pub max_bitrate: Option<String>,
    pub extra_args: Vec<String>,
}

impl TranscodeRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.clone().unwrap_or(OutputFormat::Mp4)
    }
}

/// URL-to-file conversion request
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub source_url: String,
    pub location: OutputLocation,
    pub format: Option<OutputFormat>,
}

impl ConvertRequest {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            location: OutputLocation::default(),
            format: None,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.clone().unwrap_or(OutputFormat::Mp4)
    }
}

/// File (or URL) to HLS request
#[derive(Debug, Clone)]
pub struct HlsRequest {
    /// Local path or URL
    pub input: String,
    pub location: OutputLocation,
    pub segment_seconds: Option<u32>,
    /// Re-encode to H.264/AAC instead of copying streams
    pub reencode: bool,
}

impl HlsRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            location: OutputLocation::default(),
            segment_seconds: None,
            reencode: false,
        }
    }
}

/// Multi-rendition HLS request
#[derive(Debug, Clone)]
pub struct MultiVariantHlsRequest {
    pub input: String,
    pub location: OutputLocation,
    pub segment_seconds: Option<u32>,
    pub variants: Vec<VariantOption>,
    pub include_audio: bool,
}

impl MultiVariantHlsRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            location: OutputLocation::default(),
            segment_seconds: None,
            variants: VariantOption::defaults(),
            include_audio: true,
        }
    }

    pub fn with_variants(mut self, variants: Vec<VariantOption>) -> Self {
        self.variants = variants;
        self
    }
}

/// Per-rendition encoding parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantOption {
    /// Fraction of the source resolution
    pub scale: f64,
    pub max_bitrate: String,
    pub bitrate: String,
}

impl VariantOption {
    pub fn new(
        scale: f64,
        max_bitrate: impl Into<String>,
        bitrate: impl Into<String>,
    ) -> DomainResult<Self> {
        let option = Self {
            scale,
            max_bitrate: max_bitrate.into(),
            bitrate: bitrate.into(),
        };
        VariantRules::validate(&option)?;
        Ok(option)
    }

    /// The renditions shipped with the library: full, three-quarter and half resolution
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                scale: 1.0,
                max_bitrate: "5350k".to_string(),
                bitrate: "5000k".to_string(),
            },
            Self {
                scale: 0.75,
                max_bitrate: "2996k".to_string(),
                bitrate: "2800k".to_string(),
            },
            Self {
                scale: 0.5,
                max_bitrate: "1498k".to_string(),
                bitrate: "1400k".to_string(),
            },
        ]
    }
}

impl FromStr for VariantOption {
    type Err = DomainError;

    /// Parse `SCALE:MAXRATE:BITRATE`, e.g. `0.5:1498k:1400k`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [scale, max_bitrate, bitrate] = parts.as_slice() else {
            return Err(DomainError::BadArgs(format!(
                "Invalid variant '{}'. Expected SCALE:MAXRATE:BITRATE",
                s
            )));
        };
        let scale = scale
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid variant scale: {}", scale)))?;
        Self::new(scale, max_bitrate.trim(), bitrate.trim())
    }
}

/// Result of an HLS segmentation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HlsResult {
    /// Master playlist for multi-variant runs, media playlist otherwise
    pub master_playlist: PathBuf,
    pub has_variants: bool,
    pub segments: Vec<PathBuf>,
    pub variants: Vec<HlsResult>,
}

impl HlsResult {
    /// A single rendition with its own segments
    pub fn single(playlist: PathBuf, segments: Vec<PathBuf>) -> Self {
        Self {
            master_playlist: playlist,
            has_variants: false,
            segments,
            variants: Vec::new(),
        }
    }

    /// A master playlist over nested renditions
    pub fn with_variants(master_playlist: PathBuf, variants: Vec<HlsResult>) -> Self {
        Self {
            master_playlist,
            has_variants: true,
            segments: Vec::new(),
            variants,
        }
    }

    /// Segments across this result and every nested rendition
    pub fn total_segments(&self) -> usize {
        self.segments.len()
            + self
                .variants
                .iter()
                .map(HlsResult::total_segments)
                .sum::<usize>()
    }
}

/// Outcome of a single engine invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Rendered command line, for logs and diagnostics
    pub command: String,
    /// Last lines of the engine's stderr
    pub stderr_tail: String,
    #[serde(rename = "elapsed_ms", with = "duration_millis")]
    pub elapsed: Duration,
}

/// Output of the single-file operations (trim, transcode, convert)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaOutput {
    pub output_path: PathBuf,
    pub report: ExecutionReport,
}

/// Snapshot of the playback controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub source: Option<PathBuf>,
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
}

/// Serde helper to serialize `Duration` as whole milliseconds.
mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
