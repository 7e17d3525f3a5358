// Domain rules - Validation and default-substitution policies

use std::path::PathBuf;

use url::Url;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Schemes ffmpeg is allowed to read sources from
const REMOTE_SCHEMES: &[&str] = &["http", "https", "rtmp", "rtsp"];

/// Rules for trim ranges
pub struct RangeRules;

impl RangeRules {
    /// Start must be non-negative and strictly before end
    pub fn validate(start: &TimeSpec, end: &TimeSpec) -> Result<(), DomainError> {
        if start.seconds < 0.0 {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) cannot be negative",
                start.seconds
            )));
        }
        if end.seconds <= start.seconds {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) must be less than end ({})",
                start, end
            )));
        }
        Ok(())
    }
}

/// Rules for HLS rendition parameters
pub struct VariantRules;

impl VariantRules {
    pub fn validate(option: &VariantOption) -> Result<(), DomainError> {
        if !(option.scale > 0.0 && option.scale <= 1.0) {
            return Err(DomainError::BadArgs(format!(
                "Variant scale must be in (0, 1], got {}",
                option.scale
            )));
        }
        Self::validate_bitrate(&option.max_bitrate)?;
        Self::validate_bitrate(&option.bitrate)?;
        Ok(())
    }

    /// Accepts ffmpeg bitrate notation: digits with an optional k/M suffix
    pub fn validate_bitrate(bitrate: &str) -> Result<(), DomainError> {
        let digits = bitrate
            .strip_suffix(['k', 'K', 'm', 'M'])
            .unwrap_or(bitrate);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::BadArgs(format!(
                "Invalid bitrate '{}'. Expected e.g. 2000k or 5M",
                bitrate
            )));
        }
        if digits.chars().all(|c| c == '0') {
            return Err(DomainError::BadArgs(format!(
                "Bitrate must be positive: {}",
                bitrate
            )));
        }
        Ok(())
    }
}

/// Rules for media sources
pub struct SourceRules;

impl SourceRules {
    /// Validate a URL handed to the URL-to-file conversion
    pub fn validate_url(source: &str) -> Result<Url, DomainError> {
        let url = Url::parse(source.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{}: {}", source, e)))?;
        let scheme = url.scheme();
        if !REMOTE_SCHEMES.contains(&scheme) && scheme != "file" {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                scheme, source
            )));
        }
        if scheme != "file" && url.host_str().is_none() {
            return Err(DomainError::InvalidUrl(format!("missing host in {}", source)));
        }
        Ok(url)
    }

    /// Local path named by a `file://` URL; `None` for anything else
    pub fn file_url_path(source: &str) -> Result<Option<PathBuf>, DomainError> {
        match Url::parse(source.trim()) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().map(Some).map_err(|_| {
                DomainError::InvalidUrl(format!("{} does not name a local file", source))
            }),
            _ => Ok(None),
        }
    }

    /// Whether an input string names a network source rather than a local file
    pub fn is_remote(source: &str) -> bool {
        Url::parse(source.trim())
            .map(|url| REMOTE_SCHEMES.contains(&url.scheme()))
            .unwrap_or(false)
    }
}

/// Rules for generated file names
pub struct NamingRules;

impl NamingRules {
    /// Replace separators and characters that common filesystems reject
    pub fn sanitize_stem(stem: &str) -> Result<String, DomainError> {
        let sanitized: String = stem
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let sanitized = sanitized.trim_matches('.').to_string();
        if sanitized.is_empty() {
            return Err(DomainError::BadArgs(format!(
                "File name '{}' is empty after sanitizing",
                stem
            )));
        }
        Ok(sanitized)
    }
}

/// Rules for engine filter expressions
pub struct FilterRules;

impl FilterRules {
    /// Scale filter that keeps both dimensions even, as H.264 requires
    pub fn even_scale(scale: f64) -> String {
        format!("scale=trunc(iw*{scale}/2)*2:trunc(ih*{scale}/2)*2")
    }
}

#[cfg(test)]
mod tests;
