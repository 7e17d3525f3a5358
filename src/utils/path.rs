//! Output naming helpers

use std::path::Path;

use chrono::Local;
use url::Url;

/// Stem used when nothing better can be derived
const FALLBACK_STEM: &str = "video";

/// Path utilities for generated output names
pub struct PathUtils;

impl PathUtils {
    /// File stem (name without extension) of an input path
    pub fn input_stem(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string())
    }

    /// Stem of the last non-empty path segment of a URL, `stream` if none
    pub fn url_stem(url: &Url) -> String {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(|segment| Self::input_stem(Path::new(segment)))
            .unwrap_or_else(|| "stream".to_string())
    }

    /// Stem of an input that may be a path or a URL
    pub fn source_stem(source: &str) -> String {
        match Url::parse(source) {
            Ok(url) if url.has_host() => Self::url_stem(&url),
            _ => Self::input_stem(Path::new(source)),
        }
    }

    /// Append a local-time timestamp with millisecond resolution
    pub fn timestamped(base: &str) -> String {
        format!("{}_{}", base, Local::now().format("%Y%m%d_%H%M%S%3f"))
    }

    /// Drop a trailing `.ext` (case-insensitive) if present
    pub fn strip_extension<'a>(name: &'a str, extension: &str) -> &'a str {
        let suffix_len = extension.len() + 1;
        if name.len() > suffix_len && name.is_char_boundary(name.len() - suffix_len) {
            let (head, tail) = name.split_at(name.len() - suffix_len);
            if tail.starts_with('.') && tail[1..].eq_ignore_ascii_case(extension) {
                return head;
            }
        }
        name
    }
}
