//! HLS command assembly and segment discovery

use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::model::{EncodingDefaults, HlsRequest, HlsSettings, MultiVariantHlsRequest};
use crate::domain::rules::FilterRules;
use crate::engine::EngineCommand;
use crate::ports::FsPort;

/// File layout of one HLS output directory
#[derive(Debug, Clone, PartialEq)]
pub struct HlsLayout {
    pub root: PathBuf,
    pub playlist_name: String,
    pub master_playlist_name: String,
    pub segment_prefix: String,
    pub segment_seconds: u32,
}

impl HlsLayout {
    pub fn new(root: impl Into<PathBuf>, settings: &HlsSettings, segment_seconds: Option<u32>) -> Self {
        Self {
            root: root.into(),
            playlist_name: settings.playlist_name.clone(),
            master_playlist_name: settings.master_playlist_name.clone(),
            segment_prefix: settings.segment_prefix.clone(),
            segment_seconds: segment_seconds.unwrap_or(settings.segment_seconds),
        }
    }

    pub fn playlist_path(&self) -> PathBuf {
        self.root.join(&self.playlist_name)
    }

    pub fn master_playlist_path(&self) -> PathBuf {
        self.root.join(&self.master_playlist_name)
    }

    /// Directory of rendition `index` in a multi-variant run
    pub fn variant_dir(&self, index: usize) -> PathBuf {
        self.root.join(format!("v{}", index))
    }

    /// Segment file name pattern in ffmpeg's `%d` notation
    fn segment_pattern(&self) -> String {
        format!("{}_%d.ts", self.segment_prefix)
    }

    fn hls_muxer_args(&self, cmd: &mut EngineCommand) {
        cmd.args(["-f", "hls"]);
        cmd.args(["-hls_time".to_string(), self.segment_seconds.to_string()]);
        cmd.args(["-hls_list_size", "0"]);
        cmd.args(["-hls_playlist_type", "vod"]);
        cmd.args(["-start_number", "0"]);
    }
}

/// Path of segment `index` inside `dir`
pub fn segment_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    dir.join(format!("{}_{}.ts", prefix, index))
}

/// Segment a single input into one media playlist
pub fn build_single(request: &HlsRequest, layout: &HlsLayout, defaults: &EncodingDefaults) -> EngineCommand {
    let mut cmd = EngineCommand::new();
    cmd.input(request.input.trim());
    if request.reencode {
        cmd.args(["-c:v", defaults.video_codec.as_str()]);
        cmd.args(["-preset", defaults.preset.as_str()]);
        cmd.args(["-crf".to_string(), defaults.crf.to_string()]);
        cmd.args(["-c:a", defaults.audio_codec.as_str()]);
    } else {
        cmd.args(["-c", "copy"]);
    }
    layout.hls_muxer_args(&mut cmd);
    cmd.arg("-hls_segment_filename");
    cmd.output(&layout.root.join(layout.segment_pattern()));
    cmd.output(&layout.playlist_path());
    cmd
}

/// Encode every rendition in one run, writing `v<i>/` subdirectories and a
/// master playlist that references them
pub fn build_multi_variant(
    request: &MultiVariantHlsRequest,
    layout: &HlsLayout,
    defaults: &EncodingDefaults,
) -> EngineCommand {
    let mut cmd = EngineCommand::new();
    cmd.input(request.input.trim());

    for _ in &request.variants {
        cmd.args(["-map", "0:v:0"]);
        if request.include_audio {
            cmd.args(["-map", "0:a:0"]);
        }
    }

    for (index, variant) in request.variants.iter().enumerate() {
        cmd.args([format!("-filter:v:{}", index), FilterRules::even_scale(variant.scale)]);
        cmd.args([format!("-c:v:{}", index), defaults.video_codec.clone()]);
        cmd.args([format!("-b:v:{}", index), variant.bitrate.clone()]);
        cmd.args([format!("-maxrate:v:{}", index), variant.max_bitrate.clone()]);
        cmd.args([format!("-bufsize:v:{}", index), variant.max_bitrate.clone()]);
    }
    cmd.args(["-preset", defaults.preset.as_str()]);
    if request.include_audio {
        cmd.args(["-c:a", defaults.audio_codec.as_str()]);
    }

    layout.hls_muxer_args(&mut cmd);
    cmd.args(["-master_pl_name", layout.master_playlist_name.as_str()]);
    cmd.arg("-hls_segment_filename");
    cmd.output(&layout.root.join("v%v").join(layout.segment_pattern()));
    cmd.args(["-var_stream_map".to_string(), stream_map(request)]);
    cmd.output(&layout.root.join("v%v").join(&layout.playlist_name));
    cmd
}

fn stream_map(request: &MultiVariantHlsRequest) -> String {
    (0..request.variants.len())
        .map(|i| {
            if request.include_audio {
                format!("v:{i},a:{i}")
            } else {
                format!("v:{i}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collect `<prefix>_0.ts`, `<prefix>_1.ts`, ... until the first gap
pub async fn poll_segments(
    fs: &dyn FsPort,
    dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, DomainError> {
    let mut segments = Vec::new();
    loop {
        let candidate = segment_path(dir, prefix, segments.len());
        if !fs.file_exists(&candidate).await? {
            break;
        }
        segments.push(candidate);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VariantOption;
    use async_trait::async_trait;
    use std::collections::HashSet;

    fn layout() -> HlsLayout {
        HlsLayout::new("/out/Hls/movie", &HlsSettings::default(), None)
    }

    #[test]
    fn layout_uses_settings_and_override() {
        let layout = HlsLayout::new("/x", &HlsSettings::default(), Some(4));
        assert_eq!(layout.segment_seconds, 4);
        assert_eq!(layout.playlist_path(), PathBuf::from("/x/playlist.m3u8"));
        assert_eq!(layout.master_playlist_path(), PathBuf::from("/x/master.m3u8"));
        assert_eq!(layout.variant_dir(2), PathBuf::from("/x/v2"));
        assert_eq!(
            segment_path(Path::new("/x"), "segment", 3),
            PathBuf::from("/x/segment_3.ts")
        );
    }

    #[test]
    fn single_copies_streams_by_default() {
        let cmd = build_single(&HlsRequest::new("/in/movie.mp4"), &layout(), &EncodingDefaults::default());
        assert_eq!(cmd.value_of("-c"), Some("copy"));
        assert_eq!(cmd.value_of("-f"), Some("hls"));
        assert_eq!(cmd.value_of("-hls_time"), Some("10"));
        assert_eq!(cmd.value_of("-hls_list_size"), Some("0"));
        assert_eq!(cmd.value_of("-start_number"), Some("0"));
        assert_eq!(
            cmd.value_of("-hls_segment_filename"),
            Some("/out/Hls/movie/segment_%d.ts")
        );
        assert_eq!(
            cmd.as_args().last().map(String::as_str),
            Some("/out/Hls/movie/playlist.m3u8")
        );
    }

    #[test]
    fn single_reencode_uses_defaults() {
        let mut request = HlsRequest::new("/in/movie.mp4");
        request.reencode = true;
        let cmd = build_single(&request, &layout(), &EncodingDefaults::default());
        assert_eq!(cmd.value_of("-c:v"), Some("libx264"));
        assert_eq!(cmd.value_of("-c:a"), Some("aac"));
        assert!(!cmd.has_flag("-c"));
    }

    #[test]
    fn multi_variant_maps_every_rendition() {
        let request = MultiVariantHlsRequest::new("/in/movie.mp4");
        let cmd = build_multi_variant(&request, &layout(), &EncodingDefaults::default());
        let maps = cmd.as_args().iter().filter(|a| *a == "-map").count();
        assert_eq!(maps, 6);
        assert_eq!(cmd.value_of("-b:v:0"), Some("5000k"));
        assert_eq!(cmd.value_of("-maxrate:v:1"), Some("2996k"));
        assert_eq!(
            cmd.value_of("-filter:v:2"),
            Some("scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2")
        );
        assert_eq!(cmd.value_of("-var_stream_map"), Some("v:0,a:0 v:1,a:1 v:2,a:2"));
        assert_eq!(cmd.value_of("-master_pl_name"), Some("master.m3u8"));
        assert_eq!(
            cmd.value_of("-hls_segment_filename"),
            Some("/out/Hls/movie/v%v/segment_%d.ts")
        );
        assert_eq!(
            cmd.as_args().last().map(String::as_str),
            Some("/out/Hls/movie/v%v/playlist.m3u8")
        );
    }

    #[test]
    fn multi_variant_without_audio() {
        let mut request = MultiVariantHlsRequest::new("/in/movie.mp4")
            .with_variants(vec![VariantOption::new(0.5, "1M", "800k").unwrap()]);
        request.include_audio = false;
        let cmd = build_multi_variant(&request, &layout(), &EncodingDefaults::default());
        assert_eq!(cmd.value_of("-var_stream_map"), Some("v:0"));
        assert!(!cmd.has_flag("-c:a"));
        assert!(!cmd.as_args().iter().any(|a| a == "0:a:0"));
    }

    struct FakeFs {
        files: HashSet<PathBuf>,
    }

    #[async_trait]
    impl FsPort for FakeFs {
        async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
            Ok(self.files.contains(path))
        }

        async fn directory_exists(&self, _path: &Path) -> Result<bool, DomainError> {
            Ok(true)
        }

        async fn create_directory(&self, _path: &Path) -> Result<(), DomainError> {
            Ok(())
        }

        async fn resolve_path(&self, path: &Path) -> Result<PathBuf, DomainError> {
            Ok(path.to_path_buf())
        }
    }

    #[tokio::test]
    async fn polling_stops_at_first_gap() {
        let dir = Path::new("/seg");
        let fs = FakeFs {
            files: [0, 1, 2, 4]
                .iter()
                .map(|i| segment_path(dir, "segment", *i))
                .collect(),
        };
        let segments = poll_segments(&fs, dir, "segment").await.unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], PathBuf::from("/seg/segment_2.ts"));
    }

    #[tokio::test]
    async fn polling_empty_directory() {
        let fs = FakeFs {
            files: HashSet::new(),
        };
        let segments = poll_segments(&fs, Path::new("/seg"), "segment").await.unwrap();
        assert!(segments.is_empty());
    }
}
