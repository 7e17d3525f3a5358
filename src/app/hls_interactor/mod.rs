// HLS interactor - Segments a video into HLS playlists

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::{ensure_directory, ensure_input_exists, resolve_output, run_engine, HLS_FOLDER};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{SourceRules, VariantRules};
use crate::engine::hls::{self, HlsLayout};
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for file-to-HLS conversion
pub struct HlsInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
}

impl HlsInteractor {
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        config_port: Arc<dyn ConfigPort>,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            config_port,
        }
    }

    /// Produce one media playlist plus its segments
    pub async fn convert_to_hls(&self, mut request: HlsRequest) -> Result<HlsResult, DomainError> {
        info!(input = %request.input, "Starting HLS conversion");
        request.input = self.validate_input(&request.input, request.segment_seconds).await?;

        let config = self.config_port.current().await;
        let layout = self
            .prepare_layout(&config, &request.input, &request.location, request.segment_seconds)
            .await?;

        let command = hls::build_single(&request, &layout, &config.encoding);
        run_engine(self.execute_port.as_ref(), &command).await?;

        let segments =
            hls::poll_segments(self.fs_port.as_ref(), &layout.root, &layout.segment_prefix).await?;
        info!(
            playlist = %layout.playlist_path().display(),
            segments = segments.len(),
            "HLS conversion completed"
        );
        Ok(HlsResult::single(layout.playlist_path(), segments))
    }

    /// Produce a master playlist over one rendition per variant, in a single
    /// engine run
    pub async fn convert_to_multi_variant_hls(
        &self,
        mut request: MultiVariantHlsRequest,
    ) -> Result<HlsResult, DomainError> {
        info!(
            input = %request.input,
            variants = request.variants.len(),
            "Starting multi-variant HLS conversion"
        );
        if request.variants.is_empty() {
            return Err(DomainError::BadArgs(
                "At least one variant is required".to_string(),
            ));
        }
        for variant in &request.variants {
            VariantRules::validate(variant)?;
        }
        request.input = self.validate_input(&request.input, request.segment_seconds).await?;

        let config = self.config_port.current().await;
        let layout = self
            .prepare_layout(&config, &request.input, &request.location, request.segment_seconds)
            .await?;
        for index in 0..request.variants.len() {
            ensure_directory(self.fs_port.as_ref(), &layout.variant_dir(index)).await?;
        }

        let command = hls::build_multi_variant(&request, &layout, &config.encoding);
        run_engine(self.execute_port.as_ref(), &command).await?;

        let mut variants = Vec::with_capacity(request.variants.len());
        for index in 0..request.variants.len() {
            let dir = layout.variant_dir(index);
            let segments =
                hls::poll_segments(self.fs_port.as_ref(), &dir, &layout.segment_prefix).await?;
            debug!(variant = index, segments = segments.len(), "Collected rendition segments");
            variants.push(HlsResult::single(dir.join(&layout.playlist_name), segments));
        }

        let result = HlsResult::with_variants(layout.master_playlist_path(), variants);
        info!(
            master = %result.master_playlist.display(),
            segments = result.total_segments(),
            "Multi-variant HLS conversion completed"
        );
        Ok(result)
    }

    /// Local inputs must exist; network URLs are left to the engine.
    ///
    /// Returns the input as handed to the engine, with `file://` URLs turned
    /// into plain paths.
    async fn validate_input(&self, input: &str, segment_seconds: Option<u32>) -> Result<String, DomainError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::BadArgs("Input cannot be empty".to_string()));
        }
        if segment_seconds == Some(0) {
            return Err(DomainError::BadArgs(
                "Segment duration must be positive".to_string(),
            ));
        }
        if SourceRules::is_remote(input) {
            return Ok(input.to_string());
        }

        let path = match SourceRules::file_url_path(input)? {
            Some(path) => path,
            None => PathBuf::from(input),
        };
        ensure_input_exists(self.fs_port.as_ref(), &path).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn prepare_layout(
        &self,
        config: &AppConfig,
        input: &str,
        location: &OutputLocation,
        segment_seconds: Option<u32>,
    ) -> Result<HlsLayout, DomainError> {
        let target = resolve_output(
            self.fs_port.as_ref(),
            config,
            location,
            HLS_FOLDER,
            || PathUtils::timestamped(&PathUtils::source_stem(input)),
            None,
        )
        .await?;
        let root = target.as_dir();
        ensure_directory(self.fs_port.as_ref(), &root).await?;
        Ok(HlsLayout::new(root, &config.hls, segment_seconds))
    }
}
