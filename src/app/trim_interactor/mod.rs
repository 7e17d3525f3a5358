// Trim interactor - Cuts a time range out of a local video

use std::sync::Arc;

use tracing::info;

use crate::app::{ensure_input_exists, resolve_output, run_engine, TRIM_FOLDER};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RangeRules;
use crate::engine::trim;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for the trim use case
pub struct TrimInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports
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

    /// Write `[start, end)` of the input to a new file.
    ///
    /// Stream copy unless the request asks for re-encoding, a GIF or custom
    /// engine arguments.
    pub async fn trim(&self, request: TrimRequest) -> Result<MediaOutput, DomainError> {
        info!(
            input = %request.input_path.display(),
            start = %request.start,
            end = %request.end,
            "Starting trim"
        );

        Self::validate(&request)?;
        ensure_input_exists(self.fs_port.as_ref(), &request.input_path).await?;
        let config = self.config_port.current().await;

        let format = request.output_format();
        let target = resolve_output(
            self.fs_port.as_ref(),
            &config,
            &request.location,
            TRIM_FOLDER,
            || PathUtils::timestamped(&format!("{}_trimmed", PathUtils::input_stem(&request.input_path))),
            Some(format.extension()),
        )
        .await?;
        let output_path = target.file(format.extension());

        let command = trim::build(&request, &config.encoding, &output_path);
        let report = run_engine(self.execute_port.as_ref(), &command).await?;

        info!(output = %output_path.display(), "Trim completed");
        Ok(MediaOutput {
            output_path,
            report,
        })
    }

    /// Range and GIF settings, checked before any filesystem access
    fn validate(request: &TrimRequest) -> Result<(), DomainError> {
        RangeRules::validate(&request.start, &request.end)?;
        let uses_gif_filter = request.custom_args.is_none() && request.output_format().is_gif();
        if uses_gif_filter && (request.gif.fps == 0 || request.gif.scale == 0) {
            return Err(DomainError::BadArgs(format!(
                "GIF frame rate and width must be positive, got {} fps at {}px",
                request.gif.fps, request.gif.scale
            )));
        }
        Ok(())
    }
}
