// Transcode interactor - Re-encodes a whole video

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::{ensure_input_exists, resolve_output, run_engine, TRANSCODE_FOLDER};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::VariantRules;
use crate::engine::transcode;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for the transcode use case
pub struct TranscodeInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
}

impl TranscodeInteractor {
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

    /// Re-encode the input, filling codec settings from configuration
    pub async fn transcode(&self, request: TranscodeRequest) -> Result<MediaOutput, DomainError> {
        info!(input = %request.input_path.display(), "Starting transcode");

        Self::validate(&request)?;
        ensure_input_exists(self.fs_port.as_ref(), &request.input_path).await?;
        let config = self.config_port.current().await;

        let format = request.output_format();
        let target = resolve_output(
            self.fs_port.as_ref(),
            &config,
            &request.location,
            TRANSCODE_FOLDER,
            || {
                PathUtils::timestamped(&format!(
                    "{}_transcoded",
                    PathUtils::input_stem(&request.input_path)
                ))
            },
            Some(format.extension()),
        )
        .await?;
        let output_path = target.file(format.extension());

        let command = transcode::build(&request, &config.encoding, config.engine.threads, &output_path);
        debug!(command = %command, "Transcode command assembled");
        let report = run_engine(self.execute_port.as_ref(), &command).await?;

        info!(output = %output_path.display(), "Transcode completed");
        Ok(MediaOutput {
            output_path,
            report,
        })
    }

    fn validate(request: &TranscodeRequest) -> Result<(), DomainError> {
        if let Some(scale) = request.scale {
            if !(scale > 0.0 && scale <= 1.0) {
                return Err(DomainError::BadArgs(format!(
                    "Scale must be in (0, 1], got {}",
                    scale
                )));
            }
        }
        if let Some(crf) = request.crf {
            if crf > 51 {
                return Err(DomainError::BadArgs(format!(
                    "CRF value cannot exceed 51, got {}",
                    crf
                )));
            }
        }
        for bitrate in [&request.bitrate, &request.max_bitrate].into_iter().flatten() {
            VariantRules::validate_bitrate(bitrate)?;
        }
        if request.max_bitrate.is_some() && request.bitrate.is_none() {
            return Err(DomainError::BadArgs(
                "A max bitrate requires a target bitrate".to_string(),
            ));
        }
        Ok(())
    }
}
