// Convert interactor - Saves a network stream to a local file

use std::sync::Arc;

use tracing::info;

use crate::app::{resolve_output, run_engine, CONVERT_FOLDER};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::SourceRules;
use crate::engine::convert;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for URL-to-file conversion
pub struct ConvertInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
}

impl ConvertInteractor {
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

    pub async fn convert_url(&self, request: ConvertRequest) -> Result<MediaOutput, DomainError> {
        let url = SourceRules::validate_url(&request.source_url)?;
        info!(url = %url, "Starting URL conversion");

        let config = self.config_port.current().await;
        let format = request.output_format();
        let target = resolve_output(
            self.fs_port.as_ref(),
            &config,
            &request.location,
            CONVERT_FOLDER,
            || PathUtils::timestamped(&PathUtils::url_stem(&url)),
            Some(format.extension()),
        )
        .await?;
        let output_path = target.file(format.extension());

        let command = convert::build(&request, &output_path);
        let report = run_engine(self.execute_port.as_ref(), &command).await?;

        info!(output = %output_path.display(), "URL conversion completed");
        Ok(MediaOutput {
            output_path,
            report,
        })
    }
}
