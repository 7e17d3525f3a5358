// Application layer - Use case interactors

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::NamingRules;
use crate::engine::EngineCommand;
use crate::ports::{ExecutePort, FsPort};
use crate::utils::path::PathUtils;

pub mod container;
pub mod convert_interactor;
pub mod hls_interactor;
pub mod playback_interactor;
pub mod transcode_interactor;
pub mod trim_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use convert_interactor::ConvertInteractor;
pub use hls_interactor::HlsInteractor;
pub use playback_interactor::PlaybackInteractor;
pub use transcode_interactor::TranscodeInteractor;
pub use trim_interactor::TrimInteractor;

/// Default output folders, one per operation
pub const TRIM_FOLDER: &str = "Trimmer";
pub const TRANSCODE_FOLDER: &str = "Transcoded";
pub const CONVERT_FOLDER: &str = "Converted";
pub const HLS_FOLDER: &str = "Hls";

/// Resolved destination: an existing directory plus a sanitized file stem
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OutputTarget {
    pub dir: PathBuf,
    pub stem: String,
}

impl OutputTarget {
    pub fn file(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, extension))
    }

    /// The stem as a directory under `dir` (HLS output)
    pub fn as_dir(&self) -> PathBuf {
        self.dir.join(&self.stem)
    }
}

/// Substitute unset location parts and make sure the folder exists.
///
/// A relative storage directory is resolved against the working directory.
/// A user-supplied file name may carry the output extension; it is dropped so
/// the extension is not doubled.
pub(crate) async fn resolve_output(
    fs: &dyn FsPort,
    config: &AppConfig,
    location: &OutputLocation,
    default_folder: &str,
    default_stem: impl FnOnce() -> String,
    extension: Option<&str>,
) -> DomainResult<OutputTarget> {
    let storage = location
        .storage_dir
        .as_deref()
        .unwrap_or(&config.output.storage_dir);
    let storage = fs.resolve_path(storage).await?;
    let folder = match &location.folder_name {
        Some(name) => NamingRules::sanitize_stem(name)?,
        None => default_folder.to_string(),
    };
    let dir = storage.join(folder);

    let stem = match &location.file_name {
        Some(name) => {
            let name = match extension {
                Some(ext) => PathUtils::strip_extension(name.trim(), ext),
                None => name.trim(),
            };
            NamingRules::sanitize_stem(name)?
        }
        None => NamingRules::sanitize_stem(&default_stem())?,
    };

    ensure_directory(fs, &dir).await?;
    Ok(OutputTarget { dir, stem })
}

pub(crate) async fn ensure_directory(fs: &dyn FsPort, dir: &Path) -> DomainResult<()> {
    if !fs.directory_exists(dir).await? {
        debug!(dir = %dir.display(), "Creating output directory");
        fs.create_directory(dir).await?;
    }
    Ok(())
}

pub(crate) async fn ensure_input_exists(fs: &dyn FsPort, path: &Path) -> DomainResult<()> {
    if !fs.file_exists(path).await? {
        return Err(DomainError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Run the engine once and turn a non-zero exit into `EngineFailed`
pub(crate) async fn run_engine(
    execute: &dyn ExecutePort,
    command: &EngineCommand,
) -> DomainResult<ExecutionReport> {
    let report = execute.execute(command).await?;
    if !report.success {
        let message = if report.stderr_tail.is_empty() {
            format!("engine exited unsuccessfully: {}", report.command)
        } else {
            report.stderr_tail.clone()
        };
        return Err(DomainError::EngineFailed {
            exit_code: report.exit_code,
            message,
        });
    }
    Ok(report)
}
