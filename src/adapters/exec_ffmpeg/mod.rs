//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` command-line tool as a child process and reports its exit
//! status.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EngineCommand;
use crate::ports::*;

/// Lines of stderr kept in the execution report
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg subprocess adapter
pub struct FfmpegCliAdapter {
    binary: Option<PathBuf>,
    timeout: Duration,
}

impl FfmpegCliAdapter {
    /// Locate the engine: the configured path if it exists, otherwise `PATH`
    pub fn new(settings: &EngineSettings) -> Self {
        let binary = match &settings.ffmpeg_path {
            Some(path) if path.exists() => Some(path.clone()),
            Some(path) => {
                warn!(
                    "Configured ffmpeg path {} does not exist, falling back to PATH",
                    path.display()
                );
                which::which("ffmpeg").ok()
            }
            None => which::which("ffmpeg").ok(),
        };

        match &binary {
            Some(path) => debug!("Using media engine at {}", path.display()),
            None => warn!("ffmpeg not found; engine operations will fail"),
        }

        Self {
            binary,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Use an explicit binary, bypassing discovery
    pub fn with_binary(binary: PathBuf, timeout: Duration) -> Self {
        Self {
            binary: Some(binary),
            timeout,
        }
    }

    fn require_binary(&self) -> Result<&PathBuf, DomainError> {
        self.binary.as_ref().ok_or_else(|| {
            DomainError::EngineNotFound("ffmpeg not found; is it installed and in PATH?".to_string())
        })
    }
}

#[async_trait]
impl ExecutePort for FfmpegCliAdapter {
    async fn execute(&self, command: &EngineCommand) -> Result<ExecutionReport, DomainError> {
        let binary = self.require_binary()?;
        let rendered = command.to_command_string();
        info!(command = %rendered, "Running media engine");

        let started = Instant::now();
        let child = Command::new(binary)
            .args(command.as_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::EngineNotFound(format!("failed to spawn {}: {}", binary.display(), e))
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(DomainError::EngineFailed {
                    exit_code: None,
                    message: format!("I/O error waiting for engine: {}", e),
                })
            }
            // Dropping the wait future drops the child, which kills it
            Err(_elapsed) => {
                return Err(DomainError::EngineTimeout(format!(
                    "no exit after {:?}: {}",
                    self.timeout, rendered
                )))
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        let report = ExecutionReport {
            success: output.status.success(),
            exit_code: output.status.code(),
            command: rendered,
            stderr_tail: tail_lines(&stderr, STDERR_TAIL_LINES),
            elapsed: started.elapsed(),
        };

        if report.success {
            debug!(elapsed_ms = report.elapsed.as_millis() as u64, "Media engine finished");
        } else {
            warn!(
                exit_code = ?report.exit_code,
                stderr = %report.stderr_tail,
                "Media engine exited unsuccessfully"
            );
        }
        Ok(report)
    }

    async fn engine_available(&self) -> bool {
        self.binary.is_some()
    }
}

/// Last `count` non-empty lines of `text`
fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
