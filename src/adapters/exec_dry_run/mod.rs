//! Dry-run execution adapter
//!
//! Records each command instead of running it. Used by `--dry-run` to show what
//! would be executed.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EngineCommand;
use crate::ports::*;

/// Records commands and reports success without spawning anything
#[derive(Default)]
pub struct DryRunAdapter {
    executed: Mutex<Vec<String>>,
}

impl DryRunAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered command lines seen so far
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExecutePort for DryRunAdapter {
    async fn execute(&self, command: &EngineCommand) -> Result<ExecutionReport, DomainError> {
        let rendered = command.to_command_string();
        info!(command = %rendered, "Dry run, engine not invoked");
        self.executed
            .lock()
            .map_err(|_| DomainError::EngineFailed {
                exit_code: None,
                message: "dry-run command log poisoned".to_string(),
            })?
            .push(rendered.clone());

        Ok(ExecutionReport {
            success: true,
            exit_code: Some(0),
            command: rendered,
            stderr_tail: String::new(),
            elapsed: Duration::ZERO,
        })
    }

    async fn engine_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_without_running() {
        let adapter = DryRunAdapter::new();
        let mut command = EngineCommand::new();
        command.input("in.mp4");
        let report = adapter.execute(&command).await.unwrap();
        assert!(report.success);
        assert_eq!(report.exit_code, Some(0));
        assert_eq!(adapter.executed(), vec!["ffmpeg -hide_banner -y -i in.mp4".to_string()]);
    }
}
