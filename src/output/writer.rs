//! Renders operation results as text, JSON or YAML

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::model::{ExecutionReport, HlsResult, MediaOutput};
use crate::output::OutputMode;
use crate::utils::time::format_duration;

/// Result printer bound to one output mode
pub struct OutputWriter {
    mode: OutputMode,
}

impl OutputWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Render the result of a single-file operation; `title` heads the text form
    pub fn render_media(&self, title: &str, output: &MediaOutput) -> Result<String, DomainError> {
        self.render(output, || {
            let mut text = heading(title);
            let _ = writeln!(text, "Output: {}", output.output_path.display());
            write_report(&mut text, &output.report);
            text
        })
    }

    pub fn render_hls(&self, result: &HlsResult) -> Result<String, DomainError> {
        self.render(result, || {
            let mut text = heading("HLS Result");
            if result.has_variants {
                let _ = writeln!(text, "Master playlist: {}", result.master_playlist.display());
                let _ = writeln!(text, "Variants: {}", result.variants.len());
                for (i, variant) in result.variants.iter().enumerate() {
                    let _ = writeln!(
                        text,
                        "  v{}: {} ({} segments)",
                        i,
                        variant.master_playlist.display(),
                        variant.segments.len()
                    );
                }
            } else {
                let _ = writeln!(text, "Playlist: {}", result.master_playlist.display());
            }
            let _ = writeln!(text, "Segments: {}", result.total_segments());
            text
        })
    }

    /// Write `rendered` followed by a newline
    pub fn emit(&self, out: &mut impl Write, rendered: &str) -> Result<(), DomainError> {
        writeln!(out, "{}", rendered.trim_end())
            .map_err(|e| DomainError::FsFail(format!("Failed to write output: {}", e)))
    }

    fn render<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<String, DomainError> {
        match self.mode {
            OutputMode::Text => Ok(text()),
            OutputMode::Json => serde_json::to_string_pretty(value).map_err(|e| {
                DomainError::BadArgs(format!("Failed to serialize result to JSON: {}", e))
            }),
            OutputMode::Yaml => serde_yaml::to_string(value).map_err(|e| {
                DomainError::BadArgs(format!("Failed to serialize result to YAML: {}", e))
            }),
        }
    }
}

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

fn write_report(text: &mut String, report: &ExecutionReport) {
    let _ = writeln!(text, "Command: {}", report.command);
    let _ = writeln!(text, "Elapsed: {}", format_duration(report.elapsed));
    if let Some(code) = report.exit_code {
        let _ = writeln!(text, "Exit code: {}", code);
    }
}
