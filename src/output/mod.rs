//! Result rendering for the command line

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub mod writer;

pub use writer::OutputWriter;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

impl FromStr for OutputMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            "yaml" | "yml" => Ok(OutputMode::Yaml),
            other => Err(DomainError::BadArgs(format!(
                "Invalid output mode: {}. Valid modes: text, json, yaml",
                other
            ))),
        }
    }
}
