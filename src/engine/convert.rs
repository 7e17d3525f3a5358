//! URL-to-file command assembly

use std::path::Path;

use crate::domain::model::ConvertRequest;
use crate::engine::EngineCommand;

/// Remux a network stream into a local file without re-encoding
pub fn build(request: &ConvertRequest, output: &Path) -> EngineCommand {
    let mut cmd = EngineCommand::new();
    cmd.input(request.source_url.trim());
    cmd.args(["-c", "copy"]);
    // ADTS AAC from HLS/TS sources must be converted for MP4-family muxers
    if request.output_format().is_iso_bmff() {
        cmd.args(["-bsf:a", "aac_adtstoasc"]);
    }
    cmd.output(output);
    cmd
}
