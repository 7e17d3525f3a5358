//! Transcode command assembly

use std::path::Path;

use crate::domain::model::{EncodingDefaults, TranscodeRequest};
use crate::domain::rules::FilterRules;
use crate::engine::EngineCommand;

/// Build the re-encode command for `request`.
///
/// Unset codec/preset/crf fields are taken from `defaults`. A target bitrate
/// switches rate control from CRF to capped VBR, with the buffer sized to the
/// max rate.
pub fn build(
    request: &TranscodeRequest,
    defaults: &EncodingDefaults,
    threads: usize,
    output: &Path,
) -> EngineCommand {
    let mut cmd = EngineCommand::new();
    cmd.input(&request.input_path.to_string_lossy());

    if let Some(scale) = request.scale {
        cmd.args(["-vf".to_string(), FilterRules::even_scale(scale)]);
    }

    let video_codec = request.video_codec.as_deref().unwrap_or(&defaults.video_codec);
    let audio_codec = request.audio_codec.as_deref().unwrap_or(&defaults.audio_codec);
    let preset = request.preset.as_deref().unwrap_or(&defaults.preset);

    cmd.args(["-c:v", video_codec]);
    cmd.args(["-preset", preset]);
    match &request.bitrate {
        Some(bitrate) => {
            let max = request.max_bitrate.as_deref().unwrap_or(bitrate);
            cmd.args(["-b:v", bitrate.as_str()]);
            cmd.args(["-maxrate", max]);
            cmd.args(["-bufsize", max]);
        }
        None => {
            let crf = request.crf.unwrap_or(defaults.crf);
            cmd.args(["-crf".to_string(), crf.to_string()]);
        }
    }
    cmd.args(["-c:a", audio_codec]);

    if request.output_format().is_iso_bmff() {
        cmd.args(["-movflags", "+faststart"]);
    }
    cmd.args(["-threads".to_string(), threads.to_string()]);
    cmd.args(request.extra_args.iter().cloned());

    cmd.output(output);
    cmd
}
