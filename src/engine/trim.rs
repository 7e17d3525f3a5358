//! Trim command assembly

use std::path::Path;

use crate::domain::model::{EncodingDefaults, GifOptions, TrimRequest};
use crate::engine::EngineCommand;

/// Build the ffmpeg command that cuts `request` into `output`.
///
/// Seeks on the input (`-ss` before `-i`), so stream-copy trims start on the
/// nearest preceding keyframe. Codec section precedence: caller-supplied
/// arguments, then the GIF palette graph, then a re-encode with the
/// configured codecs, then stream copy.
pub fn build(request: &TrimRequest, defaults: &EncodingDefaults, output: &Path) -> EngineCommand {
    let mut cmd = EngineCommand::new();
    cmd.args(["-ss".to_string(), request.start.to_engine_timestamp()]);
    cmd.input(&request.input_path.to_string_lossy());
    cmd.args(["-t".to_string(), request.duration().to_engine_timestamp()]);

    let format = request.output_format();
    if let Some(custom) = &request.custom_args {
        cmd.args(custom.iter().cloned());
    } else if format.is_gif() {
        cmd.args(["-vf".to_string(), gif_filter(&request.gif)]);
        cmd.args(["-loop", "0"]);
    } else if request.apply_encoding {
        cmd.args(["-c:v", defaults.video_codec.as_str()]);
        cmd.args(["-preset", defaults.preset.as_str()]);
        cmd.args(["-crf".to_string(), defaults.crf.to_string()]);
        cmd.args(["-c:a", defaults.audio_codec.as_str()]);
    } else {
        cmd.args(["-c", "copy"]);
        cmd.args(["-avoid_negative_ts", "make_zero"]);
    }

    cmd.output(output);
    cmd
}

/// Two-pass palette filter graph for good-looking GIFs
fn gif_filter(gif: &GifOptions) -> String {
    format!(
        "fps={},scale={}:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse",
        gif.fps, gif.scale
    )
}
