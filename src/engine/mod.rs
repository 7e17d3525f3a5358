//! Engine command assembly
//!
//! Every operation ends in exactly one ffmpeg invocation. The builders in this
//! module turn requests into argument vectors; running them is the job of an
//! [`ExecutePort`](crate::ports::ExecutePort) adapter.

use std::fmt;
use std::path::Path;

pub mod convert;
pub mod hls;
pub mod transcode;
pub mod trim;

/// Characters that force an argument to be quoted when rendered
const SHELL_SPECIAL: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', ';', '&', '|', '<', '>', '(', ')', '[', ']',
    '*', '?', '!', '#', '~', '{', '}',
];

/// Argument list for a single ffmpeg run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    args: Vec<String>,
}

impl EngineCommand {
    /// New command with the global flags every run uses
    pub fn new() -> Self {
        Self {
            args: vec!["-hide_banner".to_string(), "-y".to_string()],
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Append `-i <source>`
    pub fn input(&mut self, source: &str) -> &mut Self {
        self.args.push("-i".to_string());
        self.args.push(source.to_string());
        self
    }

    /// Append the output path; must come last
    pub fn output(&mut self, path: &Path) -> &mut Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    pub fn as_args(&self) -> &[String] {
        &self.args
    }

    /// Value following the first occurrence of `flag`
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Whether the exact flag appears anywhere
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Render as a single shell-quoted line, prefixed with the program name
    pub fn to_command_string(&self) -> String {
        std::iter::once("ffmpeg".to_string())
            .chain(self.args.iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_string())
    }
}

fn shell_quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(SHELL_SPECIAL) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn new_command_carries_global_flags() {
        let cmd = EngineCommand::new();
        assert_eq!(cmd.as_args(), &["-hide_banner", "-y"]);
    }

    #[test]
    fn builder_appends_in_order() {
        let mut cmd = EngineCommand::new();
        cmd.input("in.mp4")
            .args(["-c", "copy"])
            .output(&PathBuf::from("out.mp4"));
        assert_eq!(
            cmd.as_args(),
            &["-hide_banner", "-y", "-i", "in.mp4", "-c", "copy", "out.mp4"]
        );
        assert_eq!(cmd.value_of("-c"), Some("copy"));
        assert_eq!(cmd.value_of("-vf"), None);
        assert!(cmd.has_flag("-y"));
    }

    #[test]
    fn command_string_quotes_special_arguments() {
        let mut cmd = EngineCommand::new();
        cmd.input("/videos/my holiday.mp4")
            .args(["-vf", "split[s0][s1]"])
            .arg("it's.mp4");
        assert_eq!(
            cmd.to_command_string(),
            r"ffmpeg -hide_banner -y -i '/videos/my holiday.mp4' -vf 'split[s0][s1]' 'it'\''s.mp4'"
        );
    }

    #[test]
    fn empty_argument_is_quoted() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("plain"), "plain");
    }
}
