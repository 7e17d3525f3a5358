// Adapters - External system implementations

pub mod exec_dry_run;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod toml_config;

// Re-export adapters
pub use exec_dry_run::DryRunAdapter;
pub use exec_ffmpeg::FfmpegCliAdapter;
pub use fs_local::LocalFsAdapter;
pub use toml_config::TomlConfigAdapter;
