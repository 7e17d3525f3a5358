// Playback interactor - Video viewer controller over the player widget

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::app::ensure_input_exists;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RangeRules;
use crate::ports::*;

#[derive(Debug, Clone, PartialEq)]
enum Lifecycle {
    Idle,
    Loaded(PathBuf),
    Disposed,
}

/// Drives a [`PlayerPort`] through load / play / pause / seek / dispose.
///
/// Calls before a successful load fail with `PlayerNotLoaded`; once disposed
/// every call except `dispose` fails with `PlayerDisposed`.
pub struct PlaybackInteractor {
    player: Arc<dyn PlayerPort>,
    fs_port: Arc<dyn FsPort>,
    lifecycle: Mutex<Lifecycle>,
}

impl PlaybackInteractor {
    pub fn new(player: Arc<dyn PlayerPort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            player,
            fs_port,
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Open `path`, releasing whatever source was loaded before.
    ///
    /// A missing file leaves the current source loaded.
    pub async fn load_video(&self, path: &Path) -> Result<(), DomainError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if *lifecycle == Lifecycle::Disposed {
            return Err(DomainError::PlayerDisposed);
        }
        ensure_input_exists(self.fs_port.as_ref(), path).await?;

        let previous = match &*lifecycle {
            Lifecycle::Loaded(previous) => Some(previous.clone()),
            _ => None,
        };
        if let Some(previous) = previous {
            debug!(previous = %previous.display(), "Releasing previous source");
            self.player.dispose().await?;
            *lifecycle = Lifecycle::Idle;
        }

        self.player.load(path).await?;
        *lifecycle = Lifecycle::Loaded(path.to_path_buf());
        info!(source = %path.display(), "Video loaded");
        Ok(())
    }

    pub async fn play(&self) -> Result<(), DomainError> {
        let lifecycle = self.lifecycle.lock().await;
        Self::require_loaded(&lifecycle)?;
        self.player.play().await
    }

    pub async fn pause(&self) -> Result<(), DomainError> {
        let lifecycle = self.lifecycle.lock().await;
        Self::require_loaded(&lifecycle)?;
        self.player.pause().await
    }

    pub async fn seek_to(&self, position: Duration) -> Result<(), DomainError> {
        let lifecycle = self.lifecycle.lock().await;
        Self::require_loaded(&lifecycle)?;
        self.player.seek_to(position).await
    }

    /// Play only the `[start, end)` window.
    ///
    /// Pauses and returns `false` if already playing. Otherwise rewinds to
    /// `start` when the position is outside the window, starts playback and
    /// returns `true`.
    pub async fn toggle_trimmed_playback(
        &self,
        start: TimeSpec,
        end: TimeSpec,
    ) -> Result<bool, DomainError> {
        let lifecycle = self.lifecycle.lock().await;
        Self::require_loaded(&lifecycle)?;
        RangeRules::validate(&start, &end)?;

        if self.player.is_playing().await? {
            self.player.pause().await?;
            return Ok(false);
        }

        let position = self.player.position().await?;
        if position >= end.to_duration() || position < start.to_duration() {
            self.player.seek_to(start.to_duration()).await?;
        }
        self.player.play().await?;
        Ok(true)
    }

    /// Snapshot of the loaded source and player position
    pub async fn state(&self) -> Result<PlaybackState, DomainError> {
        let lifecycle = self.lifecycle.lock().await;
        let source = Self::require_loaded(&lifecycle)?.clone();
        Ok(PlaybackState {
            source: Some(source),
            playing: self.player.is_playing().await?,
            position: self.player.position().await?,
            duration: self.player.duration().await?,
        })
    }

    /// Release the player. Calling it again is a no-op.
    pub async fn dispose(&self) -> Result<(), DomainError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if let Lifecycle::Loaded(_) = &*lifecycle {
            self.player.dispose().await?;
        }
        if *lifecycle != Lifecycle::Disposed {
            debug!("Playback controller disposed");
        }
        *lifecycle = Lifecycle::Disposed;
        Ok(())
    }

    fn require_loaded(lifecycle: &Lifecycle) -> Result<&PathBuf, DomainError> {
        match lifecycle {
            Lifecycle::Loaded(source) => Ok(source),
            Lifecycle::Idle => Err(DomainError::PlayerNotLoaded),
            Lifecycle::Disposed => Err(DomainError::PlayerDisposed),
        }
    }
}
