//! Core types for playback session control

use crate::layout::WindowSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One discovered media file
///
/// Immutable once added to a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Location of the file
    pub path: PathBuf,

    /// Final path segment, shown in lists and the window title
    pub display_name: String,
}

impl MediaItem {
    /// Build an item, deriving the display name from the final path segment
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = display_name_of(&path);
        Self { path, display_name }
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Playback state as seen by the session
///
/// This mirrors the backend's state but is not identical to it: `Idle` and
/// `Loaded` only exist on the session side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded yet
    Idle,

    /// Media bound to the player, not yet started
    Loaded,

    /// Currently playing
    Playing,

    /// Paused mid-media
    Paused,

    /// Stopped (explicitly or at end of media)
    Stopped,
}

impl PlaybackState {
    /// Whether media is bound to the player in this state
    pub fn has_media(self) -> bool {
        !matches!(self, PlaybackState::Idle)
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Application name used as the window title prefix (default: "Lumen")
    pub app_name: String,

    /// Initial volume (0-100, default: 50)
    pub initial_volume: u8,

    /// Height of the transport toolbar, subtracted from the fullscreen surface
    pub toolbar_height: u32,

    /// Host window size at session start
    pub window: WindowSize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_name: "Lumen".to_string(),
            initial_volume: 50,
            toolbar_height: 40,
            window: WindowSize {
                width: 1000,
                height: 600,
            },
        }
    }
}
