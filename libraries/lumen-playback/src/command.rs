//! Typed UI commands
//!
//! The UI emits these instead of registering callbacks on the session;
//! [`PlaybackSession::dispatch`](crate::PlaybackSession::dispatch) consumes
//! them synchronously.

use serde::{Deserialize, Serialize};

/// Transport subset of [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportCommand {
    Play,
    Pause,
    Stop,
}

/// Input from the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Slider dragged to a position (0-100)
    Seek(u8),

    /// Volume slider moved (0-100)
    Volume(u8),

    /// Next playlist item
    Next,

    /// Previous playlist item
    Prev,

    /// Explicit selection, e.g. double-click on a playlist row
    Select(usize),

    /// Add or remove the current item from favorites
    ToggleFavorite,

    /// Enter or leave fullscreen
    ToggleFullscreen,

    /// Host window resized
    Resize {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
}
