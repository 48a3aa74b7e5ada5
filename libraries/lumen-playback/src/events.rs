//! UI updates
//!
//! Everything the session tells the UI flows through [`SessionObserver`] as
//! [`UiUpdate`] values, in the order the session produced them:
//! - State changes (play/pause/stop, loads)
//! - Position sync (slider value and time label, once per poll tick)
//! - Title and selection highlight after a load
//! - Favorites list changes
//! - Window mode and video surface geometry
//! - Notices (load failures, favorites confirmations, rejected selections)

use crate::layout::SurfaceGeometry;
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Update pushed from the session to the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiUpdate {
    /// Session playback state changed
    StateChanged(PlaybackState),

    /// Position label, `MM:SS / MM:SS`
    TimeLabel(String),

    /// Position slider value (0-100)
    SliderValue(u8),

    /// Window title, `"<app name> - <display name>"`
    Title(String),

    /// Playlist row to highlight as current
    Selection(usize),

    /// Append to the favorites list
    FavoriteAdded(String),

    /// Remove from the favorites list
    FavoriteRemoved(String),

    /// Host window presentation changed
    WindowMode {
        /// Whether the window is now fullscreen
        fullscreen: bool,
        /// Whether the side panel (playlist/favorites tabs) is shown
        side_panel_visible: bool,
    },

    /// New bounds for the video surface
    SurfaceGeometry(SurfaceGeometry),

    /// Message for the user
    Notice(String),
}

/// Receiver of session output
pub trait SessionObserver {
    /// Deliver one update
    fn publish(&mut self, update: UiUpdate);
}

impl SessionObserver for Vec<UiUpdate> {
    fn publish(&mut self, update: UiUpdate) {
        self.push(update);
    }
}

impl<O: SessionObserver + ?Sized> SessionObserver for &mut O {
    fn publish(&mut self, update: UiUpdate) {
        (**self).publish(update);
    }
}

impl<O: SessionObserver + ?Sized> SessionObserver for Box<O> {
    fn publish(&mut self, update: UiUpdate) {
        (**self).publish(update);
    }
}
