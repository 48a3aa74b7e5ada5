//! Lumen Player - Playback Session Control
//!
//! Platform-agnostic core of the Lumen video player.
//!
//! This crate provides:
//! - Engine adapter over an opaque playback backend (load, transport, seek,
//!   volume, fullscreen, state polling)
//! - Ordered playlist with a bounded current-item cursor
//! - Favorites toggle set
//! - Session state machine mediating UI commands to the engine
//! - Periodic position sync (slider value and `MM:SS / MM:SS` label)
//! - Video surface geometry on fullscreen and resize
//!
//! # Architecture
//!
//! `lumen-playback` has no UI toolkit and no async runtime:
//! - The engine is reached through the [`MediaBackend`] trait
//! - The UI receives [`UiUpdate`] values through a [`SessionObserver`]
//! - The UI sends typed [`Command`]s to [`PlaybackSession::dispatch`]
//! - The host runtime schedules [`PlaybackSession::on_tick`] every
//!   [`PlaybackSession::poll_period`]
//!
//! All session state is owned by one [`PlaybackSession`] and touched from a
//! single thread, so no locking is involved.
//!
//! # Example
//!
//! ```rust,no_run
//! use lumen_playback::{
//!     BackendError, Command, MediaBackend, MediaBackendAdapter, PlaybackSession,
//!     PlaybackState, SessionConfig, SurfaceHandle, UiUpdate,
//! };
//! use std::path::Path;
//!
//! struct MyEngine;
//!
//! impl MediaBackend for MyEngine {
//!     fn set_xwindow(&mut self, _window: u64) -> Result<(), BackendError> { Ok(()) }
//!     fn set_media(&mut self, _path: &Path) -> Result<(), BackendError> { Ok(()) }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn set_position(&mut self, _fraction: f32) {}
//!     fn set_volume(&mut self, _level: u8) {}
//!     fn state(&self) -> PlaybackState { PlaybackState::Playing }
//!     fn time_ms(&self) -> i64 { 0 }
//!     fn length_ms(&self) -> i64 { 0 }
//!     fn set_fullscreen(&mut self, _fullscreen: bool) {}
//!     fn is_fullscreen(&self) -> bool { false }
//! }
//!
//! let adapter = MediaBackendAdapter::new(MyEngine, SurfaceHandle(0x0400_0007)).unwrap();
//! let mut session = PlaybackSession::new(adapter, Vec::<UiUpdate>::new(), SessionConfig::default());
//!
//! session.add_discovered(["/home/me/Videos/trip.mkv"]);
//! session.dispatch(Command::Seek(50));
//! session.dispatch(Command::ToggleFavorite);
//! session.on_tick();
//! ```

mod backend;
mod command;
mod error;
mod events;
mod favorites;
mod layout;
mod playlist;
mod poller;
mod session;
pub mod types;

// Public exports
pub use backend::{MediaBackend, MediaBackendAdapter, SurfaceBinding, SurfaceHandle};
pub use command::{Command, TransportCommand};
pub use error::{BackendError, PlaybackError, Result};
pub use events::{SessionObserver, UiUpdate};
pub use favorites::{FavoriteChange, FavoritesSet};
pub use layout::{FullscreenLayoutManager, SurfaceGeometry, WindowSize};
pub use playlist::PlaylistStore;
pub use poller::{format_clock, PositionSnapshot, TimeSyncPoller, DEFAULT_POLL_PERIOD};
pub use session::PlaybackSession;
pub use types::{MediaItem, PlaybackState, SessionConfig};
