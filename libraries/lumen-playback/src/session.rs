//! Playback session - core orchestration
//!
//! Owns the playlist, favorites, layout and session state; mediates every UI
//! command to the engine adapter and republishes results through the
//! observer. All state lives in one [`PlaybackSession`] value driven from a
//! single thread.

use crate::{
    backend::{MediaBackend, MediaBackendAdapter},
    command::{Command, TransportCommand},
    error::{PlaybackError, Result},
    events::{SessionObserver, UiUpdate},
    favorites::{FavoriteChange, FavoritesSet},
    layout::{FullscreenLayoutManager, SurfaceGeometry, WindowSize},
    playlist::PlaylistStore,
    poller::{PositionSnapshot, TimeSyncPoller},
    types::{MediaItem, PlaybackState, SessionConfig},
};
use std::path::PathBuf;

/// Label shown before the first position sync
const INITIAL_TIME_LABEL: &str = "00:00";

/// Playback session controller
///
/// State machine:
/// ```text
/// Idle --load--> Loaded --play--> Playing <--pause/play--> Paused
///                  ^                 |                        |
///                  |                 +---------stop-----------+--> Stopped
///                  +------- next / prev / select (reload) ------------+
/// ```
/// Every successful load auto-starts playback, so a load ends in `Playing`.
#[derive(Debug)]
pub struct PlaybackSession<B, O> {
    adapter: MediaBackendAdapter<B>,
    observer: O,
    playlist: PlaylistStore,
    favorites: FavoritesSet,
    layout: FullscreenLayoutManager,
    poller: TimeSyncPoller,
    state: PlaybackState,
    app_name: String,
    volume: u8,
}

impl<B: MediaBackend, O: SessionObserver> PlaybackSession<B, O> {
    /// Create a session with an empty playlist and no favorites
    ///
    /// Applies the initial volume to the engine and publishes the bare
    /// title and the initial time label.
    pub fn new(adapter: MediaBackendAdapter<B>, observer: O, config: SessionConfig) -> Self {
        let mut session = Self {
            adapter,
            observer,
            playlist: PlaylistStore::new(),
            favorites: FavoritesSet::new(),
            layout: FullscreenLayoutManager::new(config.window, config.toolbar_height),
            poller: TimeSyncPoller::default(),
            state: PlaybackState::Idle,
            app_name: config.app_name,
            volume: config.initial_volume.min(100),
        };

        session.adapter.set_volume(session.volume);
        session
            .observer
            .publish(UiUpdate::Title(session.app_name.clone()));
        session
            .observer
            .publish(UiUpdate::TimeLabel(INITIAL_TIME_LABEL.to_string()));
        session
    }

    /// Replace the default one-second poller
    pub fn with_poller(mut self, poller: TimeSyncPoller) -> Self {
        self.poller = poller;
        self
    }

    // ===== Discovery =====

    /// Append discovered media in discovery order
    ///
    /// If nothing has been selected yet, the first new item that loads is
    /// selected; items that fail are reported and skipped. Returns the
    /// number of items added.
    pub fn add_discovered<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.playlist.len();
        for path in paths {
            self.playlist.append(MediaItem::from_path(path));
        }
        let added = self.playlist.len() - before;
        tracing::info!(added, total = self.playlist.len(), "Added discovered media");

        if self.playlist.current_index().is_none() {
            self.load_first_playable(before);
        }

        added
    }

    /// Select and load the first item from `start` on that the engine accepts
    ///
    /// Leaves nothing selected if every item fails.
    fn load_first_playable(&mut self, start: usize) {
        for index in start..self.playlist.len() {
            if self.playlist.select_index(index).is_err() {
                break;
            }
            match self.load_or_restore(None) {
                Ok(()) => return,
                Err(err) => self.report(err),
            }
        }
    }

    // ===== Loading and navigation =====

    /// Load the current playlist item and start playing it
    ///
    /// No-op when nothing is selected. On failure the engine keeps its
    /// previous media and the session state is unchanged.
    pub fn load_current(&mut self) -> Result<()> {
        let Some(item) = self.playlist.current_item().cloned() else {
            tracing::debug!("Load skipped: no current item");
            return Ok(());
        };

        self.adapter
            .load_media(&item.path)
            .map_err(|source| PlaybackError::LoadFailure {
                path: item.path.clone(),
                source,
            })?;
        tracing::info!(path = %item.path.display(), "Loaded media");
        self.set_state(PlaybackState::Loaded);

        self.observer
            .publish(UiUpdate::Title(format!("{} - {}", self.app_name, item.display_name)));

        self.adapter.play();
        self.set_state(PlaybackState::Playing);

        if let Some(index) = self.playlist.current_index() {
            self.observer.publish(UiUpdate::Selection(index));
        }
        Ok(())
    }

    /// Advance to the next item and load it
    ///
    /// At the last item this is a no-op and playback is not restarted.
    pub fn next(&mut self) -> Result<()> {
        let previous = self.playlist.current_index();
        if !self.playlist.navigate_next() {
            return Ok(());
        }
        self.load_or_restore(previous)
    }

    /// Go back to the previous item and load it
    ///
    /// At the first item this is a no-op and playback is not restarted.
    pub fn prev(&mut self) -> Result<()> {
        let previous = self.playlist.current_index();
        if !self.playlist.navigate_prev() {
            return Ok(());
        }
        self.load_or_restore(previous)
    }

    /// Select an item explicitly and load it
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        let previous = self.playlist.current_index();
        self.playlist.select_index(index)?;
        self.load_or_restore(previous)
    }

    fn load_or_restore(&mut self, previous: Option<usize>) -> Result<()> {
        match self.load_current() {
            Ok(()) => Ok(()),
            Err(err) => {
                self.playlist.restore(previous);
                Err(err)
            }
        }
    }

    // ===== Transport =====

    /// Forward a transport command and update state optimistically
    ///
    /// The next poll tick reconciles any drift from the engine.
    pub fn handle_transport(&mut self, command: TransportCommand) {
        if !self.state.has_media() {
            tracing::debug!(?command, "Transport ignored: no current item");
            return;
        }

        match command {
            TransportCommand::Play => {
                self.adapter.play();
                self.set_state(PlaybackState::Playing);
            }
            TransportCommand::Pause => {
                self.adapter.pause();
                if self.state == PlaybackState::Playing {
                    self.set_state(PlaybackState::Paused);
                }
            }
            TransportCommand::Stop => {
                self.adapter.stop();
                if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
                    self.set_state(PlaybackState::Stopped);
                }
            }
        }
    }

    pub fn play(&mut self) {
        self.handle_transport(TransportCommand::Play);
    }

    pub fn pause(&mut self) {
        self.handle_transport(TransportCommand::Pause);
    }

    pub fn stop(&mut self) {
        self.handle_transport(TransportCommand::Stop);
    }

    /// Seek from a slider value in `0..=100`
    pub fn set_position(&mut self, slider_value: u8) {
        let fraction = f32::from(slider_value.min(100)) / 100.0;
        self.adapter.set_position(fraction);
    }

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume = level.min(100);
        self.adapter.set_volume(self.volume);
    }

    // ===== Favorites =====

    /// Add or remove the current item from favorites
    ///
    /// No-op when nothing is selected.
    pub fn toggle_favorite(&mut self) -> Option<FavoriteChange> {
        let Some(item) = self.playlist.current_item() else {
            tracing::debug!("Favorite toggle ignored: no current item");
            return None;
        };

        let change = self.favorites.toggle(item);
        match &change {
            FavoriteChange::Added(name) => {
                tracing::info!(%name, "Added to favorites");
                self.observer.publish(UiUpdate::FavoriteAdded(name.clone()));
                self.observer
                    .publish(UiUpdate::Notice(format!("'{name}' added to favorites")));
            }
            FavoriteChange::Removed(name) => {
                tracing::info!(%name, "Removed from favorites");
                self.observer.publish(UiUpdate::FavoriteRemoved(name.clone()));
                self.observer
                    .publish(UiUpdate::Notice(format!("'{name}' removed from favorites")));
            }
        }
        Some(change)
    }

    // ===== Layout =====

    /// Enter or leave fullscreen, returning the new flag
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.layout
            .toggle_fullscreen(&mut self.adapter, &mut self.observer)
    }

    /// Host window resized
    pub fn on_window_resize(&mut self, width: u32, height: u32) -> Option<SurfaceGeometry> {
        self.layout
            .on_window_resize(WindowSize { width, height }, &self.adapter, &mut self.observer)
    }

    // ===== Position sync =====

    /// One poll tick
    ///
    /// Adopts the engine state when it drifted from the optimistic view,
    /// then publishes slider value and time label if the engine is playing
    /// media of known length.
    pub fn on_tick(&mut self) -> Option<PositionSnapshot> {
        self.reconcile_state();

        let snapshot = self.poller.sample(&self.adapter)?;
        if let Some(value) = snapshot.slider_value() {
            self.observer.publish(UiUpdate::SliderValue(value));
        }
        self.observer.publish(UiUpdate::TimeLabel(snapshot.time_label()));
        Some(snapshot)
    }

    fn reconcile_state(&mut self) {
        if !self.state.has_media() {
            return;
        }

        let reported = self.adapter.state();
        let authoritative = matches!(
            reported,
            PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Stopped
        );
        if authoritative && reported != self.state {
            tracing::debug!(session = ?self.state, engine = ?reported, "Reconciling state");
            self.set_state(reported);
        }
    }

    // ===== Dispatch =====

    /// Apply one UI command
    ///
    /// Failures become a [`UiUpdate::Notice`]; nothing propagates further.
    pub fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::Play => {
                self.play();
                Ok(())
            }
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::Stop => {
                self.stop();
                Ok(())
            }
            Command::Seek(value) => {
                self.set_position(value);
                Ok(())
            }
            Command::Volume(level) => {
                self.set_volume(level);
                Ok(())
            }
            Command::Next => self.next(),
            Command::Prev => self.prev(),
            Command::Select(index) => self.select_index(index),
            Command::ToggleFavorite => {
                self.toggle_favorite();
                Ok(())
            }
            Command::ToggleFullscreen => {
                self.toggle_fullscreen();
                Ok(())
            }
            Command::Resize { width, height } => {
                self.on_window_resize(width, height);
                Ok(())
            }
        };

        if let Err(err) = result {
            self.report(err);
        }
    }

    fn report(&mut self, err: PlaybackError) {
        tracing::warn!("{}", err);
        self.observer.publish(UiUpdate::Notice(err.to_string()));
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.observer.publish(UiUpdate::StateChanged(state));
        }
    }

    // ===== Teardown =====

    /// Stop the engine and hand it back for release
    ///
    /// The caller must cancel its poll schedule before or with this call.
    pub fn shutdown(mut self) -> B {
        if self.state.has_media() {
            self.adapter.stop();
        }
        tracing::info!("Playback session closed");
        self.adapter.into_inner()
    }

    // ===== Accessors =====

    /// Session view of the playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.playlist.current_item()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_fullscreen(&self) -> bool {
        self.adapter.is_fullscreen()
    }

    /// Period at which the runtime should call [`Self::on_tick`]
    pub fn poll_period(&self) -> std::time::Duration {
        self.poller.period()
    }

    pub fn adapter(&self) -> &MediaBackendAdapter<B> {
        &self.adapter
    }

    pub fn backend(&self) -> &B {
        self.adapter.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.adapter.backend_mut()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
