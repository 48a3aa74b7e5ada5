//! Software-clock playback backend
//!
//! Stands in for a real engine in headless runs: media is validated at load
//! time but never decoded, and the position advances with the runtime clock
//! while playing. Uses [`tokio::time::Instant`] so paused-time tests control
//! it.

use lumen_discovery::is_video_file;
use lumen_playback::{BackendError, MediaBackend, PlaybackState};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Engine that plays every file for a fixed length of time
#[derive(Debug)]
pub struct SimulatedBackend {
    length_ms: i64,
    media: Option<PathBuf>,
    state: PlaybackState,
    /// Position accumulated before the current run
    played_ms: i64,
    /// Start of the current run, if playing
    running_since: Option<Instant>,
    volume: u8,
    fullscreen: bool,
    surface: Option<u64>,
}

impl SimulatedBackend {
    /// Create a backend reporting `length` for every medium
    ///
    /// A zero length is reported as unknown.
    pub fn new(length: Duration) -> Self {
        Self {
            length_ms: i64::try_from(length.as_millis()).unwrap_or(i64::MAX),
            media: None,
            state: PlaybackState::Idle,
            played_ms: 0,
            running_since: None,
            volume: 0,
            fullscreen: false,
            surface: None,
        }
    }

    pub fn media(&self) -> Option<&Path> {
        self.media.as_deref()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn surface(&self) -> Option<u64> {
        self.surface
    }

    fn attach(&mut self, surface: u64) -> Result<(), BackendError> {
        self.surface = Some(surface);
        Ok(())
    }

    fn position_ms(&self) -> i64 {
        let running = self.running_since.map_or(0, |since| {
            i64::try_from(since.elapsed().as_millis()).unwrap_or(i64::MAX)
        });
        let position = self.played_ms.saturating_add(running);
        if self.length_ms > 0 {
            position.min(self.length_ms)
        } else {
            position
        }
    }

    fn reached_end(&self) -> bool {
        self.length_ms > 0 && self.position_ms() >= self.length_ms
    }

    /// Freeze the clock at the current position
    fn halt(&mut self) {
        self.played_ms = self.position_ms();
        self.running_since = None;
    }
}

impl MediaBackend for SimulatedBackend {
    fn set_xwindow(&mut self, window: u64) -> Result<(), BackendError> {
        self.attach(window)
    }

    fn set_hwnd(&mut self, hwnd: u64) -> Result<(), BackendError> {
        self.attach(hwnd)
    }

    fn set_nsobject(&mut self, view: u64) -> Result<(), BackendError> {
        self.attach(view)
    }

    fn set_media(&mut self, path: &Path) -> Result<(), BackendError> {
        if !is_video_file(path) {
            return Err(BackendError::UnsupportedFormat(path.to_path_buf()));
        }
        if let Err(e) = File::open(path) {
            tracing::debug!("Cannot open {}: {}", path.display(), e);
            return Err(BackendError::Unreadable(path.to_path_buf()));
        }

        self.media = Some(path.to_path_buf());
        self.state = PlaybackState::Loaded;
        self.played_ms = 0;
        self.running_since = None;
        Ok(())
    }

    fn play(&mut self) {
        if self.media.is_none() || (self.running_since.is_some() && !self.reached_end()) {
            return;
        }
        if self.reached_end() {
            self.played_ms = 0;
        }
        self.running_since = Some(Instant::now());
        self.state = PlaybackState::Playing;
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing && !self.reached_end() {
            self.halt();
            self.state = PlaybackState::Paused;
        }
    }

    fn stop(&mut self) {
        if self.media.is_none() {
            return;
        }
        self.played_ms = 0;
        self.running_since = None;
        self.state = PlaybackState::Stopped;
    }

    fn set_position(&mut self, fraction: f32) {
        if self.media.is_none() || self.length_ms <= 0 {
            return;
        }
        let target = (f64::from(fraction.clamp(0.0, 1.0)) * self.length_ms as f64) as i64;
        self.played_ms = target;
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = level.min(100);
    }

    fn state(&self) -> PlaybackState {
        if self.state == PlaybackState::Playing && self.reached_end() {
            PlaybackState::Stopped
        } else {
            self.state
        }
    }

    fn time_ms(&self) -> i64 {
        if self.media.is_none() {
            return 0;
        }
        self.position_ms()
    }

    fn length_ms(&self) -> i64 {
        if self.media.is_none() {
            return 0;
        }
        self.length_ms
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loaded(length_secs: u64) -> (TempDir, SimulatedBackend) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("movie.mp4");
        fs::write(&path, b"not really a video").unwrap();

        let mut backend = SimulatedBackend::new(Duration::from_secs(length_secs));
        backend.set_media(&path).unwrap();
        (temp, backend)
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, b"text").unwrap();

        let mut backend = SimulatedBackend::new(Duration::from_secs(60));
        assert_eq!(
            backend.set_media(&path),
            Err(BackendError::UnsupportedFormat(path.clone()))
        );
        assert!(backend.media().is_none());
    }

    #[test]
    fn test_rejects_unreadable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.mkv");

        let mut backend = SimulatedBackend::new(Duration::from_secs(60));
        assert_eq!(
            backend.set_media(&path),
            Err(BackendError::Unreadable(path.clone()))
        );
    }

    #[test]
    fn test_nothing_loaded_reports_zero() {
        let mut backend = SimulatedBackend::new(Duration::from_secs(60));
        backend.play();
        assert_eq!(backend.state(), PlaybackState::Idle);
        assert_eq!(backend.time_ms(), 0);
        assert_eq!(backend.length_ms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_advances_only_while_playing() {
        let (_temp, mut backend) = loaded(260);
        assert_eq!(backend.state(), PlaybackState::Loaded);

        backend.play();
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(backend.time_ms(), 10_000);

        backend.pause();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(backend.state(), PlaybackState::Paused);
        assert_eq!(backend.time_ms(), 10_000);

        backend.play();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(backend.time_ms(), 12_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_moves_running_clock() {
        let (_temp, mut backend) = loaded(200);
        backend.play();
        backend.set_position(0.5);
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(backend.time_ms(), 103_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_stopped_at_end_of_media() {
        let (_temp, mut backend) = loaded(3);
        backend.play();
        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(backend.state(), PlaybackState::Stopped);
        assert_eq!(backend.time_ms(), 3_000);

        // Playing again restarts from the top
        backend.play();
        assert_eq!(backend.state(), PlaybackState::Playing);
        assert_eq!(backend.time_ms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_rewinds() {
        let (_temp, mut backend) = loaded(60);
        backend.play();
        tokio::time::advance(Duration::from_secs(7)).await;
        backend.stop();

        assert_eq!(backend.state(), PlaybackState::Stopped);
        assert_eq!(backend.time_ms(), 0);
    }

    #[test]
    fn test_unknown_length_ignores_seek() {
        let (_temp, mut backend) = loaded(0);
        backend.set_position(0.5);
        assert_eq!(backend.length_ms(), 0);
        assert_eq!(backend.time_ms(), 0);
    }
}
