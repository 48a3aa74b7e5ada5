//! Playback engine abstraction
//!
//! The native engine (decode, render, its own worker threads) stays opaque.
//! [`MediaBackend`] is the capability set the session needs from it, and
//! [`MediaBackendAdapter`] enforces the calling contract on top: no transport
//! without media, clamped seek and volume, guarded length.

use crate::error::BackendError;
use crate::types::PlaybackState;
use std::path::Path;

/// Raw native handle of the video output surface (X11 window id, HWND or
/// NSView pointer, depending on platform)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Opaque playback engine
///
/// All methods are synchronous getters/setters called from the session
/// thread. Implementations may run their own decode threads internally.
pub trait MediaBackend {
    /// Attach output to an X11 window
    fn set_xwindow(&mut self, _window: u64) -> Result<(), BackendError> {
        Err(BackendError::Engine(
            "X11 surfaces are not supported by this engine".into(),
        ))
    }

    /// Attach output to a Win32 window handle
    fn set_hwnd(&mut self, _hwnd: u64) -> Result<(), BackendError> {
        Err(BackendError::Engine(
            "Win32 surfaces are not supported by this engine".into(),
        ))
    }

    /// Attach output to an AppKit view
    fn set_nsobject(&mut self, _view: u64) -> Result<(), BackendError> {
        Err(BackendError::Engine(
            "AppKit surfaces are not supported by this engine".into(),
        ))
    }

    /// Bind a new media resource, replacing the previous one
    fn set_media(&mut self, path: &Path) -> Result<(), BackendError>;

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Stop playback
    fn stop(&mut self);

    /// Seek to a fraction of the media length, in `[0.0, 1.0]`
    fn set_position(&mut self, fraction: f32);

    /// Set output volume (0-100)
    fn set_volume(&mut self, level: u8);

    /// Engine-reported state
    fn state(&self) -> PlaybackState;

    /// Current position in milliseconds
    fn time_ms(&self) -> i64;

    /// Media length in milliseconds, non-positive while unknown
    fn length_ms(&self) -> i64;

    /// Set the engine-level fullscreen flag
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Engine-level fullscreen flag
    fn is_fullscreen(&self) -> bool;
}

/// How the engine is attached to the output surface
///
/// Chosen once when the adapter is built, never re-checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceBinding {
    /// Linux and other X11 desktops
    X11Window,

    /// Windows
    Win32Handle,

    /// macOS
    AppKitView,
}

impl SurfaceBinding {
    /// Binding strategy for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "windows") {
            SurfaceBinding::Win32Handle
        } else if cfg!(target_os = "macos") {
            SurfaceBinding::AppKitView
        } else {
            SurfaceBinding::X11Window
        }
    }

    /// Attach `backend` output to `surface`
    pub fn attach<B: MediaBackend + ?Sized>(
        self,
        backend: &mut B,
        surface: SurfaceHandle,
    ) -> Result<(), BackendError> {
        match self {
            SurfaceBinding::X11Window => backend.set_xwindow(surface.0),
            SurfaceBinding::Win32Handle => backend.set_hwnd(surface.0),
            SurfaceBinding::AppKitView => backend.set_nsobject(surface.0),
        }
    }
}

/// Contract-enforcing wrapper around one engine bound to one surface
#[derive(Debug)]
pub struct MediaBackendAdapter<B> {
    backend: B,
    binding: SurfaceBinding,
    media_loaded: bool,
}

impl<B: MediaBackend> MediaBackendAdapter<B> {
    /// Bind `backend` to `surface` using the current platform's strategy
    pub fn new(backend: B, surface: SurfaceHandle) -> Result<Self, BackendError> {
        Self::with_binding(backend, surface, SurfaceBinding::for_current_platform())
    }

    /// Bind `backend` to `surface` with an explicit strategy
    pub fn with_binding(
        mut backend: B,
        surface: SurfaceHandle,
        binding: SurfaceBinding,
    ) -> Result<Self, BackendError> {
        binding.attach(&mut backend, surface)?;
        tracing::debug!(?binding, ?surface, "Bound playback surface");

        Ok(Self {
            backend,
            binding,
            media_loaded: false,
        })
    }

    /// Load media, replacing anything previously loaded
    ///
    /// On failure the previously loaded media (if any) stays current.
    pub fn load_media(&mut self, path: &Path) -> Result<(), BackendError> {
        self.backend.set_media(path)?;
        self.media_loaded = true;
        Ok(())
    }

    /// Whether a load has succeeded at least once
    pub fn has_media(&self) -> bool {
        self.media_loaded
    }

    pub fn play(&mut self) {
        if self.media_loaded {
            self.backend.play();
        }
    }

    pub fn pause(&mut self) {
        if self.media_loaded {
            self.backend.pause();
        }
    }

    pub fn stop(&mut self) {
        if self.media_loaded {
            self.backend.stop();
        }
    }

    /// Seek to `fraction` of the media length
    ///
    /// Dropped when nothing is loaded or the length is not known yet.
    pub fn set_position(&mut self, fraction: f32) {
        if !self.media_loaded {
            tracing::debug!("Seek ignored: no media loaded");
            return;
        }
        if self.backend.length_ms() <= 0 {
            tracing::debug!("Seek ignored: media length unknown");
            return;
        }
        self.backend.set_position(fraction.clamp(0.0, 1.0));
    }

    pub fn set_volume(&mut self, level: u8) {
        self.backend.set_volume(level.min(100));
    }

    /// Engine state, or `Idle` when nothing has been loaded
    pub fn state(&self) -> PlaybackState {
        if self.media_loaded {
            self.backend.state()
        } else {
            PlaybackState::Idle
        }
    }

    pub fn time_ms(&self) -> i64 {
        self.backend.time_ms()
    }

    /// May be non-positive while metadata is still being parsed
    pub fn length_ms(&self) -> i64 {
        self.backend.length_ms()
    }

    /// Flip the engine fullscreen flag and return the new value
    pub fn toggle_fullscreen(&mut self) -> bool {
        let fullscreen = !self.backend.is_fullscreen();
        self.backend.set_fullscreen(fullscreen);
        fullscreen
    }

    pub fn is_fullscreen(&self) -> bool {
        self.backend.is_fullscreen()
    }

    /// Surface binding chosen at construction
    pub fn binding(&self) -> SurfaceBinding {
        self.binding
    }

    /// Shared access to the wrapped engine
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exclusive access to the wrapped engine
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the wrapped engine
    pub fn into_inner(self) -> B {
        self.backend
    }
}

/// Minimal engine for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct DummyBackend {
    pub media: Option<std::path::PathBuf>,
    pub state: Option<PlaybackState>,
    pub seeks: Vec<f32>,
    pub volume: u8,
    pub time_ms: i64,
    pub length_ms: i64,
    pub fullscreen: bool,
    pub attached: Option<u64>,
}

#[cfg(test)]
impl MediaBackend for DummyBackend {
    fn set_xwindow(&mut self, window: u64) -> Result<(), BackendError> {
        self.attached = Some(window);
        Ok(())
    }

    fn set_hwnd(&mut self, hwnd: u64) -> Result<(), BackendError> {
        self.attached = Some(hwnd);
        Ok(())
    }

    fn set_nsobject(&mut self, view: u64) -> Result<(), BackendError> {
        self.attached = Some(view);
        Ok(())
    }

    fn set_media(&mut self, path: &Path) -> Result<(), BackendError> {
        if path.extension().is_some_and(|ext| ext == "bad") {
            return Err(BackendError::UnsupportedFormat(path.to_path_buf()));
        }
        self.media = Some(path.to_path_buf());
        self.state = Some(PlaybackState::Stopped);
        Ok(())
    }

    fn play(&mut self) {
        self.state = Some(PlaybackState::Playing);
    }

    fn pause(&mut self) {
        self.state = Some(PlaybackState::Paused);
    }

    fn stop(&mut self) {
        self.state = Some(PlaybackState::Stopped);
    }

    fn set_position(&mut self, fraction: f32) {
        self.seeks.push(fraction);
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = level;
    }

    fn state(&self) -> PlaybackState {
        self.state.unwrap_or(PlaybackState::Idle)
    }

    fn time_ms(&self) -> i64 {
        self.time_ms
    }

    fn length_ms(&self) -> i64 {
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
    use std::path::PathBuf;

    fn adapter() -> MediaBackendAdapter<DummyBackend> {
        MediaBackendAdapter::with_binding(
            DummyBackend::default(),
            SurfaceHandle(0x2a),
            SurfaceBinding::X11Window,
        )
        .unwrap()
    }

    #[test]
    fn binds_surface_once_at_construction() {
        let adapter = adapter();
        assert_eq!(adapter.backend().attached, Some(0x2a));
        assert_eq!(adapter.binding(), SurfaceBinding::X11Window);
    }

    #[test]
    fn unsupported_binding_fails_construction() {
        struct X11Only;
        impl MediaBackend for X11Only {
            fn set_xwindow(&mut self, _window: u64) -> Result<(), BackendError> {
                Ok(())
            }
            fn set_media(&mut self, _path: &Path) -> Result<(), BackendError> {
                Ok(())
            }
            fn play(&mut self) {}
            fn pause(&mut self) {}
            fn stop(&mut self) {}
            fn set_position(&mut self, _fraction: f32) {}
            fn set_volume(&mut self, _level: u8) {}
            fn state(&self) -> PlaybackState {
                PlaybackState::Idle
            }
            fn time_ms(&self) -> i64 {
                0
            }
            fn length_ms(&self) -> i64 {
                0
            }
            fn set_fullscreen(&mut self, _fullscreen: bool) {}
            fn is_fullscreen(&self) -> bool {
                false
            }
        }

        let result =
            MediaBackendAdapter::with_binding(X11Only, SurfaceHandle(1), SurfaceBinding::AppKitView);
        assert!(matches!(result, Err(BackendError::Engine(_))));
    }

    #[test]
    fn transport_is_noop_without_media() {
        let mut adapter = adapter();
        adapter.play();
        adapter.pause();
        adapter.stop();

        assert_eq!(adapter.backend().state, None);
        assert_eq!(adapter.state(), PlaybackState::Idle);
    }

    #[test]
    fn failed_load_keeps_previous_media() {
        let mut adapter = adapter();
        adapter.load_media(Path::new("/videos/a.mp4")).unwrap();

        let err = adapter.load_media(Path::new("/videos/b.bad")).unwrap_err();
        assert_eq!(err, BackendError::UnsupportedFormat(PathBuf::from("/videos/b.bad")));
        assert!(adapter.has_media());
        assert_eq!(adapter.backend().media, Some(PathBuf::from("/videos/a.mp4")));
    }

    #[test]
    fn seek_is_clamped_and_guarded_by_length() {
        let mut adapter = adapter();
        adapter.set_position(0.5);
        assert!(adapter.backend().seeks.is_empty());

        adapter.load_media(Path::new("/videos/a.mp4")).unwrap();
        adapter.set_position(0.5);
        assert!(adapter.backend().seeks.is_empty(), "unknown length must not seek");

        adapter.backend_mut().length_ms = 60_000;
        adapter.set_position(0.5);
        adapter.set_position(1.5);
        adapter.set_position(-0.25);
        assert_eq!(adapter.backend().seeks, vec![0.5, 1.0, 0.0]);
    }

    #[test]
    fn volume_is_clamped() {
        let mut adapter = adapter();
        adapter.set_volume(150);
        assert_eq!(adapter.backend().volume, 100);
        adapter.set_volume(30);
        assert_eq!(adapter.backend().volume, 30);
    }

    #[test]
    fn toggle_fullscreen_flips_engine_flag() {
        let mut adapter = adapter();
        assert!(adapter.toggle_fullscreen());
        assert!(adapter.is_fullscreen());
        assert!(!adapter.toggle_fullscreen());
        assert!(!adapter.is_fullscreen());
    }
}
