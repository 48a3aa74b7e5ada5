//! Video surface geometry across fullscreen transitions
//!
//! In fullscreen the surface takes the whole window minus the transport
//! toolbar: `(0, 0, window_width, window_height - toolbar_height)`. Outside
//! fullscreen the surface is owned by the host layout, so resizes are ignored.

use crate::backend::{MediaBackend, MediaBackendAdapter};
use crate::events::{SessionObserver, UiUpdate};
use serde::{Deserialize, Serialize};

/// Host window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Video surface bounds relative to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Keeps the video surface consistent with the engine fullscreen flag
#[derive(Debug, Clone)]
pub struct FullscreenLayoutManager {
    window: WindowSize,
    toolbar_height: u32,
}

impl FullscreenLayoutManager {
    pub fn new(window: WindowSize, toolbar_height: u32) -> Self {
        Self {
            window,
            toolbar_height,
        }
    }

    /// Last known host window size
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// Surface bounds for the current window size
    pub fn surface_geometry(&self) -> SurfaceGeometry {
        SurfaceGeometry {
            x: 0,
            y: 0,
            width: self.window.width,
            height: self.window.height.saturating_sub(self.toolbar_height),
        }
    }

    /// Flip fullscreen on the engine and the host window
    ///
    /// Publishes the new window mode (the side panel is hidden in
    /// fullscreen) followed by the recomputed surface geometry. Returns the
    /// new fullscreen flag.
    pub fn toggle_fullscreen<B, O>(
        &mut self,
        adapter: &mut MediaBackendAdapter<B>,
        observer: &mut O,
    ) -> bool
    where
        B: MediaBackend,
        O: SessionObserver + ?Sized,
    {
        let fullscreen = adapter.toggle_fullscreen();
        tracing::info!(fullscreen, "Toggled fullscreen");

        observer.publish(UiUpdate::WindowMode {
            fullscreen,
            side_panel_visible: !fullscreen,
        });
        observer.publish(UiUpdate::SurfaceGeometry(self.surface_geometry()));

        fullscreen
    }

    /// Track a host window resize
    ///
    /// The surface is only recomputed while fullscreen.
    pub fn on_window_resize<B, O>(
        &mut self,
        size: WindowSize,
        adapter: &MediaBackendAdapter<B>,
        observer: &mut O,
    ) -> Option<SurfaceGeometry>
    where
        B: MediaBackend,
        O: SessionObserver + ?Sized,
    {
        self.window = size;
        if !adapter.is_fullscreen() {
            return None;
        }

        let geometry = self.surface_geometry();
        observer.publish(UiUpdate::SurfaceGeometry(geometry));
        Some(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DummyBackend, SurfaceBinding, SurfaceHandle};

    fn adapter() -> MediaBackendAdapter<DummyBackend> {
        MediaBackendAdapter::with_binding(
            DummyBackend::default(),
            SurfaceHandle(1),
            SurfaceBinding::X11Window,
        )
        .unwrap()
    }

    fn manager() -> FullscreenLayoutManager {
        FullscreenLayoutManager::new(
            WindowSize {
                width: 1920,
                height: 1080,
            },
            40,
        )
    }

    #[test]
    fn entering_fullscreen_hides_panel_and_fills_window() {
        let mut adapter = adapter();
        let mut layout = manager();
        let mut updates = Vec::new();

        assert!(layout.toggle_fullscreen(&mut adapter, &mut updates));
        assert!(adapter.is_fullscreen());
        assert_eq!(
            updates,
            vec![
                UiUpdate::WindowMode {
                    fullscreen: true,
                    side_panel_visible: false,
                },
                UiUpdate::SurfaceGeometry(SurfaceGeometry {
                    x: 0,
                    y: 0,
                    width: 1920,
                    height: 1040,
                }),
            ]
        );
    }

    #[test]
    fn leaving_fullscreen_shows_panel() {
        let mut adapter = adapter();
        let mut layout = manager();
        let mut updates = Vec::new();

        layout.toggle_fullscreen(&mut adapter, &mut updates);
        updates.clear();

        assert!(!layout.toggle_fullscreen(&mut adapter, &mut updates));
        assert_eq!(
            updates[0],
            UiUpdate::WindowMode {
                fullscreen: false,
                side_panel_visible: true,
            }
        );
    }

    #[test]
    fn resize_outside_fullscreen_only_tracks_size() {
        let adapter = adapter();
        let mut layout = manager();
        let mut updates = Vec::new();

        let size = WindowSize {
            width: 800,
            height: 600,
        };
        assert_eq!(layout.on_window_resize(size, &adapter, &mut updates), None);
        assert!(updates.is_empty());
        assert_eq!(layout.window(), size);
    }

    #[test]
    fn resize_in_fullscreen_recomputes_surface() {
        let mut adapter = adapter();
        let mut layout = manager();
        let mut updates = Vec::new();
        layout.toggle_fullscreen(&mut adapter, &mut updates);
        updates.clear();

        let geometry = layout.on_window_resize(
            WindowSize {
                width: 2560,
                height: 1440,
            },
            &adapter,
            &mut updates,
        );

        let expected = SurfaceGeometry {
            x: 0,
            y: 0,
            width: 2560,
            height: 1400,
        };
        assert_eq!(geometry, Some(expected));
        assert_eq!(updates, vec![UiUpdate::SurfaceGeometry(expected)]);
    }

    #[test]
    fn toolbar_taller_than_window_saturates() {
        let layout = FullscreenLayoutManager::new(
            WindowSize {
                width: 100,
                height: 20,
            },
            40,
        );
        assert_eq!(layout.surface_geometry().height, 0);
    }
}
