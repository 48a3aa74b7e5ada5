//! Periodic position sync
//!
//! The engine never pushes position updates, so the session samples it on a
//! fixed period. Scheduling belongs to the surrounding runtime; this module
//! only decides what one tick reads and publishes.

use crate::backend::{MediaBackend, MediaBackendAdapter};
use crate::types::PlaybackState;
use std::time::Duration;

/// Default sampling period
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(1);

/// Position and length sampled on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub current_time_ms: i64,
    pub total_time_ms: i64,
}

impl PositionSnapshot {
    /// Played fraction, or `None` when the length is unknown
    pub fn ratio(&self) -> Option<f64> {
        if self.total_time_ms <= 0 {
            return None;
        }
        Some(self.current_time_ms as f64 / self.total_time_ms as f64)
    }

    /// Slider value in `0..=100`
    pub fn slider_value(&self) -> Option<u8> {
        self.ratio()
            .map(|ratio| (ratio * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    /// `MM:SS / MM:SS`
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.current_time_ms),
            format_clock(self.total_time_ms)
        )
    }
}

/// `MM:SS` with minutes not wrapped into hours
pub fn format_clock(ms: i64) -> String {
    let ms = ms.max(0);
    format!("{:02}:{:02}", ms / 60_000, ms / 1000 % 60)
}

/// Samples the engine once per period while playing
#[derive(Debug, Clone, Copy)]
pub struct TimeSyncPoller {
    period: Duration,
}

impl Default for TimeSyncPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_PERIOD)
    }
}

impl TimeSyncPoller {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// How often the runtime should tick
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Read position and length if the engine is playing media of known
    /// length
    pub fn sample<B: MediaBackend>(&self, adapter: &MediaBackendAdapter<B>) -> Option<PositionSnapshot> {
        if adapter.state() != PlaybackState::Playing {
            return None;
        }

        let snapshot = PositionSnapshot {
            current_time_ms: adapter.time_ms(),
            total_time_ms: adapter.length_ms(),
        };
        if snapshot.total_time_ms <= 0 {
            tracing::debug!("Skipping position sync: media length unknown");
            return None;
        }

        Some(snapshot)
    }
}
