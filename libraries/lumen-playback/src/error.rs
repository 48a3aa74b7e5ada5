//! Error types for playback session control

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`MediaBackend`](crate::MediaBackend) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The media file could not be opened
    #[error("Cannot read media: {}", .0.display())]
    Unreadable(PathBuf),

    /// The engine does not understand the container or codec
    #[error("Unsupported media format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Any other engine-side failure
    #[error("Playback engine error: {0}")]
    Engine(String),
}

/// Playback session errors
///
/// None of these are fatal: the session converts them into a user-visible
/// notice at the point where they are detected.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Explicit selection outside the playlist bounds
    #[error("Index {index} is out of range for a playlist of {len} item(s)")]
    OutOfRangeSelection {
        /// Requested index
        index: usize,
        /// Playlist length at the time of the request
        len: usize,
    },

    /// The backend refused to load a media item
    #[error("Failed to load {}: {source}", path.display())]
    LoadFailure {
        /// Path of the item that failed to load
        path: PathBuf,
        /// Underlying backend error
        #[source]
        source: BackendError,
    },

    /// Backend error outside of a load
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_length() {
        let err = PlaybackError::OutOfRangeSelection { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Index 5 is out of range for a playlist of 3 item(s)"
        );
    }

    #[test]
    fn load_failure_keeps_backend_source() {
        let err = PlaybackError::LoadFailure {
            path: PathBuf::from("/videos/broken.mkv"),
            source: BackendError::UnsupportedFormat(PathBuf::from("/videos/broken.mkv")),
        };

        assert!(err.to_string().contains("broken.mkv"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Unsupported media format: /videos/broken.mkv")
        );
    }
}
