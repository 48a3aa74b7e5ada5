//! Lumen Player Media Discovery
//!
//! Finds local video files for the playlist.
//!
//! # Features
//!
//! - Recursive directory scanning in traversal order
//! - Case-insensitive extension filter (`mp4`, `avi`, `mkv`, `mov`)
//! - Optional symlink following, depth limit and name ordering
//!
//! Unreadable entries are skipped rather than aborting the scan.

mod error;

pub mod scanner;

pub use error::DiscoveryError;
pub use scanner::{is_video_file, FileScanner, VIDEO_EXTENSIONS};

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, DiscoveryError>;
