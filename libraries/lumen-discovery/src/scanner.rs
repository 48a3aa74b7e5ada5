//! File scanning for video files

use crate::{DiscoveryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported video file extensions, matched case-insensitively
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov"];

/// Scanner for video files in directories
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (`None` for unlimited)
    max_depth: Option<usize>,

    /// Sort siblings by file name instead of filesystem order
    sort_by_name: bool,
}

impl FileScanner {
    /// Create a new file scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Visit siblings in file name order
    ///
    /// Without this, results follow the order the filesystem returns.
    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }

    /// Scan a directory for video files
    ///
    /// # Arguments
    ///
    /// * `path` - Directory path to scan
    ///
    /// # Returns
    ///
    /// Absolute paths of the video files found, in traversal order
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(DiscoveryError::RootNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(DiscoveryError::NotADirectory(path.display().to_string()));
        }

        let root = path.canonicalize()?;
        let mut walker = WalkDir::new(&root).follow_links(self.follow_links);

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut video_files = Vec::new();
        for entry in walker.into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if is_video_file(entry.path()) {
                video_files.push(entry.into_path());
            }
        }

        tracing::info!(
            "Found {} video file(s) under {}",
            video_files.len(),
            root.display()
        );
        Ok(video_files)
    }

    /// Scan multiple directories for video files
    ///
    /// Roots that cannot be scanned are logged and skipped.
    pub fn scan_directories(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut all_files = Vec::new();

        for path in paths {
            match self.scan_directory(path) {
                Ok(mut files) => all_files.append(&mut files),
                Err(e) => {
                    tracing::warn!("Failed to scan {}: {}", path.display(), e);
                }
            }
        }

        all_files
    }
}

/// Check if a file has a supported video extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
