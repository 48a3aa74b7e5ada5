//! Ordered playlist with a current-item cursor
//!
//! Items keep discovery order. Navigation is bounded: no wraparound at
//! either end.

use crate::error::{PlaybackError, Result};
use crate::types::MediaItem;

/// Playlist of discovered media
///
/// Structure:
/// ```text
/// index:   0          1          2
///        [ a.mp4 ]  [ b.mkv ]  [ c.mov ]
///                      ^
///                   current
/// ```
///
/// The cursor is `None` while the playlist is empty or nothing has been
/// selected yet.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    items: Vec<MediaItem>,
    current: Option<usize>,
}

impl PlaylistStore {
    /// Create an empty playlist with no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the end
    pub fn append(&mut self, item: MediaItem) {
        self.items.push(item);
    }

    /// Move the cursor forward by one, stopping at the last item
    ///
    /// Returns `true` if the cursor moved.
    pub fn navigate_next(&mut self) -> bool {
        let Some(last) = self.items.len().checked_sub(1) else {
            return false;
        };

        let target = match self.current {
            Some(index) => (index + 1).min(last),
            None => 0,
        };
        self.move_to(target)
    }

    /// Move the cursor back by one, stopping at the first item
    ///
    /// Returns `true` if the cursor moved. With no selection this is a no-op.
    pub fn navigate_prev(&mut self) -> bool {
        match self.current {
            Some(index) => self.move_to(index.saturating_sub(1)),
            None => false,
        }
    }

    /// Select an item explicitly
    ///
    /// Fails with [`PlaybackError::OutOfRangeSelection`] and leaves the cursor
    /// unchanged when `index` is outside the playlist.
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(PlaybackError::OutOfRangeSelection {
                index,
                len: self.items.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Item under the cursor
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current.and_then(|index| self.items.get(index))
    }

    /// Cursor position
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Put the cursor back where it was before a failed load
    pub(crate) fn restore(&mut self, cursor: Option<usize>) {
        debug_assert!(cursor.map_or(true, |index| index < self.items.len()));
        self.current = cursor;
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// All items in playlist order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn move_to(&mut self, target: usize) -> bool {
        if self.current == Some(target) {
            return false;
        }
        self.current = Some(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(names: &[&str]) -> PlaylistStore {
        let mut playlist = PlaylistStore::new();
        for name in names {
            playlist.append(MediaItem::from_path(format!("/videos/{name}")));
        }
        playlist
    }

    #[test]
    fn starts_without_selection() {
        let playlist = playlist(&["a.mp4"]);
        assert_eq!(playlist.current_index(), None);
        assert!(playlist.current_item().is_none());
    }

    #[test]
    fn append_keeps_order() {
        let playlist = playlist(&["a.mp4", "b.mkv", "c.mov"]);
        let names: Vec<_> = playlist
            .items()
            .iter()
            .map(|item| item.display_name.as_str())
            .collect();
        assert_eq!(names, ["a.mp4", "b.mkv", "c.mov"]);
    }

    #[test]
    fn next_stops_at_last_item() {
        let mut playlist = playlist(&["a.mp4", "b.mkv", "c.mov"]);
        playlist.select_index(0).unwrap();

        assert!(playlist.navigate_next());
        assert!(playlist.navigate_next());
        assert_eq!(playlist.current_index(), Some(2));

        assert!(!playlist.navigate_next());
        assert_eq!(playlist.current_index(), Some(2));
    }

    #[test]
    fn prev_stops_at_first_item() {
        let mut playlist = playlist(&["a.mp4", "b.mkv"]);
        playlist.select_index(1).unwrap();

        assert!(playlist.navigate_prev());
        assert_eq!(playlist.current_index(), Some(0));
        assert!(!playlist.navigate_prev());
        assert_eq!(playlist.current_index(), Some(0));
    }

    #[test]
    fn prev_without_selection_is_noop() {
        let mut playlist = playlist(&["a.mp4", "b.mkv"]);
        assert!(!playlist.navigate_prev());
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn navigation_on_empty_playlist_is_noop() {
        let mut playlist = PlaylistStore::new();
        assert!(!playlist.navigate_next());
        assert!(!playlist.navigate_prev());
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn select_out_of_range_leaves_cursor() {
        let mut playlist = playlist(&["a.mp4", "b.mkv", "c.mov"]);
        playlist.select_index(1).unwrap();

        let err = playlist.select_index(5).unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::OutOfRangeSelection { index: 5, len: 3 }
        ));
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn restore_returns_to_previous_cursor() {
        let mut playlist = playlist(&["a.mp4", "b.mkv"]);
        playlist.select_index(1).unwrap();
        playlist.restore(None);
        assert_eq!(playlist.current_index(), None);
    }
}
