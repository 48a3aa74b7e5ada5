//! Favorites toggle set
//!
//! Membership is keyed by media path. Toggling is the only mutation, so
//! toggling the same item twice restores the previous set.

use crate::types::MediaItem;
use std::path::Path;

/// Outcome of a favorite toggle, carrying the display name for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteChange {
    /// Item was not a favorite and now is
    Added(String),

    /// Item was a favorite and no longer is
    Removed(String),
}

/// Insertion-ordered set of favorite media
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    items: Vec<MediaItem>,
}

impl FavoritesSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `item`
    pub fn toggle(&mut self, item: &MediaItem) -> FavoriteChange {
        match self.position(&item.path) {
            Some(index) => {
                let removed = self.items.remove(index);
                FavoriteChange::Removed(removed.display_name)
            }
            None => {
                self.items.push(item.clone());
                FavoriteChange::Added(item.display_name.clone())
            }
        }
    }

    /// Whether the media at `path` is a favorite
    pub fn contains(&self, path: &Path) -> bool {
        self.position(path).is_some()
    }

    /// Favorites in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.items.iter().position(|item| item.path == path)
    }
}
