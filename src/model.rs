//! Core state and the bookkeeping around optimistic favorite mutations.

use std::collections::HashMap;

use uuid::Uuid;

use crate::api::ApiConfig;
use crate::favorites::FavoriteSet;
use crate::photo::{Photo, PhotoId};
use crate::zoom::{ZoomConfig, ZoomPan};

// --- Screens ---

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Feed,
    Favorites,
}

/// State of the pushed detail screen. A fresh zoom controller is created
/// when a photo is opened and dropped when it is dismissed, so zoom never
/// leaks between photos.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailState {
    pub photo_id: PhotoId,
    pub zoom: ZoomPan,
}

impl DetailState {
    #[must_use]
    pub fn new(photo_id: PhotoId) -> Self {
        Self {
            photo_id,
            zoom: ZoomPan::new(ZoomConfig::default()),
        }
    }
}

// --- Optimistic favorite mutation ---

/// Rollback record for one in-flight favorite write. Carries the full photo
/// so an optimistic removal can be restored if the write fails.
#[derive(Clone, Debug, PartialEq)]
pub struct FavoriteMutation {
    pub op_id: Uuid,
    pub photo: Photo,
    pub was_favorite: bool,
    /// Whether another favorite write was in flight at any point while this
    /// one was pending. Used to decide if a repair write is needed after a
    /// rollback.
    pub overlapped: bool,
}

impl FavoriteMutation {
    #[must_use]
    pub fn new(photo: Photo, was_favorite: bool) -> Self {
        Self {
            op_id: Uuid::new_v4(),
            photo,
            was_favorite,
            overlapped: false,
        }
    }
}

// --- Model ---

#[derive(Debug, Default)]
pub struct Model {
    pub api: ApiConfig,

    // Feed
    pub photos: Vec<Photo>,
    pub is_loading: bool,
    pub feed_error: Option<String>,

    // Favorites
    pub favorites: FavoriteSet,
    pub favorite_error: Option<String>,
    pub pending_favorites: HashMap<PhotoId, FavoriteMutation>,

    // Navigation
    pub tab: Tab,
    pub selected: Option<DetailState>,
}

impl Model {
    /// Looks a photo up in the feed first, then among favorites, so detail
    /// and toggling keep working for favorites that have left the feed.
    #[must_use]
    pub fn find_photo(&self, id: &PhotoId) -> Option<&Photo> {
        self.photos
            .iter()
            .find(|p| &p.id == id)
            .or_else(|| self.favorites.get(id))
    }

    /// Flips optimistic membership for `photo` and returns the pre-toggle
    /// membership.
    pub fn toggle_favorite_membership(&mut self, photo: Photo) -> bool {
        if self.favorites.is_favorite(&photo.id) {
            let _ = self.favorites.remove(&photo.id);
            true
        } else {
            let _ = self.favorites.add(photo);
            false
        }
    }

    /// Puts membership back the way it was before the mutation's toggle.
    /// Idempotent, so a late rollback after a reload cannot corrupt state.
    pub fn restore_favorite_state(&mut self, mutation: &FavoriteMutation) {
        if mutation.was_favorite {
            if !self.favorites.is_favorite(&mutation.photo.id) {
                let _ = self.favorites.add(mutation.photo.clone());
            }
        } else {
            let _ = self.favorites.remove(&mutation.photo.id);
        }
    }

    #[must_use]
    pub fn favorite_mutation_pending(&self, id: &PhotoId) -> bool {
        self.pending_favorites.contains_key(id)
    }

    /// Records an in-flight favorite write and returns its op id. Any write
    /// already pending (for another photo) is marked as overlapped, as is
    /// the new one.
    pub fn begin_favorite_mutation(&mut self, photo: Photo, was_favorite: bool) -> Uuid {
        let mut mutation = FavoriteMutation::new(photo, was_favorite);
        if !self.pending_favorites.is_empty() {
            mutation.overlapped = true;
            for pending in self.pending_favorites.values_mut() {
                pending.overlapped = true;
            }
        }
        let op_id = mutation.op_id;
        self.pending_favorites
            .insert(mutation.photo.id.clone(), mutation);
        op_id
    }

    /// Removes and returns the pending mutation for `photo_id`, but only if
    /// `op_id` matches; a stale settlement leaves current bookkeeping alone.
    pub fn take_favorite_mutation(
        &mut self,
        photo_id: &PhotoId,
        op_id: Uuid,
    ) -> Option<FavoriteMutation> {
        match self.pending_favorites.get(photo_id) {
            Some(pending) if pending.op_id == op_id => self.pending_favorites.remove(photo_id),
            _ => None,
        }
    }
}
