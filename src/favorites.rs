//! Favorite membership and its persisted form.
//!
//! The set itself is plain in-memory state; durability comes from writing
//! the whole set as a versioned envelope to the shell's key-value store
//! after each change. Loading tolerates every failure by degrading to an
//! empty set, so favorites can never block the app.

use serde::{Deserialize, Serialize};

use crate::photo::{Photo, PhotoId};
use crate::FAVORITES_SCHEMA_VERSION;

// --- Errors ---

/// Failure of the durable store, surfaced from the key-value capability or
/// from envelope encode/decode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("favorite store backend failure: {message}")]
    Backend { message: String },
    #[error("favorite payload codec failure: {message}")]
    Codec { message: String },
    #[error("unsupported favorites schema version {0}")]
    UnsupportedVersion(u32),
}

impl StoreError {
    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Failure of a pure membership operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FavoriteError {
    #[error("photo {0} is already a favorite")]
    AlreadyFavorite(PhotoId),
    #[error("photo {0} is not a favorite")]
    NotFound(PhotoId),
}

// --- Membership ---

/// Insertion-ordered set of favorited photos, unique by photo id. Keeps the
/// full [`Photo`] payloads so the favorites screen can render without the
/// feed being loaded.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    photos: Vec<Photo>,
}

impl FavoriteSet {
    /// Builds a set from loaded photos, keeping the first occurrence of each
    /// id.
    #[must_use]
    pub fn from_photos(photos: Vec<Photo>) -> Self {
        let mut set = Self::default();
        for photo in photos {
            let _ = set.add(photo);
        }
        set
    }

    #[must_use]
    pub fn is_favorite(&self, id: &PhotoId) -> bool {
        self.photos.iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| &p.id == id)
    }

    /// All favorites in the order they were added.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn add(&mut self, photo: Photo) -> Result<(), FavoriteError> {
        if self.is_favorite(&photo.id) {
            return Err(FavoriteError::AlreadyFavorite(photo.id));
        }
        self.photos.push(photo);
        Ok(())
    }

    pub fn remove(&mut self, id: &PhotoId) -> Result<Photo, FavoriteError> {
        let position = self
            .photos
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| FavoriteError::NotFound(id.clone()))?;
        Ok(self.photos.remove(position))
    }
}

// --- Persisted envelope ---

#[derive(Serialize, Deserialize)]
struct StoredFavorites {
    schema_version: u32,
    photos: Vec<Photo>,
}

pub fn encode_favorites(set: &FavoriteSet) -> Result<Vec<u8>, StoreError> {
    let stored = StoredFavorites {
        schema_version: FAVORITES_SCHEMA_VERSION,
        photos: set.photos.clone(),
    };
    serde_json::to_vec(&stored).map_err(|e| StoreError::Codec {
        message: e.to_string(),
    })
}

pub fn decode_favorites(bytes: &[u8]) -> Result<FavoriteSet, StoreError> {
    let stored: StoredFavorites = serde_json::from_slice(bytes).map_err(|e| StoreError::Codec {
        message: e.to_string(),
    })?;
    if stored.schema_version != FAVORITES_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(stored.schema_version));
    }
    Ok(FavoriteSet::from_photos(stored.photos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::PhotoDto;

    fn photo(id: &str) -> Photo {
        Photo::try_from(PhotoDto {
            id: id.into(),
            author: "Alejandro Escamilla".into(),
            width: 5616,
            height: 3744,
            url: "https://unsplash.com/photos/yC-Yzbqy7PY".into(),
            download_url: format!("https://picsum.photos/id/{id}/5616/3744"),
        })
        .unwrap()
    }

    #[test]
    fn add_then_remove_round_trips_membership() {
        let mut set = FavoriteSet::default();
        assert!(!set.is_favorite(&PhotoId::new("7")));

        set.add(photo("7")).unwrap();
        assert!(set.is_favorite(&PhotoId::new("7")));
        assert_eq!(set.len(), 1);

        let removed = set.remove(&PhotoId::new("7")).unwrap();
        assert_eq!(removed.id.as_str(), "7");
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_add_is_an_error() {
        let mut set = FavoriteSet::default();
        set.add(photo("7")).unwrap();
        assert_eq!(
            set.add(photo("7")),
            Err(FavoriteError::AlreadyFavorite(PhotoId::new("7")))
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn removing_an_absent_id_is_not_found() {
        let mut set = FavoriteSet::default();
        assert_eq!(
            set.remove(&PhotoId::new("9")),
            Err(FavoriteError::NotFound(PhotoId::new("9")))
        );
    }

    #[test]
    fn preserves_insertion_order() {
        let mut set = FavoriteSet::default();
        set.add(photo("2")).unwrap();
        set.add(photo("0")).unwrap();
        set.add(photo("1")).unwrap();
        let ids: Vec<&str> = set.photos().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "0", "1"]);
    }

    #[test]
    fn from_photos_drops_duplicate_ids() {
        let set = FavoriteSet::from_photos(vec![photo("1"), photo("1"), photo("2")]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn envelope_round_trips() {
        let mut set = FavoriteSet::default();
        set.add(photo("3")).unwrap();
        set.add(photo("5")).unwrap();

        let bytes = encode_favorites(&set).unwrap();
        assert_eq!(decode_favorites(&bytes).unwrap(), set);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_favorites(b"not json"),
            Err(StoreError::Codec { .. })
        ));
    }

    #[test]
    fn decode_rejects_unknown_schema_version() {
        let bytes = serde_json::to_vec(&serde_json::json!({
            "schema_version": 99,
            "photos": [],
        }))
        .unwrap();
        assert_eq!(
            decode_favorites(&bytes),
            Err(StoreError::UnsupportedVersion(99))
        );
    }
}
