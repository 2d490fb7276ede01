use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::FetchError;
use crate::favorites::StoreError;
use crate::photo::PhotoId;

/// Everything that can happen to the core: shell interactions and settled
/// capability calls. Capability results are mapped to domain types inside
/// the capability callbacks, so no transport types ride in here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    AppStarted,

    // Feed
    RefreshRequested,
    PhotosFetchResponse {
        result: Result<Vec<u8>, FetchError>,
    },

    // Navigation
    SwitchToFeed,
    SwitchToFavorites,
    PhotoSelected {
        photo_id: PhotoId,
    },
    PhotoDeselected,

    // Favorites
    FavoriteToggleRequested {
        photo_id: PhotoId,
    },
    FavoritePersistResponse {
        photo_id: PhotoId,
        op_id: Uuid,
        result: Result<(), StoreError>,
    },
    FavoriteRepairResponse {
        result: Result<(), StoreError>,
    },
    FavoritesLoadResponse {
        result: Result<Option<Vec<u8>>, StoreError>,
    },
    DismissFavoriteError,

    // Detail zoom/pan gestures, forwarded raw by the shell
    ZoomViewportChanged {
        width: f64,
        height: f64,
    },
    ZoomPinchChanged {
        ratio: f64,
    },
    ZoomPinchEnded,
    ZoomDragChanged {
        dx: f64,
        dy: f64,
    },
    ZoomDragEnded,
    ZoomDoubleTapped,
    ZoomEnabledChanged {
        enabled: bool,
    },
}
