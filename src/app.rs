use crux_core::render::Render;
use crux_http::Http;
use crux_kv::KeyValue;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{self, FetchError};
use crate::event::Event;
use crate::favorites::{self, FavoriteSet, StoreError};
use crate::model::{DetailState, Model, Tab};
use crate::photo::PhotoId;
use crate::view_model::{self, ViewModel};
use crate::{FAVORITES_STORE_KEY, FAVORITE_TOGGLE_FAILED_MESSAGE};

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub key_value: KeyValue<Event>,
}

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        match event {
            Event::AppStarted => {
                Self::request_feed(model, caps);
                Self::request_favorites_load(caps);
                caps.render.render();
            }

            Event::RefreshRequested => {
                Self::request_feed(model, caps);
                caps.render.render();
            }

            Event::PhotosFetchResponse { result } => {
                Self::handle_feed_response(result, model);
                caps.render.render();
            }

            Event::SwitchToFeed => {
                model.tab = Tab::Feed;
                caps.render.render();
            }

            Event::SwitchToFavorites => {
                model.tab = Tab::Favorites;
                Self::request_favorites_load(caps);
                caps.render.render();
            }

            Event::PhotoSelected { photo_id } => {
                if model.find_photo(&photo_id).is_some() {
                    model.selected = Some(DetailState::new(photo_id));
                } else {
                    warn!(%photo_id, "selected photo is not known");
                }
                caps.render.render();
            }

            Event::PhotoDeselected => {
                model.selected = None;
                caps.render.render();
            }

            Event::FavoriteToggleRequested { photo_id } => {
                Self::handle_favorite_toggle(&photo_id, model, caps);
                caps.render.render();
            }

            Event::FavoritePersistResponse {
                photo_id,
                op_id,
                result,
            } => {
                Self::handle_favorite_settlement(&photo_id, op_id, result, model, caps);
                caps.render.render();
            }

            Event::FavoriteRepairResponse { result } => match result {
                Ok(()) => debug!("favorite repair write landed"),
                Err(e) => warn!(error = %e, "favorite repair write failed"),
            },

            Event::FavoritesLoadResponse { result } => {
                Self::handle_favorites_loaded(result, model);
                caps.render.render();
            }

            Event::DismissFavoriteError => {
                model.favorite_error = None;
                caps.render.render();
            }

            Event::ZoomViewportChanged { width, height } => {
                if let Some(detail) = model.selected.as_mut() {
                    detail.zoom.set_viewport(width, height);
                }
                caps.render.render();
            }

            Event::ZoomPinchChanged { ratio } => {
                if let Some(detail) = model.selected.as_mut() {
                    if detail.zoom.pinch_changed(ratio) {
                        debug!(scale = detail.zoom.scale(), "zoom scale committed");
                    }
                }
                caps.render.render();
            }

            Event::ZoomPinchEnded => {
                if let Some(detail) = model.selected.as_mut() {
                    detail.zoom.pinch_ended();
                }
                caps.render.render();
            }

            Event::ZoomDragChanged { dx, dy } => {
                if let Some(detail) = model.selected.as_mut() {
                    detail.zoom.drag_changed(dx, dy);
                }
                caps.render.render();
            }

            Event::ZoomDragEnded => {
                if let Some(detail) = model.selected.as_mut() {
                    detail.zoom.drag_ended();
                }
                caps.render.render();
            }

            Event::ZoomDoubleTapped => {
                if let Some(detail) = model.selected.as_mut() {
                    if detail.zoom.double_tap() {
                        debug!(scale = detail.zoom.scale(), "zoom scale committed");
                    }
                }
                caps.render.render();
            }

            Event::ZoomEnabledChanged { enabled } => {
                if let Some(detail) = model.selected.as_mut() {
                    detail.zoom.set_enabled(enabled);
                }
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        view_model::build(model)
    }
}

impl App {
    fn request_feed(model: &mut Model, caps: &Capabilities) {
        model.is_loading = true;
        model.feed_error = None;
        caps.http
            .get(model.api.feed_url())
            .send(|result| Event::PhotosFetchResponse {
                result: api::map_feed_response(result),
            });
    }

    fn handle_feed_response(result: Result<Vec<u8>, FetchError>, model: &mut Model) {
        model.is_loading = false;
        match result.and_then(|bytes| api::decode_feed(&bytes)) {
            Ok(photos) => {
                debug!(count = photos.len(), "photo feed loaded");
                model.photos = photos;
                model.feed_error = None;
            }
            Err(e) => {
                warn!(error = %e, "photo feed fetch failed");
                model.feed_error = Some(e.user_message().to_string());
            }
        }
    }

    fn request_favorites_load(caps: &Capabilities) {
        caps.key_value
            .get(FAVORITES_STORE_KEY.to_string(), |result| {
                Event::FavoritesLoadResponse {
                    result: result.map_err(|e| StoreError::backend(e.to_string())),
                }
            });
    }

    // Loading always settles to some membership; every failure degrades to
    // an empty set instead of surfacing (favorites are a non-critical path).
    fn handle_favorites_loaded(result: Result<Option<Vec<u8>>, StoreError>, model: &mut Model) {
        model.favorites = match result {
            Ok(Some(bytes)) => match favorites::decode_favorites(&bytes) {
                Ok(set) => {
                    debug!(count = set.len(), "favorites loaded");
                    set
                }
                Err(e) => {
                    warn!(error = %e, "stored favorites are unreadable");
                    FavoriteSet::default()
                }
            },
            Ok(None) => FavoriteSet::default(),
            Err(e) => {
                warn!(error = %e, "favorite store query failed");
                FavoriteSet::default()
            }
        };
    }

    fn handle_favorite_toggle(photo_id: &PhotoId, model: &mut Model, caps: &Capabilities) {
        model.favorite_error = None;

        if model.favorite_mutation_pending(photo_id) {
            warn!(%photo_id, "favorite toggle dropped, a write is already in flight");
            return;
        }
        let Some(photo) = model.find_photo(photo_id).cloned() else {
            warn!(%photo_id, "favorite toggle for an unknown photo");
            return;
        };

        let was_favorite = model.toggle_favorite_membership(photo.clone());
        let op_id = model.begin_favorite_mutation(photo, was_favorite);
        debug!(%photo_id, was_favorite, "optimistic favorite toggle");

        match favorites::encode_favorites(&model.favorites) {
            Ok(bytes) => {
                let response_id = photo_id.clone();
                caps.key_value
                    .set(FAVORITES_STORE_KEY.to_string(), bytes, move |result| {
                        Event::FavoritePersistResponse {
                            photo_id: response_id,
                            op_id,
                            result: result
                                .map(|_| ())
                                .map_err(|e| StoreError::backend(e.to_string())),
                        }
                    });
            }
            Err(e) => {
                // The write could not even be built; settle the failure now.
                Self::handle_favorite_settlement(photo_id, op_id, Err(e), model, caps);
            }
        }
    }

    fn handle_favorite_settlement(
        photo_id: &PhotoId,
        op_id: Uuid,
        result: Result<(), StoreError>,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let Some(mutation) = model.take_favorite_mutation(photo_id, op_id) else {
            warn!(%photo_id, "stale favorite settlement ignored");
            return;
        };
        match result {
            Ok(()) => {
                debug!(%photo_id, "favorite write committed");
            }
            Err(e) => {
                warn!(%photo_id, error = %e, "favorite write failed, rolling back");
                model.restore_favorite_state(&mutation);
                model.favorite_error = Some(FAVORITE_TOGGLE_FAILED_MESSAGE.to_string());
                if mutation.overlapped {
                    Self::request_favorites_repair(model, caps);
                }
            }
        }
    }

    // After a rollback that raced other writes, durable state may hold the
    // rolled-back toggle. One follow-up write of the current set converges
    // it; a failure here only logs.
    fn request_favorites_repair(model: &Model, caps: &Capabilities) {
        match favorites::encode_favorites(&model.favorites) {
            Ok(bytes) => {
                caps.key_value
                    .set(FAVORITES_STORE_KEY.to_string(), bytes, |result| {
                        Event::FavoriteRepairResponse {
                            result: result
                                .map(|_| ())
                                .map_err(|e| StoreError::backend(e.to_string())),
                        }
                    });
            }
            Err(e) => warn!(error = %e, "could not build the favorite repair write"),
        }
    }
}
