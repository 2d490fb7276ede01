//! Serializable projections the shell renders from.

use serde::{Deserialize, Serialize};

use crate::model::{DetailState, Model, Tab};
use crate::photo::{Photo, PhotoId};
use crate::THUMBNAIL_WIDTH;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoListItem {
    pub id: PhotoId,
    pub author: String,
    pub thumbnail_url: String,
    pub aspect_ratio: f64,
    pub is_favorite: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoDetailView {
    pub id: PhotoId,
    pub author: String,
    /// Dimension caption, e.g. `5616 × 3744`.
    pub display_info: String,
    pub image_url: String,
    /// Attribution page for the photo.
    pub web_url: String,
    pub is_favorite: bool,
    pub transform: ImageTransform,
    /// While zoomed in, the shell should suspend its pager swipe.
    pub zoom_active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ScreenView {
    Feed {
        photos: Vec<PhotoListItem>,
        is_loading: bool,
        error: Option<String>,
    },
    Favorites {
        photos: Vec<PhotoListItem>,
    },
    Detail(PhotoDetailView),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub screen: ScreenView,
    pub favorites_count: usize,
    /// Transient banner for a failed favorite write; dismissable.
    pub favorite_error: Option<String>,
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    let screen = model
        .selected
        .as_ref()
        .and_then(|detail| build_detail(model, detail))
        .map_or_else(|| build_tab(model), ScreenView::Detail);

    ViewModel {
        screen,
        favorites_count: model.favorites.len(),
        favorite_error: model.favorite_error.clone(),
    }
}

fn build_tab(model: &Model) -> ScreenView {
    match model.tab {
        Tab::Feed => ScreenView::Feed {
            photos: model
                .photos
                .iter()
                .map(|p| list_item(p, model.favorites.is_favorite(&p.id)))
                .collect(),
            is_loading: model.is_loading,
            error: model.feed_error.clone(),
        },
        Tab::Favorites => ScreenView::Favorites {
            photos: model
                .favorites
                .photos()
                .iter()
                .map(|p| list_item(p, true))
                .collect(),
        },
    }
}

/// `None` when the selected photo is no longer known (dropped from the feed
/// and not a favorite); the caller falls back to the underlying tab.
fn build_detail(model: &Model, detail: &DetailState) -> Option<PhotoDetailView> {
    let photo = model.find_photo(&detail.photo_id)?;
    let offset = detail.zoom.offset();
    Some(PhotoDetailView {
        id: photo.id.clone(),
        author: photo.author.clone(),
        display_info: photo.display_info(),
        image_url: photo.download_url.clone(),
        web_url: photo.url.clone(),
        is_favorite: model.favorites.is_favorite(&photo.id),
        transform: ImageTransform {
            scale: detail.zoom.scale(),
            offset_x: offset.x,
            offset_y: offset.y,
        },
        zoom_active: detail.zoom.is_zoomed(),
    })
}

fn list_item(photo: &Photo, is_favorite: bool) -> PhotoListItem {
    PhotoListItem {
        id: photo.id.clone(),
        author: photo.author.clone(),
        thumbnail_url: photo.sized_url(THUMBNAIL_WIDTH),
        aspect_ratio: photo.aspect_ratio(),
        is_favorite,
    }
}
