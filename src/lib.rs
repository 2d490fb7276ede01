//! Shared core of a photo-browsing app in the Crux style: native shells
//! forward UI events to [`App::update`] and paint whatever
//! [`App::view`] returns. All feed, favorites, and zoom-gesture logic
//! lives here so every platform shell stays a thin rendering layer.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod favorites;
pub mod model;
pub mod photo;
pub mod view_model;
pub mod zoom;

pub use app::{App, Capabilities, Effect};
pub use config::{image_pipeline_config, ImagePipelineConfig};
pub use event::Event;
pub use model::Model;
pub use view_model::ViewModel;

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 4.0;
pub const DOUBLE_TAP_SCALE: f64 = 2.0;

pub const PICSUM_BASE_URL: &str = "https://picsum.photos";
pub const DEFAULT_FEED_LIMIT: u32 = 30;
pub const MAX_FEED_LIMIT: u32 = 100;
pub const THUMBNAIL_WIDTH: u32 = 600;

pub const FAVORITES_STORE_KEY: &str = "favorites:v1";
pub const FAVORITES_SCHEMA_VERSION: u32 = 1;
pub const FAVORITE_TOGGLE_FAILED_MESSAGE: &str = "Failed to update favorite";

pub const DEFAULT_MEMORY_BUDGET_BYTES: u64 = 64 * 1024 * 1024;
pub const DEFAULT_DISK_BUDGET_BYTES: u64 = 256 * 1024 * 1024;
