//! Photo domain model and the wire shape it is decoded from.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PICSUM_BASE_URL;

// --- Typed id ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhotoId(pub String);

impl PhotoId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Wire shape (Lorem Picsum `/v2/list` entry) ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PhotoDto {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub download_url: String,
}

// --- Domain model ---

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PhotoError {
    #[error("photo id is empty")]
    EmptyId,
    #[error("photo dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("invalid photo url: {0}")]
    InvalidUrl(String),
}

/// A photo from the feed. Immutable once constructed; build one through
/// [`TryFrom<PhotoDto>`] so ids, dimensions and URLs are validated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub author: String,
    /// Web page for the photo (attribution link).
    pub url: String,
    /// Full-resolution image URL.
    pub download_url: String,
    pub width: u32,
    pub height: u32,
}

impl Photo {
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Dimension caption shown on the detail screen, e.g. `5616 × 3744`.
    #[must_use]
    pub fn display_info(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }

    /// Image variant URL scaled to `target_width`, preserving aspect ratio.
    /// The list screen requests thumbnails through this instead of loading
    /// the full-resolution `download_url`.
    #[must_use]
    pub fn sized_url(&self, target_width: u32) -> String {
        let target_height = (f64::from(target_width) / self.aspect_ratio()).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let target_height = (target_height as u32).max(1);
        format!(
            "{PICSUM_BASE_URL}/id/{}/{}/{}",
            self.id, target_width, target_height
        )
    }
}

impl TryFrom<PhotoDto> for Photo {
    type Error = PhotoError;

    fn try_from(dto: PhotoDto) -> Result<Self, Self::Error> {
        if dto.id.trim().is_empty() {
            return Err(PhotoError::EmptyId);
        }
        if dto.width == 0 || dto.height == 0 {
            return Err(PhotoError::InvalidDimensions {
                width: dto.width,
                height: dto.height,
            });
        }
        for raw in [&dto.url, &dto.download_url] {
            if url::Url::parse(raw).is_err() {
                return Err(PhotoError::InvalidUrl(raw.clone()));
            }
        }
        Ok(Self {
            id: PhotoId::new(dto.id),
            author: dto.author,
            url: dto.url,
            download_url: dto.download_url,
            width: dto.width,
            height: dto.height,
        })
    }
}
