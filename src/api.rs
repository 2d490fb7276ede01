//! Feed endpoint plumbing for the Lorem Picsum API.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::photo::{Photo, PhotoDto};
use crate::{DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT, PICSUM_BASE_URL};

// --- Configuration ---

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiConfigError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    feed_limit: u32,
}

impl ApiConfig {
    /// `feed_limit` is clamped to what the API accepts (1..=100).
    pub fn new(base_url: impl Into<String>, feed_limit: u32) -> Result<Self, ApiConfigError> {
        let base_url = base_url.into();
        match url::Url::parse(&base_url) {
            Ok(parsed) if parsed.scheme() == "https" || parsed.scheme() == "http" => {}
            _ => return Err(ApiConfigError::InvalidBaseUrl(base_url)),
        }
        Ok(Self {
            base_url,
            feed_limit: feed_limit.clamp(1, MAX_FEED_LIMIT),
        })
    }

    /// Single-page photo list request; the feed has no pagination.
    #[must_use]
    pub fn feed_url(&self) -> String {
        format!(
            "{}/v2/list?limit={}",
            self.base_url.trim_end_matches('/'),
            self.feed_limit
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: PICSUM_BASE_URL.to_string(),
            feed_limit: DEFAULT_FEED_LIMIT,
        }
    }
}

// --- Failure taxonomy for the feed fetch ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport failure: {message}")]
    Transport { message: String },
    #[error("server returned status {status}")]
    Status { status: u16 },
    #[error("could not decode photo feed: {message}")]
    Decode { message: String },
}

impl FetchError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "Couldn't load photos. Check your connection and try again.",
            Self::Status { .. } | Self::Decode { .. } => {
                "The photo service returned something unexpected. Try again later."
            }
        }
    }
}

/// Collapses a raw feed response into bytes or a [`FetchError`]. Runs inside
/// the capability callback so the event stays free of transport types.
pub(crate) fn map_feed_response(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<Vec<u8>, FetchError> {
    match result {
        Ok(mut response) => {
            let status: u16 = response.status().into();
            if !(200..300).contains(&status) {
                return Err(FetchError::Status { status });
            }
            Ok(response.take_body().unwrap_or_default())
        }
        Err(e) => Err(FetchError::Transport {
            message: e.to_string(),
        }),
    }
}

/// Decodes a feed payload, dropping entries that fail validation rather
/// than rejecting the whole page.
pub fn decode_feed(bytes: &[u8]) -> Result<Vec<Photo>, FetchError> {
    let dtos: Vec<PhotoDto> = serde_json::from_slice(bytes).map_err(|e| FetchError::Decode {
        message: e.to_string(),
    })?;
    let mut photos = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let id = dto.id.clone();
        match Photo::try_from(dto) {
            Ok(photo) => photos.push(photo),
            Err(e) => warn!(photo_id = %id, error = %e, "dropping invalid feed entry"),
        }
    }
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, width: u32, height: u32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "author": "Alejandro Escamilla",
            "width": width,
            "height": height,
            "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
            "download_url": format!("https://picsum.photos/id/{id}/{width}/{height}"),
        })
    }

    #[test]
    fn default_feed_url_targets_picsum() {
        assert_eq!(
            ApiConfig::default().feed_url(),
            "https://picsum.photos/v2/list?limit=30"
        );
    }

    #[test]
    fn feed_url_tolerates_trailing_slash() {
        let config = ApiConfig::new("https://picsum.photos/", 10).unwrap();
        assert_eq!(config.feed_url(), "https://picsum.photos/v2/list?limit=10");
    }

    #[test]
    fn feed_limit_is_clamped_to_api_bounds() {
        let config = ApiConfig::new("https://picsum.photos", 5000).unwrap();
        assert_eq!(config.feed_url(), "https://picsum.photos/v2/list?limit=100");

        let config = ApiConfig::new("https://picsum.photos", 0).unwrap();
        assert_eq!(config.feed_url(), "https://picsum.photos/v2/list?limit=1");
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(matches!(
            ApiConfig::new("ftp://picsum.photos", 30),
            Err(ApiConfigError::InvalidBaseUrl(_))
        ));
        assert!(ApiConfig::new("not a url", 30).is_err());
    }

    #[test]
    fn decodes_a_valid_feed_page() {
        let bytes = serde_json::to_vec(&vec![entry("0", 5616, 3744), entry("1", 300, 400)]).unwrap();
        let photos = decode_feed(&bytes).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id.as_str(), "0");
        assert_eq!(photos[1].height, 400);
    }

    #[test]
    fn invalid_entries_are_dropped_not_fatal() {
        let bytes = serde_json::to_vec(&vec![entry("0", 5616, 3744), entry("1", 300, 0)]).unwrap();
        let photos = decode_feed(&bytes).unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id.as_str(), "0");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let result = decode_feed(b"<html>gateway timeout</html>");
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[test]
    fn empty_feed_is_not_an_error() {
        assert_eq!(decode_feed(b"[]").unwrap(), Vec::new());
    }

    #[test]
    fn every_failure_has_a_user_message() {
        let errors = [
            FetchError::Transport {
                message: "dns".into(),
            },
            FetchError::Status { status: 503 },
            FetchError::Decode {
                message: "eof".into(),
            },
        ];
        for e in errors {
            assert!(!e.user_message().is_empty());
        }
    }
}
