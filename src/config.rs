//! Startup configuration handed to the shell.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_DISK_BUDGET_BYTES, DEFAULT_MEMORY_BUDGET_BYTES};

/// Cache and download policy for the shell's image loader.
///
/// The shell reads this once at startup and configures its image pipeline
/// with it; nothing here is global mutable state and the core never touches
/// pixels itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImagePipelineConfig {
    pub memory_budget_bytes: u64,
    pub disk_budget_bytes: u64,
    /// Honor `Cache-Control`/`ETag` on image responses instead of treating
    /// the disk cache as append-only.
    pub respect_http_cache_headers: bool,
    /// Throttle concurrent image downloads (for constrained networks).
    pub rate_limited: bool,
}

impl Default for ImagePipelineConfig {
    fn default() -> Self {
        Self {
            memory_budget_bytes: DEFAULT_MEMORY_BUDGET_BYTES,
            disk_budget_bytes: DEFAULT_DISK_BUDGET_BYTES,
            respect_http_cache_headers: true,
            rate_limited: false,
        }
    }
}

impl ImagePipelineConfig {
    #[must_use]
    pub fn with_memory_budget_bytes(mut self, bytes: u64) -> Self {
        self.memory_budget_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_disk_budget_bytes(mut self, bytes: u64) -> Self {
        self.disk_budget_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_respect_http_cache_headers(mut self, respect: bool) -> Self {
        self.respect_http_cache_headers = respect;
        self
    }

    #[must_use]
    pub fn with_rate_limited(mut self, rate_limited: bool) -> Self {
        self.rate_limited = rate_limited;
        self
    }
}

/// The configuration the shell should apply at startup.
#[must_use]
pub fn image_pipeline_config() -> ImagePipelineConfig {
    ImagePipelineConfig::default()
}
