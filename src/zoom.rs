//! Pinch-to-zoom and pan state for the photo detail screen.
//!
//! The shell forwards raw gesture deltas (magnification ratio, drag
//! translation, double taps) and applies the resulting `(scale, offset)`
//! as a visual transform. All arithmetic is synchronous and total; a
//! gesture callback never allocates or fails.

use crate::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DOUBLE_TAP_SCALE};

// --- Configuration: validated at construction ---

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ZoomConfigError {
    #[error("scale bounds must be finite, got min={min}, max={max}")]
    NonFinite { min: f64, max: f64 },
    #[error("min scale must be positive, got {0}")]
    NonPositiveMin(f64),
    #[error("scale bounds are inverted: min={min} > max={max}")]
    Inverted { min: f64, max: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    min_scale: f64,
    max_scale: f64,
    enabled: bool,
}

impl ZoomConfig {
    pub fn new(min_scale: f64, max_scale: f64) -> Result<Self, ZoomConfigError> {
        if !min_scale.is_finite() || !max_scale.is_finite() {
            return Err(ZoomConfigError::NonFinite {
                min: min_scale,
                max: max_scale,
            });
        }
        if min_scale <= 0.0 {
            return Err(ZoomConfigError::NonPositiveMin(min_scale));
        }
        if min_scale > max_scale {
            return Err(ZoomConfigError::Inverted {
                min: min_scale,
                max: max_scale,
            });
        }
        Ok(Self {
            min_scale,
            max_scale,
            enabled: true,
        })
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            enabled: true,
        }
    }
}

// --- Offset and viewport ---

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Viewport {
    width: f64,
    height: f64,
}

// --- Gesture controller ---

/// Bounded zoom/pan state machine.
///
/// `scale` always stays within the configured bounds. `offset` is clamped
/// per axis to half the excess size the magnification creates,
/// `(viewport_axis * (scale - 1)) / 2`, so the viewport is never panned
/// past the content edge. Panning is locked while `scale <= 1.0`.
///
/// A gesture composes on the *baseline* values committed by the previous
/// gesture end, so mid-gesture deltas are always relative to the state at
/// gesture start.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomPan {
    config: ZoomConfig,
    enabled: bool,
    viewport: Viewport,
    scale: f64,
    offset: Offset,
    baseline_scale: f64,
    baseline_offset: Offset,
}

impl ZoomPan {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        // Rest scale is 1.0 where the bounds admit it.
        let rest = config.clamp_scale(1.0);
        let enabled = config.enabled();
        Self {
            config,
            enabled,
            viewport: Viewport::default(),
            scale: rest,
            offset: Offset::ZERO,
            baseline_scale: rest,
            baseline_offset: Offset::ZERO,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// True once magnified past rest scale; the parent pager suspends its
    /// own swipe handling while this holds.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Freezes (or thaws) all gesture input. Layout updates via
    /// [`set_viewport`](Self::set_viewport) still apply while frozen.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Records the layout size the offsets are bounded against and
    /// re-clamps current state to the new bounds.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return;
        }
        self.viewport = Viewport { width, height };
        self.offset = self.clamp_offset(self.offset, self.scale);
        self.baseline_offset = self.clamp_offset(self.baseline_offset, self.scale);
    }

    /// Applies a magnification update. `ratio` is relative to the gesture
    /// start (1.0 means unchanged). Returns whether the committed scale
    /// changed. Degenerate ratios (non-finite or non-positive) are ignored.
    pub fn pinch_changed(&mut self, ratio: f64) -> bool {
        if !self.enabled || !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        let next = self.config.clamp_scale(self.baseline_scale * ratio);
        let changed = next.to_bits() != self.scale.to_bits();
        self.scale = next;
        changed
    }

    /// Commits a finished magnification gesture. At minimum scale the whole
    /// transform snaps back to rest; otherwise the offset is re-clamped to
    /// the bounds the new scale implies and both baselines are committed.
    pub fn pinch_ended(&mut self) {
        if !self.enabled {
            return;
        }
        if self.scale <= self.config.min_scale() {
            self.scale = self.config.min_scale();
            self.baseline_scale = self.config.min_scale();
            self.offset = Offset::ZERO;
            self.baseline_offset = Offset::ZERO;
            return;
        }
        self.baseline_scale = self.scale;
        self.offset = self.clamp_offset(self.offset, self.scale);
        self.baseline_offset = self.offset;
    }

    /// Applies a drag update. `(dx, dy)` is the cumulative translation since
    /// the drag started. Ignored while at or below rest scale; otherwise the
    /// candidate offset is clamped per axis.
    pub fn drag_changed(&mut self, dx: f64, dy: f64) {
        if !self.enabled || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if self.scale <= 1.0 {
            return;
        }
        let candidate = Offset {
            x: self.baseline_offset.x + dx,
            y: self.baseline_offset.y + dy,
        };
        self.offset = self.clamp_offset(candidate, self.scale);
    }

    /// Commits a finished drag gesture.
    pub fn drag_ended(&mut self) {
        if !self.enabled {
            return;
        }
        self.baseline_offset = self.offset;
    }

    /// Toggles between rest and the fixed double-tap magnification: zoomed
    /// in from rest, or back to rest (offset cleared) from anywhere else.
    /// Returns whether the committed scale changed.
    pub fn double_tap(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let target = if self.scale > 1.0 {
            let rest = self.config.clamp_scale(1.0);
            self.offset = Offset::ZERO;
            self.baseline_offset = Offset::ZERO;
            rest
        } else {
            self.config.clamp_scale(DOUBLE_TAP_SCALE)
        };
        let changed = target.to_bits() != self.scale.to_bits();
        self.scale = target;
        self.baseline_scale = target;
        changed
    }

    fn clamp_offset(&self, candidate: Offset, scale: f64) -> Offset {
        let bound_x = Self::pan_bound(self.viewport.width, scale);
        let bound_y = Self::pan_bound(self.viewport.height, scale);
        Offset {
            x: candidate.x.clamp(-bound_x, bound_x),
            y: candidate.y.clamp(-bound_y, bound_y),
        }
    }

    // Half the excess size created by magnification; floors at zero so the
    // bound stays well-formed below rest scale.
    fn pan_bound(extent: f64, scale: f64) -> f64 {
        (extent * (scale - 1.0) / 2.0).max(0.0)
    }
}
