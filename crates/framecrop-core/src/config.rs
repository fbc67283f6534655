//! Tunable parameters of a cropping session.
//!
//! Every field carries a serde default so a host can pass a partial object
//! (for example `{ "surface_width": 640 }`) and inherit the rest. The defaults
//! are the production constants: a 500x500 surface, a 0.05 zoom step and a
//! scale range of `[0.25, 5.0]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::SurfaceSize;
use crate::render::{InterpolationFilter, RenderStyle};

/// Default display surface edge in pixels.
pub const DEFAULT_SURFACE_EDGE: u32 = 500;

/// Default scale change per zoom press.
pub const DEFAULT_ZOOM_STEP: f64 = 0.05;

/// Smallest allowed scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.25;

/// Largest allowed scale.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Square window side relative to the smaller surface dimension.
pub const DEFAULT_SQUARE_WINDOW_FRACTION: f64 = 0.8;

/// Non-square window width relative to the surface width.
pub const DEFAULT_WIDE_WINDOW_FRACTION: f64 = 0.85;

/// Largest source image (in pixels) accepted by the decoder.
pub const DEFAULT_MAX_SOURCE_PIXELS: u64 = 50_000_000;

/// Errors reported by [`CropperConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("Invalid scale range: min ({min}) must be positive and not above max ({max})")]
    InvalidScaleRange { min: f64, max: f64 },

    #[error("Invalid zoom step: {0} (must be positive)")]
    InvalidZoomStep(f64),

    #[error("Invalid window fraction for {name}: {value} (must be in (0, 1])")]
    InvalidWindowFraction { name: &'static str, value: f64 },
}

/// Configuration for a cropping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Display surface width in pixels.
    pub surface_width: u32,
    /// Display surface height in pixels.
    pub surface_height: u32,
    /// Scale delta applied by one zoom-in or zoom-out press.
    pub zoom_step: f64,
    /// Lower scale clamp.
    pub min_scale: f64,
    /// Upper scale clamp.
    pub max_scale: f64,
    /// Square window side as a fraction of the smaller surface side.
    pub square_window_fraction: f64,
    /// Non-square window width as a fraction of the surface width.
    pub wide_window_fraction: f64,
    /// Resampling filter used when drawing the source image.
    pub filter: InterpolationFilter,
    /// Decoder guard: sources with more pixels than this are rejected.
    pub max_source_pixels: u64,
    /// Overlay, border and corner guide appearance.
    pub style: RenderStyle,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_EDGE,
            surface_height: DEFAULT_SURFACE_EDGE,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            square_window_fraction: DEFAULT_SQUARE_WINDOW_FRACTION,
            wide_window_fraction: DEFAULT_WIDE_WINDOW_FRACTION,
            filter: InterpolationFilter::default(),
            max_source_pixels: DEFAULT_MAX_SOURCE_PIXELS,
            style: RenderStyle::default(),
        }
    }
}

impl CropperConfig {
    /// Create a configuration with production defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Display surface dimensions.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface_width, self.surface_height)
    }

    /// Clamp a requested scale into the configured range.
    #[inline]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Check that every parameter is usable.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_size().is_empty() {
            return Err(ConfigError::InvalidSurface {
                width: self.surface_width,
                height: self.surface_height,
            });
        }

        // Written so NaN fails as well
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        if !(self.zoom_step > 0.0) {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }

        for (name, value) in [
            ("square_window_fraction", self.square_window_fraction),
            ("wide_window_fraction", self.wide_window_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidWindowFraction { name, value });
            }
        }

        Ok(())
    }
}
