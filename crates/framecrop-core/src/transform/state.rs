//! Transform State: the affine mapping from source-image space to display space.
//!
//! The mapping is a uniform scale followed by a translation:
//!
//! ```text
//! display = position + source * scale
//! source  = (display - position) / scale
//! ```
//!
//! A `TransformState` is a plain `Copy` value. Every mutation returns a new
//! value which replaces the old one wholesale, so a reader never observes a
//! half-applied change.

use serde::{Deserialize, Serialize};

use crate::config::CropperConfig;
use crate::geometry::{Point, Rect, SurfaceSize};

/// Output aspect-ratio mode, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// 1:1 output.
    #[default]
    Square,
    /// 16:9 output.
    Widescreen,
}

impl AspectMode {
    /// Width divided by height of the crop window.
    pub fn ratio(self) -> f64 {
        match self {
            AspectMode::Square => 1.0,
            AspectMode::Widescreen => 16.0 / 9.0,
        }
    }

    /// Parse a mode name as sent by a host ("square", "widescreen", "16:9", ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" | "1:1" => Some(AspectMode::Square),
            "widescreen" | "wide" | "16:9" => Some(AspectMode::Widescreen),
            _ => None,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectMode::Square => "square",
            AspectMode::Widescreen => "widescreen",
        }
    }
}

/// Current pan/zoom of the source image on the display surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    scale: f64,
    position: Point,
    aspect: AspectMode,
}

impl TransformState {
    /// Compute the fit transform.
    ///
    /// The image is centred, and scaled so its shorter side spans the shorter
    /// side of the surface:
    ///
    /// ```text
    /// scale      = min(surface.w, surface.h) / min(image.w, image.h)
    /// position.x = (surface.w - image.w * scale) / 2
    /// position.y = (surface.h - image.h * scale) / 2
    /// ```
    ///
    /// The fit scale is not clamped to the zoom range; clamping applies to
    /// zoom presses. An empty surface yields scale 0, which extraction rejects.
    pub fn fit(image: SurfaceSize, surface: SurfaceSize, aspect: AspectMode) -> Self {
        let canvas_size = surface.width.min(surface.height) as f64;
        let image_size = image.width.min(image.height).max(1) as f64;
        let scale = canvas_size / image_size;

        let position = Point::new(
            (surface.width as f64 - image.width as f64 * scale) / 2.0,
            (surface.height as f64 - image.height as f64 * scale) / 2.0,
        );

        Self {
            scale,
            position,
            aspect,
        }
    }

    /// Build a state from explicit values. The scale must be positive.
    pub fn from_parts(scale: f64, position: Point, aspect: AspectMode) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        Self {
            scale,
            position,
            aspect,
        }
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn aspect_mode(&self) -> AspectMode {
        self.aspect
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect.ratio()
    }

    /// Same scale, image top-left moved to `position`. Position is never clamped.
    pub fn with_position(self, position: Point) -> Self {
        Self { position, ..self }
    }

    /// Adjust the scale by `delta` and clamp it into the configured range.
    /// The image top-left stays where it is.
    pub fn zoomed(self, delta: f64, config: &CropperConfig) -> Self {
        Self {
            scale: config.clamp_scale(self.scale + delta),
            ..self
        }
    }

    /// Map a source-image point to display space.
    pub fn to_display(&self, source: Point) -> Point {
        Point::new(
            self.position.x + source.x * self.scale,
            self.position.y + source.y * self.scale,
        )
    }

    /// Map a display-space point back to source-image space.
    pub fn to_source(&self, display: Point) -> Point {
        Point::new(
            (display.x - self.position.x) / self.scale,
            (display.y - self.position.y) / self.scale,
        )
    }

    /// Inverse-map a display-space rectangle into source-image pixels.
    pub fn source_rect(&self, display: Rect) -> Rect {
        let origin = self.to_source(display.top_left());
        Rect::new(
            origin.x,
            origin.y,
            display.width / self.scale,
            display.height / self.scale,
        )
    }

    /// Where the whole image lands on the display surface.
    pub fn image_rect(&self, image: SurfaceSize) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            image.width as f64 * self.scale,
            image.height as f64 * self.scale,
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = SurfaceSize> {
        (1u32..=6000, 1u32..=6000).prop_map(|(w, h)| SurfaceSize::new(w, h))
    }

    fn surface_strategy() -> impl Strategy<Value = SurfaceSize> {
        (50u32..=2000, 50u32..=2000).prop_map(|(w, h)| SurfaceSize::new(w, h))
    }

    proptest! {
        /// Property: after a fit, the image's shorter side spans the surface's shorter side.
        #[test]
        fn prop_fit_fills_shorter_side(image in image_strategy(), surface in surface_strategy()) {
            let state = TransformState::fit(image, surface, AspectMode::Square);
            let shorter_display = image.width.min(image.height) as f64 * state.scale();
            let canvas = surface.width.min(surface.height) as f64;
            prop_assert!((shorter_display - canvas).abs() < 1e-6 * canvas.max(1.0));
        }

        /// Property: the fit transform centres the image.
        #[test]
        fn prop_fit_is_centred(image in image_strategy(), surface in surface_strategy()) {
            let state = TransformState::fit(image, surface, AspectMode::Widescreen);
            let rect = state.image_rect(image);
            let cx = rect.x + rect.width / 2.0;
            let cy = rect.y + rect.height / 2.0;
            prop_assert!((cx - surface.width as f64 / 2.0).abs() < 1e-6);
            prop_assert!((cy - surface.height as f64 / 2.0).abs() < 1e-6);
        }

        /// Property: any zoom sequence keeps the scale inside the clamp range.
        #[test]
        fn prop_zoom_sequence_stays_clamped(
            steps in proptest::collection::vec(any::<bool>(), 0..300),
        ) {
            let config = CropperConfig::default();
            let mut state = TransformState::from_parts(1.0, Point::ORIGIN, AspectMode::Square);
            for zoom_in in steps {
                let delta = if zoom_in { 0.05 } else { -0.05 };
                state = state.zoomed(delta, &config);
                prop_assert!(state.scale() >= 0.25 && state.scale() <= 5.0);
            }
        }

        /// Property: forward then inverse mapping returns the source point.
        #[test]
        fn prop_inverse_mapping_round_trip(
            scale in 0.25f64..=5.0,
            px in -2000.0f64..2000.0,
            py in -2000.0f64..2000.0,
            sx in 0.0f64..6000.0,
            sy in 0.0f64..6000.0,
        ) {
            let state = TransformState::from_parts(scale, Point::new(px, py), AspectMode::Square);
            let back = state.to_source(state.to_display(Point::new(sx, sy)));
            prop_assert!((back.x - sx).abs() < 1e-6);
            prop_assert!((back.y - sy).abs() < 1e-6);
        }
    }
}
