//! Crop Window geometry.
//!
//! The window is derived from `(aspect_ratio, surface)` on every use and never
//! stored. [`crop_window`] is the only place the formula lives; the renderer
//! and the extractor both call it.

use crate::config::CropperConfig;
use crate::geometry::{Rect, SurfaceSize};

/// Compute the centred crop window for a surface.
///
/// - Square mode (`aspect_ratio == 1`): a square with side
///   `square_window_fraction * min(surface.w, surface.h)`.
/// - Otherwise: width `wide_window_fraction * surface.w`, height
///   `width * (1 / aspect_ratio)`.
pub fn crop_window(aspect_ratio: f64, surface: SurfaceSize, config: &CropperConfig) -> Rect {
    let surface_w = surface.width as f64;
    let surface_h = surface.height as f64;

    let (width, height) = if aspect_ratio == 1.0 {
        let side = surface_w.min(surface_h) * config.square_window_fraction;
        (side, side)
    } else {
        let width = surface_w * config.wide_window_fraction;
        (width, width * (1.0 / aspect_ratio))
    };

    Rect::new(
        (surface_w - width) / 2.0,
        (surface_h - height) / 2.0,
        width,
        height,
    )
}

/// The four dimming strips around a window, clipped to the surface:
/// top, left, right, bottom. They do not overlap and, together with the
/// window, tile the surface.
pub fn outside_strips(window: Rect, surface: SurfaceSize) -> [Rect; 4] {
    let surface_w = surface.width as f64;
    let surface_h = surface.height as f64;

    let top = window.y.clamp(0.0, surface_h);
    let bottom = window.bottom().clamp(top, surface_h);
    let left = window.x.clamp(0.0, surface_w);
    let right = window.right().clamp(left, surface_w);
    let middle = bottom - top;

    [
        Rect::new(0.0, 0.0, surface_w, top),
        Rect::new(0.0, top, left, middle),
        Rect::new(right, top, surface_w - right, middle),
        Rect::new(0.0, bottom, surface_w, surface_h - bottom),
    ]
}
