//! Display rendering for the crop view.
//!
//! This module provides:
//! - [`Canvas`]: an owned RGBA drawing surface with fill and stroke operations
//! - [`draw_image`]: the affine blit shared with the crop extractor
//! - [`render_frame`]: the full frame (image, dimming, border, corner guides)
//!
//! Rendering is a pure function of the Transform State, the source image and
//! the surface size. It never mutates anything but the canvas it is given.

mod blit;
mod canvas;
mod frame;

pub use blit::{draw_image, InterpolationFilter};
pub use canvas::{Canvas, Color};
pub use frame::{render_frame, RenderStyle};
