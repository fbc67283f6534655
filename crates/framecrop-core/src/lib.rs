//! Framecrop Core - interactive pan/zoom crop engine
//!
//! This crate lets a user pan and zoom a source image behind a fixed-aspect
//! crop window and extracts exactly the pixels inside that window as a PNG.
//!
//! # Module Structure
//!
//! - `transform` - Transform State (scale + position) and Crop Window geometry
//! - `render` - RGBA canvas, the affine blit and the overlay frame renderer
//! - `input` - Idle/Dragging controller for pointer, touch, zoom and reset
//! - `extract` - inverse mapping of the crop window into an output raster
//! - `session` - one cropping session from image load to confirm or cancel
//! - `decode` / `encode` - source decoding and PNG output
//!
//! Everything runs on the caller's thread; nothing here blocks or spawns.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod input;
pub mod render;
pub mod session;
pub mod transform;

pub use config::{ConfigError, CropperConfig};
pub use decode::{decode_source, DecodeError, SourceImage};
pub use encode::{encode_png, EncodeError};
pub use error::{CropError, CropFailure};
pub use extract::{extract_crop, render_crop, OutputRaster};
pub use geometry::{Point, Rect, SurfaceSize};
pub use input::{DragPhase, InputController, PointerEvent, TouchPhase, ZoomDirection};
pub use render::{draw_image, render_frame, Canvas, Color, InterpolationFilter, RenderStyle};
pub use session::{CropSession, InputOutcome, SessionPhase};
pub use transform::{crop_window, AspectMode, TransformState};
