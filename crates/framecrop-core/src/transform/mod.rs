//! Transform State and the Crop Window derived from it.
//!
//! # Coordinate System
//!
//! - Source space: pixels of the decoded source image, origin top-left
//! - Display space: pixels of the drawing surface, origin top-left
//! - `display = position + source * scale`, no rotation or skew

mod state;
mod window;

pub use state::{AspectMode, TransformState};
pub use window::{crop_window, outside_strips};
