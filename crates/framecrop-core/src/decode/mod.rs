//! Source image decoding.
//!
//! The host hands the engine raw file bytes; this module turns them into an
//! immutable [`SourceImage`]:
//! - Format detection from the bytes (PNG, JPEG)
//! - Pixel budget check on the header before the full decode
//! - EXIF orientation correction
//! - Conversion to straight-alpha RGBA8
//!
//! Decoding is the one boundary in a session that may arrive late; until it
//! completes the session treats itself as not ready.

mod source;
mod types;

pub use source::decode_source;
pub use types::{DecodeError, Orientation, SourceImage};
