//! Session-level error taxonomy.
//!
//! Two conditions reach the host:
//! - `ImageLoadFailed`: the source bytes could not be decoded. Fatal to the
//!   session, not to the host.
//! - `CropFailed`: extraction could not complete. The session stays open so
//!   the user can retry or cancel.
//!
//! `InvalidPhase` covers a load requested after the session left `Loading`.
//!
//! Out-of-range zoom and pan requests are not errors; they are clamped or
//! accepted where they are handled.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::session::SessionPhase;

/// Why an extraction did not produce output.
#[derive(Debug, Error)]
pub enum CropFailure {
    /// No source image is loaded yet, or loading failed.
    #[error("no source image is loaded")]
    NotReady,

    /// The display surface has a zero dimension.
    #[error("display surface is unavailable")]
    SurfaceUnavailable,

    /// The crop window rounds to zero output pixels.
    #[error("crop window is empty")]
    EmptyWindow,

    /// The session was already confirmed or cancelled.
    #[error("session is closed")]
    SessionClosed,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Errors reported to the host.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("ImageLoadFailed: {0}")]
    ImageLoadFailed(#[from] DecodeError),

    #[error("CropFailed: {0}")]
    CropFailed(#[from] CropFailure),

    #[error("InvalidPhase: session is {0}, an image can only be loaded once")]
    InvalidPhase(SessionPhase),
}
