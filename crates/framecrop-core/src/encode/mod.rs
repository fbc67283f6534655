//! Output encoding.
//!
//! The crop result is handed to the host as a single lossless PNG byte
//! stream. All operations are synchronous and single-threaded.

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
