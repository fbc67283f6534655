//! Framecrop WASM - WebAssembly bindings for the framecrop crop engine
//!
//! This crate exposes a cropping session from framecrop-core to
//! JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession` (load, input, frame, confirm/cancel) and `JsCropResult`
//! - `logger` - forwards `log` records to the browser console
//! - `types` - argument parsing and error conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, set_log_level } from '@framecrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsCropSession('square');
//! session.load_image(bytes);
//! const png = session.confirm().bytes();
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod session;
mod types;

pub use logger::set_log_level;
pub use session::{JsCropResult, JsCropSession, OUTPUT_MIME_TYPE};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
    log::debug!("framecrop-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
