//! Cropping session bindings.
//!
//! A `JsCropSession` owns one core session. The host feeds it the image bytes
//! once they are loaded, forwards pointer/touch/button input, repaints from
//! `frame_image_data()` after each `"updated"` outcome, and finally calls
//! `confirm()` or `cancel()`.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropSession } from '@framecrop/wasm';
//!
//! const session = new JsCropSession('widescreen', { surface_width: 640, surface_height: 480 });
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! ctx.putImageData(session.frame_image_data(), 0, 0);
//!
//! canvas.onmousedown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onmousemove = (e) => {
//!   if (session.pointer_move(e.offsetX, e.offsetY) === 'updated') {
//!     ctx.putImageData(session.frame_image_data(), 0, 0);
//!   }
//! };
//!
//! const result = session.confirm();
//! upload(result.to_blob());
//! ```

use framecrop_core::{
    ConfigError, CropSession, CropperConfig, OutputRaster, Point, PointerEvent, SurfaceSize,
    TouchPhase,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{Blob, BlobPropertyBag, ImageData};

use crate::types::{outcome_name, parse_aspect, points_from_flat, to_js_error};

/// MIME type of the crop output.
pub const OUTPUT_MIME_TYPE: &str = "image/png";

/// An interactive cropping session exposed to JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session for `"square"` or `"widescreen"` output.
    ///
    /// `config` is an optional partial `CropperConfig` object; missing fields
    /// take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(aspect_mode: &str, config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: CropperConfig = if config.is_undefined() || config.is_null() {
            CropperConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid cropper config: {}", e)))?
        };

        Self::from_parts(aspect_mode, config).map_err(|e| JsValue::from_str(&e))
    }

    /// Decode and load the source image. Errors are prefixed `ImageLoadFailed:`.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(bytes).map_err(to_js_error)
    }

    /// Current phase: `"loading"`, `"ready"`, `"load-failed"` or `"closed"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_mode(&self) -> String {
        self.inner.aspect_mode().as_str().to_string()
    }

    // =========================================================================
    // Input. Every method returns "updated", "unchanged" or "not-ready".
    // =========================================================================

    pub fn pointer_down(&mut self, x: f64, y: f64) -> String {
        self.pointer(PointerEvent::Down(Point::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        self.pointer(PointerEvent::Move(Point::new(x, y)))
    }

    pub fn pointer_up(&mut self) -> String {
        self.pointer(PointerEvent::Up)
    }

    pub fn pointer_leave(&mut self) -> String {
        self.pointer(PointerEvent::Leave)
    }

    /// `touches` holds the active touch points as `[x0, y0, x1, y1, ...]`.
    pub fn touch_start(&mut self, touches: &[f64]) -> String {
        self.touch(TouchPhase::Start, touches)
    }

    pub fn touch_move(&mut self, touches: &[f64]) -> String {
        self.touch(TouchPhase::Move, touches)
    }

    pub fn touch_end(&mut self) -> String {
        self.touch(TouchPhase::End, &[])
    }

    pub fn touch_cancel(&mut self) -> String {
        self.touch(TouchPhase::Cancel, &[])
    }

    pub fn zoom_in(&mut self) -> String {
        outcome_name(self.inner.zoom_in()).to_string()
    }

    pub fn zoom_out(&mut self) -> String {
        outcome_name(self.inner.zoom_out()).to_string()
    }

    pub fn reset(&mut self) -> String {
        outcome_name(self.inner.reset()).to_string()
    }

    /// Resize the display surface. The transform is refitted only on `reset()`.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.inner.resize_surface(SurfaceSize::new(width, height));
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    /// Current scale, or `undefined` before the image is loaded.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> Option<f64> {
        self.inner.transform().map(|state| state.scale())
    }

    #[wasm_bindgen(getter)]
    pub fn position_x(&self) -> Option<f64> {
        self.inner.transform().map(|state| state.position().x)
    }

    #[wasm_bindgen(getter)]
    pub fn position_y(&self) -> Option<f64> {
        self.inner.transform().map(|state| state.position().y)
    }

    #[wasm_bindgen(getter)]
    pub fn surface_width(&self) -> u32 {
        self.inner.surface_size().width
    }

    #[wasm_bindgen(getter)]
    pub fn surface_height(&self) -> u32 {
        self.inner.surface_size().height
    }

    /// Crop Window as `{ x, y, width, height }` in display pixels.
    pub fn crop_window(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_window()).map_err(to_js_error)
    }

    /// Source rectangle `{ x, y, width, height }` the Crop Window maps to,
    /// or `null` before the image is loaded.
    pub fn source_rect(&self) -> Result<JsValue, JsValue> {
        match self.inner.source_rect() {
            Some(rect) => serde_wasm_bindgen::to_value(&rect).map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }

    /// Last painted frame as RGBA bytes (`surface_width * surface_height * 4`).
    pub fn frame_pixels(&self) -> Vec<u8> {
        self.inner.frame().pixels().to_vec()
    }

    /// Last painted frame, ready for `CanvasRenderingContext2D.putImageData`.
    pub fn frame_image_data(&self) -> Result<ImageData, JsValue> {
        let frame = self.inner.frame();
        let size = frame.size();
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(frame.pixels()), size.width, size.height)
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Extract the crop. Errors are prefixed `CropFailed:`; the session stays
    /// open after a failure.
    pub fn confirm(&mut self) -> Result<JsCropResult, JsValue> {
        self.inner
            .confirm()
            .map(JsCropResult::from_raster)
            .map_err(to_js_error)
    }

    /// End the session without output.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

impl JsCropSession {
    /// Build a session from an aspect name and a parsed config.
    pub(crate) fn from_parts(aspect_mode: &str, config: CropperConfig) -> Result<Self, String> {
        let aspect = parse_aspect(aspect_mode)?;
        let inner = CropSession::new(aspect, config).map_err(|e: ConfigError| e.to_string())?;
        Ok(Self { inner })
    }

    fn pointer(&mut self, event: PointerEvent) -> String {
        outcome_name(self.inner.pointer(event)).to_string()
    }

    fn touch(&mut self, phase: TouchPhase, touches: &[f64]) -> String {
        let points = points_from_flat(touches);
        outcome_name(self.inner.touch(phase, &points)).to_string()
    }
}

/// The encoded crop output.
#[wasm_bindgen]
pub struct JsCropResult {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

#[wasm_bindgen]
impl JsCropResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.png.len()
    }

    /// PNG bytes as a `Uint8Array` copy.
    pub fn bytes(&self) -> Vec<u8> {
        self.png.clone()
    }

    /// PNG bytes wrapped in a `Blob` of type `image/png`.
    pub fn to_blob(&self) -> Result<Blob, JsValue> {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(self.png.as_slice()));

        let options = BlobPropertyBag::new();
        options.set_type(OUTPUT_MIME_TYPE);
        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
    }
}

impl JsCropResult {
    pub(crate) fn from_raster(raster: OutputRaster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            png: raster.png,
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![128u8; (width * height * 4) as usize];
        framecrop_core::encode_png(&pixels, width, height).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_new_with_partial_config() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"surface_width".into(), &JsValue::from(320)).unwrap();

        let session = JsCropSession::new("square", config.into()).unwrap();
        assert_eq!(session.surface_width(), 320);
        assert_eq!(session.surface_height(), 500);
    }

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let session = JsCropSession::new("widescreen", JsValue::UNDEFINED).unwrap();
        assert_eq!(session.aspect_mode(), "widescreen");
    }

    #[wasm_bindgen_test]
    fn test_load_failure_message() {
        let mut session = JsCropSession::new("square", JsValue::NULL).unwrap();
        let err = session.load_image(&[0, 1, 2, 3]).unwrap_err();
        assert!(err.as_string().unwrap().starts_with("ImageLoadFailed:"));
        assert_eq!(session.phase(), "load-failed");
    }

    #[wasm_bindgen_test]
    fn test_confirm_before_load_message() {
        let mut session = JsCropSession::new("square", JsValue::NULL).unwrap();
        let err = session.confirm().err().unwrap();
        assert!(err.as_string().unwrap().starts_with("CropFailed:"));
    }

    #[wasm_bindgen_test]
    fn test_frame_image_data_and_blob() {
        let mut session = JsCropSession::new("square", JsValue::NULL).unwrap();
        session.load_image(&gray_png(50, 50)).unwrap();

        let data = session.frame_image_data().unwrap();
        assert_eq!((data.width(), data.height()), (500, 500));

        let window = session.crop_window().unwrap();
        let width = js_sys::Reflect::get(&window, &"width".into()).unwrap();
        assert_eq!(width.as_f64(), Some(400.0));

        let blob = session.confirm().unwrap().to_blob().unwrap();
        assert_eq!(blob.type_(), "image/png");
    }
}
