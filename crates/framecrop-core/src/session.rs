//! Cropping session: one source image, one aspect mode, one result.
//!
//! ```text
//! Loading --load ok--> Ready --confirm ok--> Closed
//!    |                   |
//!    +--load failed--> LoadFailed            (any) --cancel--> Closed
//! ```
//!
//! Loading the image is the only asynchronous boundary; the host delivers the
//! bytes once they are resident. Until then input is rejected with
//! [`InputOutcome::NotReady`] and confirm reports `CropFailed`.
//!
//! The frame is repainted synchronously after every state change, so
//! [`CropSession::frame`] always shows the most recent Transform State.

use std::fmt;

use crate::config::{ConfigError, CropperConfig};
use crate::decode::{decode_source, DecodeError, SourceImage};
use crate::error::{CropError, CropFailure};
use crate::extract::{extract_crop, OutputRaster};
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::input::{InputController, PointerEvent, TouchPhase, ZoomDirection};
use crate::render::{render_frame, Canvas};
use crate::transform::{crop_window, AspectMode, TransformState};

/// Observable lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    LoadFailed,
    Closed,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Ready => "ready",
            SessionPhase::LoadFailed => "load-failed",
            SessionPhase::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The Transform State changed and the frame was repainted.
    Updated,
    /// The input was accepted but left the transform as it was.
    Unchanged,
    /// No image is loaded, or the session is over.
    NotReady,
}

struct Loaded {
    image: SourceImage,
    state: TransformState,
    controller: InputController,
}

enum Stage {
    Loading,
    Ready(Box<Loaded>),
    LoadFailed,
    Closed,
}

/// An interactive cropping session.
pub struct CropSession {
    aspect: AspectMode,
    config: CropperConfig,
    surface: SurfaceSize,
    frame: Canvas,
    stage: Stage,
}

impl CropSession {
    /// Start a session waiting for its source image.
    pub fn new(aspect: AspectMode, config: CropperConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let surface = config.surface_size();
        log::debug!(
            "session created: {} on {}x{}",
            aspect.as_str(),
            surface.width,
            surface.height
        );

        Ok(Self {
            aspect,
            config,
            surface,
            frame: Canvas::new(surface),
            stage: Stage::Loading,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Loading => SessionPhase::Loading,
            Stage::Ready(_) => SessionPhase::Ready,
            Stage::LoadFailed => SessionPhase::LoadFailed,
            Stage::Closed => SessionPhase::Closed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.stage, Stage::Ready(_))
    }

    pub fn aspect_mode(&self) -> AspectMode {
        self.aspect
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface
    }

    /// Decode the source bytes and enter `Ready` at the fit transform.
    ///
    /// A decode failure moves the session to `LoadFailed`, which is final.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), CropError> {
        self.expect_loading()?;

        match decode_source(bytes, self.config.max_source_pixels) {
            Ok(image) => self.load_image(image),
            Err(err) => Err(self.fail_load(err)),
        }
    }

    /// Enter `Ready` with an already decoded image.
    pub fn load_image(&mut self, image: SourceImage) -> Result<(), CropError> {
        self.expect_loading()?;

        if image.is_empty() {
            return Err(self.fail_load(DecodeError::EmptyImage));
        }

        // An empty surface cannot be fitted against; use the configured one.
        let fit_surface = if self.surface.is_empty() {
            self.config.surface_size()
        } else {
            self.surface
        };
        let state = TransformState::fit(image.size(), fit_surface, self.aspect);
        log::info!(
            "image loaded: {}x{}, fit scale {:.4}",
            image.width(),
            image.height(),
            state.scale()
        );

        let loaded = Loaded {
            image,
            state,
            controller: InputController::new(),
        };
        paint(&mut self.frame, &loaded, &self.config);
        self.stage = Stage::Ready(Box::new(loaded));
        Ok(())
    }

    /// Feed a mouse/pointer event.
    pub fn pointer(&mut self, event: PointerEvent) -> InputOutcome {
        let surface = self.surface;
        let phase = self.phase();
        let Stage::Ready(loaded) = &mut self.stage else {
            log::debug!("pointer event ignored: session is {}", phase);
            return InputOutcome::NotReady;
        };

        match loaded.controller.handle_pointer(event, loaded.state, surface) {
            Some(next) => {
                loaded.state = next;
                paint(&mut self.frame, loaded, &self.config);
                InputOutcome::Updated
            }
            None => InputOutcome::Unchanged,
        }
    }

    /// Feed a touch event with its active touch points.
    pub fn touch(&mut self, phase: TouchPhase, touches: &[Point]) -> InputOutcome {
        if !self.is_ready() {
            log::debug!("touch event ignored: session is {}", self.phase());
            return InputOutcome::NotReady;
        }

        match PointerEvent::from_touch(phase, touches) {
            Some(event) => self.pointer(event),
            None => InputOutcome::Unchanged,
        }
    }

    pub fn zoom_in(&mut self) -> InputOutcome {
        self.zoom(ZoomDirection::In)
    }

    pub fn zoom_out(&mut self) -> InputOutcome {
        self.zoom(ZoomDirection::Out)
    }

    /// One zoom press; the scale is clamped into the configured range.
    pub fn zoom(&mut self, direction: ZoomDirection) -> InputOutcome {
        let phase = self.phase();
        let Stage::Ready(loaded) = &mut self.stage else {
            log::debug!("zoom ignored: session is {}", phase);
            return InputOutcome::NotReady;
        };

        let next = loaded.controller.zoom(direction, loaded.state, &self.config);
        if next == loaded.state {
            return InputOutcome::Unchanged;
        }

        log::debug!("zoom {:?}: scale {:.4}", direction, next.scale());
        loaded.state = next;
        paint(&mut self.frame, loaded, &self.config);
        InputOutcome::Updated
    }

    /// Return to the fit transform for the current surface.
    ///
    /// With an empty surface there is nothing to fit against, so the
    /// transform is kept.
    pub fn reset(&mut self) -> InputOutcome {
        let surface = self.surface;
        let phase = self.phase();
        let Stage::Ready(loaded) = &mut self.stage else {
            log::debug!("reset ignored: session is {}", phase);
            return InputOutcome::NotReady;
        };
        if surface.is_empty() {
            log::debug!("reset ignored: surface is empty");
            return InputOutcome::Unchanged;
        }

        let next = loaded
            .controller
            .reset(loaded.image.size(), surface, self.aspect);
        let outcome = if next == loaded.state {
            InputOutcome::Unchanged
        } else {
            InputOutcome::Updated
        };

        loaded.state = next;
        paint(&mut self.frame, loaded, &self.config);
        outcome
    }

    /// Change the display surface size.
    ///
    /// The transform is kept as it is; [`CropSession::reset`] refits it. A
    /// zero-sized surface is accepted and makes confirm fail until resized.
    pub fn resize_surface(&mut self, surface: SurfaceSize) {
        if surface == self.surface {
            return;
        }

        log::debug!("surface resized to {}x{}", surface.width, surface.height);
        self.surface = surface;
        self.frame = Canvas::new(surface);
        if let Stage::Ready(loaded) = &self.stage {
            paint(&mut self.frame, loaded, &self.config);
        }
    }

    /// The last painted frame. Blank until an image is loaded.
    pub fn frame(&self) -> &Canvas {
        &self.frame
    }

    /// Current Transform State, once an image is loaded.
    pub fn transform(&self) -> Option<TransformState> {
        match &self.stage {
            Stage::Ready(loaded) => Some(loaded.state),
            _ => None,
        }
    }

    /// Source image dimensions, once loaded.
    pub fn image_size(&self) -> Option<SurfaceSize> {
        match &self.stage {
            Stage::Ready(loaded) => Some(loaded.image.size()),
            _ => None,
        }
    }

    /// Crop Window for the current surface, in display space.
    pub fn crop_window(&self) -> Rect {
        crop_window(self.aspect.ratio(), self.surface, &self.config)
    }

    /// Source-image rectangle the Crop Window currently maps to.
    pub fn source_rect(&self) -> Option<Rect> {
        self.transform()
            .map(|state| state.source_rect(self.crop_window()))
    }

    /// Extract the crop and close the session.
    ///
    /// On failure the session stays as it was, so the user can retry or
    /// cancel.
    pub fn confirm(&mut self) -> Result<OutputRaster, CropError> {
        let result = match &self.stage {
            Stage::Ready(loaded) => extract_crop(
                &loaded.state,
                Some(&loaded.image),
                self.surface,
                &self.config,
            ),
            Stage::Loading | Stage::LoadFailed => Err(CropFailure::NotReady.into()),
            Stage::Closed => Err(CropFailure::SessionClosed.into()),
        };

        match result {
            Ok(output) => {
                log::info!("crop confirmed: {}x{}", output.width, output.height);
                self.close();
                Ok(output)
            }
            Err(err) => {
                log::warn!("confirm failed: {}", err);
                Err(err)
            }
        }
    }

    /// End the session without output. Valid in every phase.
    pub fn cancel(&mut self) {
        if matches!(self.stage, Stage::Closed) {
            return;
        }
        log::info!("session cancelled in phase {}", self.phase());
        self.close();
    }

    fn close(&mut self) {
        self.stage = Stage::Closed;
        self.frame.clear();
    }

    fn expect_loading(&self) -> Result<(), CropError> {
        match self.stage {
            Stage::Loading => Ok(()),
            _ => {
                log::warn!("load rejected: session is {}", self.phase());
                Err(CropError::InvalidPhase(self.phase()))
            }
        }
    }

    fn fail_load(&mut self, err: DecodeError) -> CropError {
        log::warn!("image load failed: {}", err);
        self.stage = Stage::LoadFailed;
        CropError::ImageLoadFailed(err)
    }
}

fn paint(frame: &mut Canvas, loaded: &Loaded, config: &CropperConfig) {
    if frame.size().is_empty() {
        return;
    }
    render_frame(frame, &loaded.state, &loaded.image, config);
}
