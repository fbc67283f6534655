//! Input Controller: turns pointer and touch input into Transform State updates.
//!
//! Drag handling is a two-state machine:
//!
//! | state    | event              | next     | effect                              |
//! |----------|--------------------|----------|-------------------------------------|
//! | Idle     | Down (on surface)  | Dragging | `offset = pointer - position`       |
//! | Idle     | Down (off surface) | Idle     | none                                |
//! | Idle     | Move / Up / Leave  | Idle     | none                                |
//! | Dragging | Down (on surface)  | Dragging | offset re-recorded                  |
//! | Dragging | Move               | Dragging | `position = pointer - offset`       |
//! | Dragging | Up / Leave         | Idle     | none                                |
//!
//! Zoom presses and reset work from either state. No operation here can fail:
//! zoom requests outside the scale range are clamped and positions are
//! accepted as-is.

use crate::config::CropperConfig;
use crate::geometry::{Point, SurfaceSize};
use crate::transform::{AspectMode, TransformState};

/// Pointer input in display-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// The pointer left the tracked surface.
    Leave,
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerEvent {
    /// Map a touch event onto pointer input.
    ///
    /// The first active touch point drives the drag exactly like a mouse;
    /// any further points are ignored. End and cancel release the drag.
    pub fn from_touch(phase: TouchPhase, touches: &[Point]) -> Option<Self> {
        match phase {
            TouchPhase::Start => touches.first().map(|&p| PointerEvent::Down(p)),
            TouchPhase::Move => touches.first().map(|&p| PointerEvent::Move(p)),
            TouchPhase::End | TouchPhase::Cancel => Some(PointerEvent::Up),
        }
    }
}

/// Zoom control direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus image position when the drag started.
        offset: Point,
    },
}

/// Drag/zoom/reset controller for one session.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    phase: DragPhase,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Apply a pointer event. Returns the new state when the transform changed.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        state: TransformState,
        surface: SurfaceSize,
    ) -> Option<TransformState> {
        match (self.phase, event) {
            (_, PointerEvent::Down(pointer)) => {
                if surface.contains(pointer) {
                    self.phase = DragPhase::Dragging {
                        offset: pointer - state.position(),
                    };
                    log::debug!("drag start at ({:.1}, {:.1})", pointer.x, pointer.y);
                }
                None
            }
            (DragPhase::Dragging { offset }, PointerEvent::Move(pointer)) => {
                let next = state.with_position(pointer - offset);
                (next != state).then_some(next)
            }
            (DragPhase::Dragging { .. }, PointerEvent::Up | PointerEvent::Leave) => {
                self.phase = DragPhase::Idle;
                log::debug!("drag end");
                None
            }
            (DragPhase::Idle, _) => None,
        }
    }

    /// Apply one zoom press of `config.zoom_step`, clamped to the scale range.
    pub fn zoom(
        &self,
        direction: ZoomDirection,
        state: TransformState,
        config: &CropperConfig,
    ) -> TransformState {
        let delta = match direction {
            ZoomDirection::In => config.zoom_step,
            ZoomDirection::Out => -config.zoom_step,
        };
        state.zoomed(delta, config)
    }

    /// Return to the fit transform and to Idle.
    pub fn reset(
        &mut self,
        image: SurfaceSize,
        surface: SurfaceSize,
        aspect: AspectMode,
    ) -> TransformState {
        self.phase = DragPhase::Idle;
        TransformState::fit(image, surface, aspect)
    }
}
