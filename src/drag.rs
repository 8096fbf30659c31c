//! Threshold-gated header dragging.
//!
//! Explicit finite-state machine: `Idle -> Pending -> Dragging -> Idle`,
//! with `Pending -> Idle` when the pointer is released before the movement
//! threshold. The caller decides whether a pointer-down may begin a drag
//! (header hit, primary button, not maximized); the controller owns the
//! threshold and the clamped position math.

use crate::events::PointerEvent;
use crate::geometry::{self, EdgePadding, Rect, Size};

/// Movement (px, per axis) required before a pending drag becomes real.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pending {
        start_x: f64,
        start_y: f64,
        offset_x: f64,
        offset_y: f64,
    },
    Dragging {
        offset_x: f64,
        offset_y: f64,
    },
}

/// What a pointer-move did to the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    None,
    /// Threshold crossed this event: the host should suppress default
    /// handling and capture the pointer on the surface, then apply the
    /// position.
    Started { left: f64, top: f64 },
    Moved { left: f64, top: f64 },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DragState::Pending { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// True between pointer-down and pointer-up/cancel; while true the host
    /// keeps global move/up listeners attached.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Record the start coordinates and the pointer's offset from the
    /// surface top-left. No geometry changes yet.
    pub fn begin(&mut self, event: &PointerEvent, surface_rect: Rect) {
        self.state = DragState::Pending {
            start_x: event.x,
            start_y: event.y,
            offset_x: event.x - surface_rect.left,
            offset_y: event.y - surface_rect.top,
        };
        tracing::trace!(x = event.x, y = event.y, "drag pending");
    }

    /// Advance the state machine on pointer-move. Candidate positions are
    /// clamped against the live viewport before being reported.
    pub fn update(
        &mut self,
        event: &PointerEvent,
        surface_size: Size,
        viewport: Size,
        padding: EdgePadding,
    ) -> DragUpdate {
        match self.state {
            DragState::Idle => DragUpdate::None,
            DragState::Pending {
                start_x,
                start_y,
                offset_x,
                offset_y,
            } => {
                let dx = (event.x - start_x).abs();
                let dy = (event.y - start_y).abs();
                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    self.state = DragState::Dragging { offset_x, offset_y };
                    let (left, top) =
                        self.position_for(event, offset_x, offset_y, surface_size, viewport, padding);
                    tracing::debug!(left, top, "drag started");
                    DragUpdate::Started { left, top }
                } else {
                    DragUpdate::None
                }
            }
            DragState::Dragging { offset_x, offset_y } => {
                let (left, top) =
                    self.position_for(event, offset_x, offset_y, surface_size, viewport, padding);
                DragUpdate::Moved { left, top }
            }
        }
    }

    fn position_for(
        &self,
        event: &PointerEvent,
        offset_x: f64,
        offset_y: f64,
        surface_size: Size,
        viewport: Size,
        padding: EdgePadding,
    ) -> (f64, f64) {
        let candidate = Rect {
            left: event.x - offset_x,
            top: event.y - offset_y,
            width: surface_size.width,
            height: surface_size.height,
        };
        geometry::clamp(candidate, viewport, padding)
    }

    /// Pointer-up/cancel: back to `Idle`. Returns true when a drag was
    /// pending or in progress, i.e. the host should release pointer
    /// capture and detach its temporary listeners.
    pub fn release(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }
}
