//! Host-supplied input events and viewport snapshots.
//!
//! Events carry their own timestamp so timing-sensitive detectors stay
//! deterministic under test; a live host fills it with `Instant::now()`.

use std::time::Instant;

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
    /// No button state change (synthesized moves, touch).
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub at: Instant,
    pub kind: PointerKind,
    pub button: PointerButton,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            at: Instant::now(),
            kind,
            button,
            x,
            y,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, PointerButton::Primary, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, PointerButton::None, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, PointerButton::Primary, x, y)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Cancel, PointerButton::None, x, y)
    }

    pub fn at(mut self, at: Instant) -> Self {
        self.at = at;
        self
    }
}

/// Snapshot of the hosting viewport, refreshed by the host on resize and
/// fullscreen-change signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Inner width of the hosting window, in px.
    pub width: f64,
    /// Inner height of the hosting window, in px.
    pub height: f64,
    /// Physical screen width, in px.
    pub screen_width: f64,
    /// Whether a standard fullscreen-element API reports an active
    /// fullscreen element.
    pub fullscreen_element: bool,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            screen_width: width,
            fullscreen_element: false,
        }
    }

    pub fn with_screen_width(mut self, screen_width: f64) -> Self {
        self.screen_width = screen_width;
        self
    }

    pub fn with_fullscreen_element(mut self, active: bool) -> Self {
        self.fullscreen_element = active;
        self
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}
