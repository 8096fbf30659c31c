//! Header chrome metrics and hit-testing.
//!
//! The header spans the top of the surface; the button cluster sits at its
//! right edge with the close button outermost and the maximize/restore
//! button (when visible) to its left. Hits inside the cluster but not on a
//! button still count as cluster hits so the exclusion rules for drag and
//! double-activation hold for the whole region.

use crate::geometry::Rect;

pub const HEADER_HEIGHT: f64 = 40.0;
pub const BUTTON_SIZE: f64 = 28.0;
pub const BUTTON_GAP: f64 = 4.0;
pub const HEADER_PADDING_X: f64 = 10.0;
pub const BORDER_RADIUS: f64 = 12.0;

pub const MAXIMIZE_GLYPH: &str = "□";
pub const RESTORE_GLYPH: &str = "❐";

/// Title inset applied on platforms with left-aligned native controls.
pub const SHELL_TITLE_INSET: f64 = 70.0;
/// Button-cluster inset applied on platforms with right-aligned controls.
pub const SHELL_BUTTONS_INSET: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    /// Draggable header area (also the double-activation region).
    Drag,
    Close,
    MaximizeRestore,
    /// Inside the button cluster but not on a button.
    Cluster,
    /// Inside the surface but below the header.
    Body,
    Outside,
}

fn contains(rect: Rect, x: f64, y: f64) -> bool {
    x >= rect.left && x < rect.left + rect.width && y >= rect.top && y < rect.top + rect.height
}

fn button_rect(right_edge: f64, header_top: f64) -> Rect {
    Rect {
        left: right_edge - BUTTON_SIZE,
        top: header_top + (HEADER_HEIGHT - BUTTON_SIZE) / 2.0,
        width: BUTTON_SIZE,
        height: BUTTON_SIZE,
    }
}

/// Map a pointer position to a header region of the given surface rect.
pub fn hit_test(rect: Rect, max_button_visible: bool, x: f64, y: f64) -> HeaderHit {
    if !contains(rect, x, y) {
        return HeaderHit::Outside;
    }
    let header = Rect {
        left: rect.left,
        top: rect.top,
        width: rect.width,
        height: HEADER_HEIGHT.min(rect.height),
    };
    if !contains(header, x, y) {
        return HeaderHit::Body;
    }

    let close = button_rect(rect.left + rect.width - HEADER_PADDING_X, rect.top);
    let cluster_left = if max_button_visible {
        close.left - BUTTON_GAP - BUTTON_SIZE
    } else {
        close.left
    };
    let cluster = Rect {
        left: cluster_left,
        top: header.top,
        width: rect.left + rect.width - cluster_left,
        height: header.height,
    };
    if contains(cluster, x, y) {
        if contains(close, x, y) {
            return HeaderHit::Close;
        }
        if max_button_visible {
            let max_restore = button_rect(close.left - BUTTON_GAP, rect.top);
            if contains(max_restore, x, y) {
                return HeaderHit::MaximizeRestore;
            }
        }
        return HeaderHit::Cluster;
    }
    HeaderHit::Drag
}
