//! Edge-padding normalization and viewport clamping.
//!
//! All coordinates are viewport pixels. A padding value is either a
//! non-negative pixel count or [`UNCONSTRAINED`] (`-1`), which disables the
//! bound on that edge entirely.

/// Sentinel padding value meaning "no constraint on this edge".
pub const UNCONSTRAINED: i32 = -1;

/// Default padding applied to every edge left unspecified.
pub const DEFAULT_EDGE_PADDING: i32 = 16;

/// Minimum distance (px) a popup keeps from each viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePadding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl EdgePadding {
    pub fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self::uniform(DEFAULT_EDGE_PADDING)
    }
}

/// Per-edge padding with unset edges, used both as partial configuration
/// input and as the per-edge override for the maximize rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialPadding {
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
}

impl PartialPadding {
    /// Fill unset edges from `base`.
    pub fn resolve_with(self, base: EdgePadding) -> EdgePadding {
        EdgePadding {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }
}

/// Caller-facing padding specification: a bare number broadcast to all four
/// edges, or a partial per-edge object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingSpec {
    Uniform(i32),
    Edges(PartialPadding),
}

impl Default for PaddingSpec {
    fn default() -> Self {
        Self::Uniform(DEFAULT_EDGE_PADDING)
    }
}

impl PaddingSpec {
    /// Normalize into a concrete [`EdgePadding`]. Uniform values are
    /// broadcast; missing edges fall back to [`DEFAULT_EDGE_PADDING`].
    /// Values, including `-1`, pass through unmodified.
    pub fn normalize(self) -> EdgePadding {
        match self {
            Self::Uniform(value) => EdgePadding::uniform(value),
            Self::Edges(partial) => {
                partial.resolve_with(EdgePadding::uniform(DEFAULT_EDGE_PADDING))
            }
        }
    }
}

impl From<i32> for PaddingSpec {
    fn from(value: i32) -> Self {
        Self::Uniform(value)
    }
}

impl From<PartialPadding> for PaddingSpec {
    fn from(partial: PartialPadding) -> Self {
        Self::Edges(partial)
    }
}

/// Popup surface geometry in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Clamp a single-axis coordinate into the padded viewport.
///
/// With both edges unconstrained the candidate is returned untouched. The
/// far bound is `viewport_extent - extent - far_padding`, but it is never
/// allowed to fall below the near bound; on a viewport smaller than the
/// rect plus its padding, the coordinate collapses to the near edge so the
/// header stays reachable.
pub fn clamp_axis(candidate: f64, extent: f64, viewport_extent: f64, near: i32, far: i32) -> f64 {
    if near == UNCONSTRAINED && far == UNCONSTRAINED {
        return candidate;
    }
    let min_edge = (near != UNCONSTRAINED).then(|| f64::from(near));
    let max_edge = (far != UNCONSTRAINED).then(|| viewport_extent - extent - f64::from(far));

    let mut value = candidate;
    if let Some(max) = max_edge {
        let max = max.max(min_edge.unwrap_or(0.0));
        if value > max {
            value = max;
        }
    }
    if let Some(min) = min_edge
        && value < min
    {
        value = min;
    }
    value
}

/// Clamp the rect's top-left corner into the padded viewport, one axis at a
/// time. Idempotent: clamping an already-clamped rect is a no-op.
pub fn clamp(rect: Rect, viewport: Size, padding: EdgePadding) -> (f64, f64) {
    let left = clamp_axis(
        rect.left,
        rect.width,
        viewport.width,
        padding.left,
        padding.right,
    );
    let top = clamp_axis(
        rect.top,
        rect.height,
        viewport.height,
        padding.top,
        padding.bottom,
    );
    (left, top)
}
