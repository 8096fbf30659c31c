//! Maximize/restore state machine.
//!
//! `maximize` captures a snapshot of the surface's geometry styles (inline
//! values, computed fallback) and applies a padded full-viewport rectangle;
//! `restore` writes the snapshot back verbatim, no recomputation. The
//! snapshot exists exactly while maximized.

use crate::geometry::{EdgePadding, PartialPadding};
use crate::surface::{StyleValue, Surface};

/// Geometry styles saved immediately before maximizing, restored verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub top: StyleValue,
    pub left: StyleValue,
    pub width: StyleValue,
    pub height: StyleValue,
    pub max_height: StyleValue,
    pub border_radius: StyleValue,
}

impl GeometrySnapshot {
    fn capture(surface: &Surface) -> Self {
        Self {
            top: surface.effective_top(),
            left: surface.effective_left(),
            width: surface.effective_width(),
            height: surface.effective_height(),
            max_height: surface.effective_max_height(),
            border_radius: surface.effective_border_radius(),
        }
    }
}

/// Which side of the toggle fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeChange {
    Maximized,
    Restored,
    None,
}

#[derive(Debug, Default)]
pub struct MaximizeRestore {
    snapshot: Option<GeometrySnapshot>,
}

pub const MAXIMIZED_MODIFIER: &str = "maximized";

impl MaximizeRestore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_maximized(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.snapshot.as_ref()
    }

    /// No-op when already maximized; the held snapshot is never
    /// overwritten.
    pub fn maximize(
        &mut self,
        surface: &mut Surface,
        padding: EdgePadding,
        override_padding: Option<PartialPadding>,
    ) -> bool {
        if self.snapshot.is_some() {
            return false;
        }
        self.snapshot = Some(GeometrySnapshot::capture(surface));
        self.apply_maximized_rect(surface, padding, override_padding);
        surface.set_header_modifier(MAXIMIZED_MODIFIER, true);
        tracing::debug!(popup = surface.class_name(), "maximized");
        true
    }

    /// No-op when not maximized.
    pub fn restore(&mut self, surface: &mut Surface) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        let inline = surface.inline_mut();
        inline.top = Some(snapshot.top);
        inline.left = Some(snapshot.left);
        inline.width = Some(snapshot.width);
        inline.height = Some(snapshot.height);
        inline.max_height = Some(snapshot.max_height);
        inline.border_radius = Some(snapshot.border_radius);
        surface.set_header_modifier(MAXIMIZED_MODIFIER, false);
        tracing::debug!(popup = surface.class_name(), "restored");
        true
    }

    pub fn toggle(
        &mut self,
        surface: &mut Surface,
        padding: EdgePadding,
        override_padding: Option<PartialPadding>,
    ) -> MaximizeChange {
        if self.is_maximized() {
            if self.restore(surface) {
                MaximizeChange::Restored
            } else {
                MaximizeChange::None
            }
        } else if self.maximize(surface, padding, override_padding) {
            MaximizeChange::Maximized
        } else {
            MaximizeChange::None
        }
    }

    /// Re-apply the maximized rectangle from padding after a viewport
    /// resize. The snapshot is untouched.
    pub fn reapply(
        &self,
        surface: &mut Surface,
        padding: EdgePadding,
        override_padding: Option<PartialPadding>,
    ) {
        if self.snapshot.is_some() {
            self.apply_maximized_rect(surface, padding, override_padding);
        }
    }

    fn apply_maximized_rect(
        &self,
        surface: &mut Surface,
        padding: EdgePadding,
        override_padding: Option<PartialPadding>,
    ) {
        let padding = override_padding
            .map(|partial| partial.resolve_with(padding))
            .unwrap_or(padding);
        let horizontal = f64::from(padding.left + padding.right);
        let vertical = f64::from(padding.top + padding.bottom);
        let inline = surface.inline_mut();
        inline.top = Some(StyleValue::Px(f64::from(padding.top)));
        inline.left = Some(StyleValue::Px(f64::from(padding.left)));
        inline.width = Some(StyleValue::CalcFullMinus(horizontal));
        inline.height = Some(StyleValue::CalcViewportMinus(vertical));
        inline.max_height = Some(StyleValue::CalcViewportMinus(vertical));
        inline.border_radius = Some(StyleValue::Px(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome;
    use crate::config::Theme;

    fn surface() -> Surface {
        let mut surface = Surface::new("popup", Theme::Light);
        surface.set_position(350.0, 300.0);
        surface.set_size(Some(300.0), Some(200.0));
        surface
    }

    #[test]
    fn maximize_then_restore_round_trips_every_field() {
        let mut surface = surface();
        let before = *surface.inline();
        let mut controller = MaximizeRestore::new();

        assert!(controller.maximize(&mut surface, EdgePadding::uniform(16), None));
        assert!(controller.is_maximized());
        assert_eq!(surface.inline().width, Some(StyleValue::CalcFullMinus(32.0)));
        assert_eq!(
            surface.inline().max_height,
            Some(StyleValue::CalcViewportMinus(32.0))
        );
        assert_eq!(surface.inline().border_radius, Some(StyleValue::Px(0.0)));
        assert!(surface.has_header_modifier(MAXIMIZED_MODIFIER));

        assert!(controller.restore(&mut surface));
        assert_eq!(surface.inline().top, before.top);
        assert_eq!(surface.inline().left, before.left);
        assert_eq!(surface.inline().width, before.width);
        assert_eq!(surface.inline().height, before.height);
        // unset before maximize, so the computed fallbacks come back inline
        assert_eq!(surface.inline().max_height, Some(StyleValue::Auto));
        assert_eq!(
            surface.inline().border_radius,
            Some(StyleValue::Px(chrome::BORDER_RADIUS))
        );
        assert!(!controller.is_maximized());
        assert!(!surface.has_header_modifier(MAXIMIZED_MODIFIER));
    }

    #[test]
    fn double_maximize_keeps_the_first_snapshot() {
        let mut surface = surface();
        let mut controller = MaximizeRestore::new();
        assert!(controller.maximize(&mut surface, EdgePadding::uniform(16), None));
        let snapshot = *controller.snapshot().unwrap();
        assert!(!controller.maximize(&mut surface, EdgePadding::uniform(16), None));
        assert_eq!(controller.snapshot(), Some(&snapshot));
    }

    #[test]
    fn restore_without_maximize_is_a_silent_noop() {
        let mut surface = surface();
        let before = *surface.inline();
        let mut controller = MaximizeRestore::new();
        assert!(!controller.restore(&mut surface));
        assert_eq!(*surface.inline(), before);
    }

    #[test]
    fn override_padding_falls_back_per_edge() {
        let mut surface = surface();
        let mut controller = MaximizeRestore::new();
        let override_padding = PartialPadding {
            top: Some(40),
            ..Default::default()
        };
        controller.maximize(&mut surface, EdgePadding::uniform(16), Some(override_padding));
        assert_eq!(surface.inline().top, Some(StyleValue::Px(40.0)));
        assert_eq!(surface.inline().left, Some(StyleValue::Px(16.0)));
        assert_eq!(surface.inline().width, Some(StyleValue::CalcFullMinus(32.0)));
        assert_eq!(
            surface.inline().height,
            Some(StyleValue::CalcViewportMinus(56.0))
        );
    }
}
