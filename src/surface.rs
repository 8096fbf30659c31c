//! The owned surface model.
//!
//! The engine does not render anything itself; it maintains the popup's
//! surface as data (inline styles, class modifiers, visibility, chrome
//! state, content markup) which the embedding host mirrors into its visual
//! tree after each handled event or frame.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::Theme;
use crate::geometry::{Rect, Size};

/// A CSS-like length as stored in an inline style. `Display` produces the
/// exact serialization a stylesheet-driven host would apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Px(f64),
    Percent(f64),
    /// `calc(100% - Npx)`
    CalcFullMinus(f64),
    /// `calc(100vh - Npx)`
    CalcViewportMinus(f64),
    Auto,
}

fn fmt_px(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Px(px) => {
                fmt_px(px, f)?;
                write!(f, "px")
            }
            Self::Percent(pct) => {
                fmt_px(pct, f)?;
                write!(f, "%")
            }
            Self::CalcFullMinus(px) => {
                write!(f, "calc(100% - ")?;
                fmt_px(px, f)?;
                write!(f, "px)")
            }
            Self::CalcViewportMinus(px) => {
                write!(f, "calc(100vh - ")?;
                fmt_px(px, f)?;
                write!(f, "px)")
            }
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl StyleValue {
    /// Resolve to pixels against the relevant viewport extent. `Auto` has
    /// no resolved value.
    pub fn resolve(self, basis: f64) -> Option<f64> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(pct) => Some(basis * pct / 100.0),
            Self::CalcFullMinus(px) | Self::CalcViewportMinus(px) => Some(basis - px),
            Self::Auto => None,
        }
    }
}

/// Inline geometry styles. `None` means the property was never set inline
/// and the computed value applies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub top: Option<StyleValue>,
    pub left: Option<StyleValue>,
    pub width: Option<StyleValue>,
    pub height: Option<StyleValue>,
    pub max_height: Option<StyleValue>,
    pub border_radius: Option<StyleValue>,
}

/// Computed-style fallbacks used when an inline property is unset, the
/// analogue of reading the host's computed style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub top: StyleValue,
    pub left: StyleValue,
    pub width: StyleValue,
    pub height: StyleValue,
    pub max_height: StyleValue,
    pub border_radius: StyleValue,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            top: StyleValue::Px(0.0),
            left: StyleValue::Px(0.0),
            width: StyleValue::Auto,
            height: StyleValue::Auto,
            max_height: StyleValue::Auto,
            border_radius: StyleValue::Px(crate::chrome::BORDER_RADIUS),
        }
    }
}

/// Fallback layout size when neither an inline nor a resolvable computed
/// size exists; keeps centering and clamping well-defined before the host
/// has measured real content. Width matches the stylesheet's `min-width`.
pub const INTRINSIC_SIZE: Size = Size {
    width: 240.0,
    height: 120.0,
};

#[derive(Debug)]
pub struct Surface {
    class_name: String,
    theme: Theme,
    title: String,
    markup: String,
    inline: InlineStyle,
    computed: ComputedStyle,
    header_modifiers: BTreeSet<&'static str>,
    visible: bool,
    z_index: i64,
    max_restore_button_visible: bool,
    pointer_captured: bool,
}

impl Surface {
    pub fn new(class_name: impl Into<String>, theme: Theme) -> Self {
        Self {
            class_name: class_name.into(),
            theme,
            title: String::new(),
            markup: String::new(),
            inline: InlineStyle::default(),
            computed: ComputedStyle::default(),
            header_modifiers: BTreeSet::new(),
            visible: true,
            z_index: 9999,
            max_restore_button_visible: false,
            pointer_captured: false,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Root class list, e.g. `"popup popup-dark"`.
    pub fn class_list(&self) -> String {
        format!(
            "{cls} {cls}-{theme}",
            cls = self.class_name,
            theme = self.theme.suffix()
        )
    }

    /// Header class list including active modifiers, e.g.
    /// `"popup__header popup__header--maximized"`.
    pub fn header_class_list(&self) -> String {
        let mut out = format!("{}__header", self.class_name);
        for modifier in &self.header_modifiers {
            out.push(' ');
            out.push_str(&format!("{}__header--{modifier}", self.class_name));
        }
        out
    }

    pub fn set_header_modifier(&mut self, modifier: &'static str, on: bool) {
        if on {
            self.header_modifiers.insert(modifier);
        } else {
            self.header_modifiers.remove(modifier);
        }
    }

    pub fn has_header_modifier(&self, modifier: &str) -> bool {
        self.header_modifiers.contains(modifier)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Replace the body content atomically.
    pub fn set_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn z_index(&self) -> i64 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i64) {
        self.z_index = z_index;
    }

    pub fn max_restore_button_visible(&self) -> bool {
        self.max_restore_button_visible
    }

    /// Glyph for the maximize/restore button in its current state: the
    /// button offers the action that is not yet in effect.
    pub fn max_restore_glyph(&self) -> &'static str {
        if self.has_header_modifier(crate::maximize::MAXIMIZED_MODIFIER) {
            crate::chrome::RESTORE_GLYPH
        } else {
            crate::chrome::MAXIMIZE_GLYPH
        }
    }

    pub fn set_max_restore_button_visible(&mut self, visible: bool) {
        self.max_restore_button_visible = visible;
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    pub fn inline(&self) -> &InlineStyle {
        &self.inline
    }

    pub fn inline_mut(&mut self) -> &mut InlineStyle {
        &mut self.inline
    }

    pub fn set_position(&mut self, left: f64, top: f64) {
        self.inline.left = Some(StyleValue::Px(left));
        self.inline.top = Some(StyleValue::Px(top));
    }

    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        if let Some(width) = width {
            self.inline.width = Some(StyleValue::Px(width));
        }
        if let Some(height) = height {
            self.inline.height = Some(StyleValue::Px(height));
        }
    }

    /// Inline value with computed fallback, per geometry property.
    pub fn effective_top(&self) -> StyleValue {
        self.inline.top.unwrap_or(self.computed.top)
    }

    pub fn effective_left(&self) -> StyleValue {
        self.inline.left.unwrap_or(self.computed.left)
    }

    pub fn effective_width(&self) -> StyleValue {
        self.inline.width.unwrap_or(self.computed.width)
    }

    pub fn effective_height(&self) -> StyleValue {
        self.inline.height.unwrap_or(self.computed.height)
    }

    pub fn effective_max_height(&self) -> StyleValue {
        self.inline.max_height.unwrap_or(self.computed.max_height)
    }

    pub fn effective_border_radius(&self) -> StyleValue {
        self.inline
            .border_radius
            .unwrap_or(self.computed.border_radius)
    }

    /// Resolve the current styles to a pixel rect against the viewport,
    /// the analogue of `getBoundingClientRect`.
    pub fn bounding_rect(&self, viewport: Size) -> Rect {
        Rect {
            left: self
                .effective_left()
                .resolve(viewport.width)
                .unwrap_or(0.0),
            top: self
                .effective_top()
                .resolve(viewport.height)
                .unwrap_or(0.0),
            width: self
                .effective_width()
                .resolve(viewport.width)
                .unwrap_or(INTRINSIC_SIZE.width),
            height: self
                .effective_height()
                .resolve(viewport.height)
                .unwrap_or(INTRINSIC_SIZE.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_value_serialization() {
        assert_eq!(StyleValue::Px(16.0).to_string(), "16px");
        assert_eq!(StyleValue::Px(0.0).to_string(), "0px");
        assert_eq!(StyleValue::Px(16.5).to_string(), "16.5px");
        assert_eq!(
            StyleValue::CalcFullMinus(32.0).to_string(),
            "calc(100% - 32px)"
        );
        assert_eq!(
            StyleValue::CalcViewportMinus(32.0).to_string(),
            "calc(100vh - 32px)"
        );
        assert_eq!(StyleValue::Auto.to_string(), "auto");
    }

    #[test]
    fn calc_values_track_their_basis() {
        assert_eq!(StyleValue::CalcFullMinus(32.0).resolve(1000.0), Some(968.0));
        assert_eq!(
            StyleValue::CalcViewportMinus(32.0).resolve(800.0),
            Some(768.0)
        );
        assert_eq!(StyleValue::Auto.resolve(1000.0), None);
    }

    #[test]
    fn bounding_rect_falls_back_to_intrinsic_size() {
        let surface = Surface::new("popup", Theme::Light);
        let rect = surface.bounding_rect(Size {
            width: 1000.0,
            height: 800.0,
        });
        assert_eq!(rect.width, INTRINSIC_SIZE.width);
        assert_eq!(rect.height, INTRINSIC_SIZE.height);
        assert_eq!((rect.left, rect.top), (0.0, 0.0));
    }

    #[test]
    fn header_class_list_includes_modifiers() {
        let mut surface = Surface::new("popup", Theme::Dark);
        assert_eq!(surface.class_list(), "popup popup-dark");
        surface.set_header_modifier("maximized", true);
        surface.set_header_modifier("shell-mac", true);
        assert_eq!(
            surface.header_class_list(),
            "popup__header popup__header--maximized popup__header--shell-mac"
        );
        surface.set_header_modifier("shell-mac", false);
        assert_eq!(
            surface.header_class_list(),
            "popup__header popup__header--maximized"
        );
    }
}
