//! Construction-time configuration.
//!
//! The configuration is consumed once by [`crate::PopupWindow::new`];
//! runtime changes go through explicit setters on the façade rather than
//! mutating a live options object.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::geometry::{PaddingSpec, PartialPadding};

/// Visual theme. Anything unrecognized degrades to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a theme name; unknown values fall back to light.
    pub fn parse(name: &str) -> Self {
        match name {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Class-name suffix, as in `popup-dark`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Body content: literal markup or a producer invoked on every
/// [`crate::PopupWindow::set_content`].
pub enum Content {
    Empty,
    Markup(String),
    Builder(Box<dyn Fn() -> String>),
}

impl Content {
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Markup(markup) => markup.clone(),
            Self::Builder(builder) => builder(),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Content::Empty"),
            Self::Markup(markup) => f.debug_tuple("Content::Markup").field(markup).finish(),
            Self::Builder(_) => f.write_str("Content::Builder(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

impl From<String> for Content {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

pub type Callback = Box<dyn FnMut()>;
/// Async close gate; `close()` awaits it and aborts on `false`.
pub type CloseGuard = Box<dyn Fn() -> Pin<Box<dyn Future<Output = bool>>>>;
pub type DestroyGuard = Box<dyn Fn() -> bool>;

/// Identification strings of the surrounding shell, used once at
/// construction to pick the platform family for shell-compatibility mode.
#[derive(Debug, Clone, Default)]
pub struct ShellInfo {
    pub user_agent: String,
    pub platform: String,
}

pub struct PopupConfig {
    pub class_name: String,
    pub theme: Theme,
    pub edge_padding: PaddingSpec,
    pub content: Content,
    /// Center into the viewport on mount.
    pub center: bool,
    /// Initial width in px; unset leaves the intrinsic size.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title: String,
    pub draggable: bool,
    pub show_maximize_restore_button: bool,
    /// Enable the desktop-shell compatibility observer.
    pub shell_compatible: bool,
    pub shell_info: ShellInfo,
    /// Per-edge override for the maximized rectangle; unset edges fall
    /// back to the instance padding.
    pub maximize_edge_padding: Option<PartialPadding>,
    pub z_index: i64,
    pub can_close: Option<CloseGuard>,
    pub can_destroy: Option<DestroyGuard>,
    pub on_open: Option<Callback>,
    pub on_max: Option<Callback>,
    pub on_restore: Option<Callback>,
    pub on_close: Option<Callback>,
    pub on_maximize: Option<Callback>,
    pub on_maximize_restore: Option<Callback>,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            class_name: "popup".to_string(),
            theme: Theme::Light,
            edge_padding: PaddingSpec::default(),
            content: Content::Empty,
            center: true,
            width: None,
            height: None,
            title: String::new(),
            draggable: true,
            show_maximize_restore_button: false,
            shell_compatible: false,
            shell_info: ShellInfo::default(),
            maximize_edge_padding: None,
            z_index: 9999,
            can_close: None,
            can_destroy: None,
            on_open: None,
            on_max: None,
            on_restore: None,
            on_close: None,
            on_maximize: None,
            on_maximize_restore: None,
        }
    }
}

impl fmt::Debug for PopupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupConfig")
            .field("class_name", &self.class_name)
            .field("theme", &self.theme)
            .field("edge_padding", &self.edge_padding)
            .field("center", &self.center)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("draggable", &self.draggable)
            .field(
                "show_maximize_restore_button",
                &self.show_maximize_restore_button,
            )
            .field("shell_compatible", &self.shell_compatible)
            .field("maximize_edge_padding", &self.maximize_edge_padding)
            .field("z_index", &self.z_index)
            .finish_non_exhaustive()
    }
}
