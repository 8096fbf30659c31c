//! Desktop-shell compatibility mode.
//!
//! When the popup is embedded in a shell window whose native title bar
//! overlays the top of the viewport (traffic lights on the left, window
//! controls on the right), a maximized popup's header must inset its title
//! or button cluster, unless the shell is in true OS fullscreen where the
//! native controls are hidden.

use crate::events::Viewport;
use crate::surface::Surface;

/// Inner width within this many px of the physical screen width counts as
/// fullscreen even when no fullscreen-element API fired.
pub const FULLSCREEN_WIDTH_TOLERANCE: f64 = 5.0;

pub const SHELL_MAC_MODIFIER: &str = "shell-mac";
pub const SHELL_WIN_MODIFIER: &str = "shell-win";

/// Host platform family, detected once at construction and fixed for the
/// instance's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Left-aligned native controls; the title gets inset.
    Mac,
    /// Right-aligned native controls; the button cluster gets inset.
    Windows,
    Other,
}

impl Platform {
    pub fn detect(user_agent: &str, platform: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let plat = platform.to_ascii_lowercase();
        if ["mac", "iphone", "ipod", "ipad"]
            .iter()
            .any(|needle| plat.contains(needle))
            || ua.contains("mac")
        {
            Self::Mac
        } else if plat.contains("win") || ua.contains("windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Mac => Some(SHELL_MAC_MODIFIER),
            Self::Windows => Some(SHELL_WIN_MODIFIER),
            Self::Other => None,
        }
    }
}

/// True OS/browser fullscreen: a fullscreen-element API reports an active
/// element, or the inner width sits within tolerance of the physical
/// screen width (shells whose native fullscreen hides chrome without
/// firing a fullscreen API event).
pub fn is_truly_fullscreen(viewport: &Viewport) -> bool {
    viewport.fullscreen_element
        || (viewport.width - viewport.screen_width).abs() < FULLSCREEN_WIDTH_TOLERANCE
}

/// Observer half of shell-compatibility mode. Resize and fullscreen-change
/// signals only schedule a recomputation; the façade's per-frame tick
/// performs it, so many signals in one frame coalesce into one pass.
#[derive(Debug)]
pub struct ShellCompat {
    platform: Platform,
    pending: bool,
}

impl ShellCompat {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            pending: false,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Arm a recomputation for the next frame. Re-arming replaces the
    /// pending request rather than stacking another.
    pub fn schedule(&mut self) {
        self.pending = true;
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Run the scheduled recomputation, if any. Returns true when a pass
    /// actually ran.
    pub fn on_frame(&mut self, maximized: bool, viewport: &Viewport, surface: &mut Surface) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.refresh(maximized, viewport, surface);
        true
    }

    /// Immediate re-evaluation, used on maximize/restore transitions.
    pub fn refresh(&mut self, maximized: bool, viewport: &Viewport, surface: &mut Surface) {
        let apply = maximized && !is_truly_fullscreen(viewport);
        self.apply(surface, apply);
    }

    fn apply(&self, surface: &mut Surface, on: bool) {
        let Some(modifier) = self.platform.modifier() else {
            return;
        };
        if surface.has_header_modifier(modifier) != on {
            tracing::debug!(popup = surface.class_name(), modifier, on, "shell inset");
        }
        surface.set_header_modifier(modifier, on);
    }

    /// Detach everything as a single unit: clear modifiers and any pending
    /// recomputation.
    pub fn release(&mut self, surface: &mut Surface) {
        self.pending = false;
        self.apply(surface, false);
    }
}
