//! The popup window façade.
//!
//! Owns one [`Surface`] and wires the drag, activation, maximize/restore
//! and shell-compatibility controllers to it. The host feeds pointer and
//! viewport events, calls [`PopupWindow::on_frame`] once per rendering
//! frame, and mirrors the surface model after anything was handled.

use crate::activation::ActivationDetector;
use crate::chrome::{self, HeaderHit};
use crate::config::{Callback, CloseGuard, Content, DestroyGuard, PopupConfig, Theme};
use crate::drag::{DragController, DragUpdate};
use crate::events::{PointerButton, PointerEvent, PointerKind, Viewport};
use crate::geometry::{self, EdgePadding, PaddingSpec, PartialPadding, Rect};
use crate::maximize::{MaximizeChange, MaximizeRestore};
use crate::shell_compat::{Platform, ShellCompat};
use crate::stylesheet;
use crate::surface::Surface;

/// Interaction-state snapshot. At most one of `is_drag_pending` /
/// `is_dragging` is true at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopupState {
    pub is_maximized: bool,
    pub is_dragging: bool,
    pub is_drag_pending: bool,
}

/// Result of feeding one pointer event.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Not for this popup.
    Ignored,
    Handled,
    /// Pointer-up on the close button. Closing is gated by the async
    /// `can_close` guard, so the host must drive `close().await`.
    CloseRequested,
}

/// Event streams the instance currently wants from the host. Acquired at
/// construction, released as a unit on destroy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subscriptions {
    pub viewport_resize: bool,
    pub fullscreen_change: bool,
}

pub struct PopupWindow {
    surface: Surface,
    viewport: Viewport,
    padding: EdgePadding,
    maximize_override: Option<PartialPadding>,
    draggable: bool,
    show_max_restore_button: bool,
    drag: DragController,
    activation: ActivationDetector,
    maximize: MaximizeRestore,
    shell: Option<ShellCompat>,
    subscriptions: Subscriptions,
    injected_css: Option<String>,
    needs_reclamp: bool,
    destroyed: bool,
    can_close: Option<CloseGuard>,
    can_destroy: Option<DestroyGuard>,
    on_open: Option<Callback>,
    on_max: Option<Callback>,
    on_restore: Option<Callback>,
    on_close: Option<Callback>,
    on_maximize: Option<Callback>,
    on_maximize_restore: Option<Callback>,
}

fn fire(callback: &mut Option<Callback>) {
    if let Some(callback) = callback.as_mut() {
        callback();
    }
}

impl PopupWindow {
    /// Construct and mount: the surface is immediately part of the host's
    /// tree, clamped into the viewport and centered when requested.
    pub fn new(config: PopupConfig, viewport: Viewport) -> Self {
        let shell = config.shell_compatible.then(|| {
            ShellCompat::new(Platform::detect(
                &config.shell_info.user_agent,
                &config.shell_info.platform,
            ))
        });
        let injected_css = stylesheet::claim(&config.class_name);

        let mut surface = Surface::new(config.class_name, config.theme);
        surface.set_title(config.title);
        surface.set_markup(config.content.render());
        surface.set_z_index(config.z_index);
        surface.set_size(config.width, config.height);

        let subscriptions = Subscriptions {
            viewport_resize: true,
            fullscreen_change: shell.is_some(),
        };

        let mut popup = Self {
            surface,
            viewport,
            padding: config.edge_padding.normalize(),
            maximize_override: config.maximize_edge_padding,
            draggable: config.draggable,
            show_max_restore_button: config.show_maximize_restore_button,
            drag: DragController::new(),
            activation: ActivationDetector::new(),
            maximize: MaximizeRestore::new(),
            shell,
            subscriptions,
            injected_css,
            needs_reclamp: false,
            destroyed: false,
            can_close: config.can_close,
            can_destroy: config.can_destroy,
            on_open: config.on_open,
            on_max: config.on_max,
            on_restore: config.on_restore,
            on_close: config.on_close,
            on_maximize: config.on_maximize,
            on_maximize_restore: config.on_maximize_restore,
        };
        if config.center {
            popup.center();
        } else {
            popup.reclamp_now();
        }
        tracing::debug!(
            popup = popup.surface.class_name(),
            centered = config.center,
            "popup mounted"
        );
        popup
    }

    pub fn state(&self) -> PopupState {
        PopupState {
            is_maximized: self.maximize.is_maximized(),
            is_dragging: self.drag.is_dragging(),
            is_drag_pending: self.drag.is_pending(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True while a drag is pending or in progress; the host attaches its
    /// global pointer-move/up listeners exactly while this holds.
    pub fn wants_global_pointer(&self) -> bool {
        self.drag.is_active()
    }

    /// The generated stylesheet, present only on the first popup of a
    /// class name in this process.
    pub fn take_stylesheet(&mut self) -> Option<String> {
        self.injected_css.take()
    }

    pub fn edge_padding(&self) -> EdgePadding {
        self.padding
    }

    /// Current surface geometry resolved against the live viewport.
    pub fn bounding_rect(&self) -> Rect {
        self.surface.bounding_rect(self.viewport.size())
    }

    /// Feed one pointer event from the host's input stream. A hidden
    /// surface receives no pointer events, so a closed popup ignores the
    /// stream until it is opened again.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerOutcome {
        if self.destroyed || !self.surface.visible() {
            return PointerOutcome::Ignored;
        }
        let rect = self.bounding_rect();
        let hit = chrome::hit_test(
            rect,
            self.surface.max_restore_button_visible(),
            event.x,
            event.y,
        );
        match event.kind {
            PointerKind::Down => self.on_pointer_down(event, rect, hit),
            PointerKind::Move => self.on_pointer_move(event, rect, hit),
            PointerKind::Up | PointerKind::Cancel => self.on_pointer_up(event, hit),
        }
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        rect: Rect,
        hit: HeaderHit,
    ) -> PointerOutcome {
        match hit {
            HeaderHit::Outside => PointerOutcome::Ignored,
            // Buttons and the cluster never start a drag and never count
            // as an activation.
            HeaderHit::Close | HeaderHit::MaximizeRestore | HeaderHit::Cluster => {
                PointerOutcome::Handled
            }
            HeaderHit::Drag => {
                let primary = matches!(
                    event.button,
                    PointerButton::Primary | PointerButton::None
                );
                if self.draggable && primary && !self.maximize.is_maximized() {
                    self.drag.begin(event, rect);
                }
                PointerOutcome::Handled
            }
            HeaderHit::Body => PointerOutcome::Handled,
        }
    }

    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        rect: Rect,
        hit: HeaderHit,
    ) -> PointerOutcome {
        let surface_size = geometry::Size {
            width: rect.width,
            height: rect.height,
        };
        match self
            .drag
            .update(event, surface_size, self.viewport.size(), self.padding)
        {
            DragUpdate::Started { left, top } => {
                self.surface.set_pointer_captured(true);
                self.surface.set_position(left, top);
                PointerOutcome::Handled
            }
            DragUpdate::Moved { left, top } => {
                self.surface.set_position(left, top);
                PointerOutcome::Handled
            }
            DragUpdate::None => {
                if hit == HeaderHit::Outside {
                    PointerOutcome::Ignored
                } else {
                    PointerOutcome::Handled
                }
            }
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, hit: HeaderHit) -> PointerOutcome {
        let was_dragging = self.drag.is_dragging();
        let was_active = self.drag.release();
        if was_active {
            self.surface.set_pointer_captured(false);
        }
        if event.kind == PointerKind::Cancel {
            return if was_active {
                PointerOutcome::Handled
            } else {
                PointerOutcome::Ignored
            };
        }
        match hit {
            HeaderHit::Close => {
                if was_dragging {
                    // the pointer was captured for the drag; its release
                    // does not activate the button it happens to land on
                    PointerOutcome::Handled
                } else {
                    PointerOutcome::CloseRequested
                }
            }
            HeaderHit::MaximizeRestore => {
                if !was_dragging {
                    self.toggle_maximize_restore();
                }
                PointerOutcome::Handled
            }
            HeaderHit::Drag => {
                // Independent of the drag controller: a fast drag-and-release
                // inside the window both moves the popup and toggles.
                if self.activation.observe(event.at) {
                    self.toggle_maximize_restore();
                }
                PointerOutcome::Handled
            }
            HeaderHit::Cluster | HeaderHit::Body => PointerOutcome::Handled,
            HeaderHit::Outside => {
                if was_active {
                    PointerOutcome::Handled
                } else {
                    PointerOutcome::Ignored
                }
            }
        }
    }

    pub fn is_maximized(&self) -> bool {
        self.maximize.is_maximized()
    }

    /// Maximize into the padded viewport. Silent no-op when already
    /// maximized.
    pub fn maximize(&mut self) {
        if self
            .maximize
            .maximize(&mut self.surface, self.padding, self.maximize_override)
        {
            self.sync_max_restore_button();
            self.shell_refresh();
            fire(&mut self.on_maximize);
            fire(&mut self.on_max);
        }
    }

    /// Restore the pre-maximize geometry verbatim. Silent no-op when not
    /// maximized.
    pub fn restore(&mut self) {
        self.restore_if_maximized();
    }

    pub fn toggle_maximize(&mut self) {
        self.toggle_maximize_restore();
    }

    fn toggle_maximize_restore(&mut self) {
        match self
            .maximize
            .toggle(&mut self.surface, self.padding, self.maximize_override)
        {
            MaximizeChange::Maximized => {
                self.sync_max_restore_button();
                self.shell_refresh();
                fire(&mut self.on_maximize);
                fire(&mut self.on_max);
            }
            MaximizeChange::Restored => {
                self.sync_max_restore_button();
                self.shell_refresh();
                fire(&mut self.on_maximize_restore);
                fire(&mut self.on_restore);
            }
            MaximizeChange::None => {}
        }
    }

    // The maximize/restore button exists only when configured and is
    // shown only while maximized.
    fn sync_max_restore_button(&mut self) {
        self.surface.set_max_restore_button_visible(
            self.show_max_restore_button && self.maximize.is_maximized(),
        );
    }

    fn shell_refresh(&mut self) {
        if let Some(shell) = self.shell.as_mut() {
            shell.refresh(
                self.maximize.is_maximized(),
                &self.viewport,
                &mut self.surface,
            );
        }
    }

    fn restore_if_maximized(&mut self) {
        if self.maximize.restore(&mut self.surface) {
            self.sync_max_restore_button();
            self.shell_refresh();
            fire(&mut self.on_maximize_restore);
            fire(&mut self.on_restore);
        }
    }

    /// Make the popup visible, re-clamped into the current viewport.
    pub fn open(&mut self, z_index: Option<i64>) {
        if self.destroyed {
            return;
        }
        if let Some(z_index) = z_index {
            self.surface.set_z_index(z_index);
        }
        self.surface.set_visible(true);
        self.reclamp_now();
        fire(&mut self.on_open);
    }

    /// Hide without destroying. Aborts with no state change at all when
    /// the `can_close` guard resolves false. Restores from maximized
    /// first so no maximized inline styles survive into a later open.
    pub async fn close(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        if let Some(guard) = self.can_close.as_ref()
            && !guard().await
        {
            tracing::debug!(popup = self.surface.class_name(), "close refused");
            return false;
        }
        self.restore_if_maximized();
        if self.drag.release() {
            self.surface.set_pointer_captured(false);
        }
        self.surface.set_visible(false);
        tracing::debug!(popup = self.surface.class_name(), "popup closed");
        fire(&mut self.on_close);
        true
    }

    /// Irreversibly tear down: every listener and subscription acquired at
    /// construction is released. Refusal by `can_destroy` releases
    /// nothing.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        if let Some(guard) = self.can_destroy.as_ref()
            && !guard()
        {
            tracing::debug!(popup = self.surface.class_name(), "destroy refused");
            return false;
        }
        self.restore_if_maximized();
        if self.drag.release() {
            self.surface.set_pointer_captured(false);
        }
        if let Some(shell) = self.shell.as_mut() {
            shell.release(&mut self.surface);
        }
        self.subscriptions = Subscriptions::default();
        self.surface.set_visible(false);
        self.destroyed = true;
        tracing::debug!(popup = self.surface.class_name(), "popup destroyed");
        true
    }

    /// Replace the body content atomically.
    pub fn set_content(&mut self, content: Content) {
        self.surface.set_markup(content.render());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.surface.set_title(title);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.surface.set_theme(theme);
    }

    pub fn theme(&self) -> Theme {
        self.surface.theme()
    }

    /// Re-normalize the padding and re-clamp immediately.
    pub fn set_edge_padding(&mut self, padding: impl Into<PaddingSpec>) {
        self.padding = padding.into().normalize();
        self.reclamp_now();
    }

    pub fn set_z_index(&mut self, z_index: i64) {
        self.surface.set_z_index(z_index);
    }

    /// Center into the viewport; edge constraints still win over exact
    /// centering.
    pub fn center(&mut self) {
        let rect = self.bounding_rect();
        let left = f64::from(self.padding.left)
            .max(((self.viewport.width - rect.width) / 2.0).round());
        let top = f64::from(self.padding.top)
            .max(((self.viewport.height - rect.height) / 2.0).round());
        self.surface.set_position(left, top);
        self.reclamp_now();
    }

    /// Viewport resize signal. Work is deferred to the next `on_frame`.
    pub fn handle_viewport_resize(&mut self, viewport: Viewport) {
        if !self.subscriptions.viewport_resize {
            return;
        }
        self.viewport = viewport;
        self.needs_reclamp = true;
        if let Some(shell) = self.shell.as_mut() {
            shell.schedule();
        }
    }

    /// Native fullscreen-change signal (any vendor variant).
    pub fn handle_fullscreen_change(&mut self, fullscreen_element: bool) {
        if !self.subscriptions.fullscreen_change {
            return;
        }
        self.viewport.fullscreen_element = fullscreen_element;
        if let Some(shell) = self.shell.as_mut() {
            shell.schedule();
        }
    }

    /// Per-frame tick: runs at most one re-clamp / maximize re-apply and
    /// one shell-compatibility pass no matter how many signals arrived
    /// since the previous frame.
    pub fn on_frame(&mut self) {
        if self.destroyed {
            return;
        }
        if self.needs_reclamp {
            self.needs_reclamp = false;
            if self.maximize.is_maximized() {
                // percentage/viewport units already track the resize; the
                // rectangle is recomputed from padding, not re-clamped
                self.maximize
                    .reapply(&mut self.surface, self.padding, self.maximize_override);
            } else {
                self.reclamp_now();
            }
        }
        if let Some(shell) = self.shell.as_mut() {
            shell.on_frame(
                self.maximize.is_maximized(),
                &self.viewport,
                &mut self.surface,
            );
        }
    }

    fn reclamp_now(&mut self) {
        let rect = self.bounding_rect();
        let (left, top) = geometry::clamp(rect, self.viewport.size(), self.padding);
        self.surface.set_position(left, top);
    }
}

impl std::fmt::Debug for PopupWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupWindow")
            .field("surface", &self.surface)
            .field("viewport", &self.viewport)
            .field("padding", &self.padding)
            .field("state", &self.state())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
