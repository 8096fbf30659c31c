//! popupkit, a host-agnostic floating popup-window engine.
//!
//! The crate owns the popup's surface model and its full interaction
//! state: constrained dragging with a movement threshold, edge-aware
//! viewport clamping, maximize/restore with an exact geometry round-trip,
//! double-activation detection, and an optional desktop-shell
//! compatibility mode that tells true OS fullscreen apart from an
//! in-surface maximize.
//!
//! An embedding host:
//! - constructs a [`PopupWindow`] from a [`PopupConfig`] and the current
//!   [`Viewport`],
//! - injects the stylesheet returned by
//!   [`PopupWindow::take_stylesheet`] (first popup of a class name only),
//! - feeds timestamped [`PointerEvent`]s plus viewport-resize and
//!   fullscreen-change signals,
//! - calls [`PopupWindow::on_frame`] once per rendering frame,
//! - and mirrors the [`surface::Surface`] model into its visual tree.

pub mod activation;
pub mod chrome;
pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod maximize;
pub mod popup;
pub mod shell_compat;
pub mod stylesheet;
pub mod surface;
pub mod tracing_sub;

pub use config::{Content, PopupConfig, ShellInfo, Theme};
pub use events::{PointerButton, PointerEvent, PointerKind, Viewport};
pub use geometry::{EdgePadding, PaddingSpec, PartialPadding, Rect, Size, UNCONSTRAINED};
pub use popup::{PointerOutcome, PopupState, PopupWindow, Subscriptions};
