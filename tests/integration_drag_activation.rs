use std::time::{Duration, Instant};

use popupkit::{
    PointerButton, PointerEvent, PointerKind, PointerOutcome, PopupConfig, PopupWindow, Viewport,
};

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0).with_screen_width(1920.0)
}

// Centered on the viewport above: rect (350, 300, 300x200), header drag
// area up to x = 612 where the button cluster begins, close button
// spanning x in [612, 640).
fn popup() -> PopupWindow {
    PopupWindow::new(
        PopupConfig {
            class_name: "drag-popup".to_string(),
            width: Some(300.0),
            height: Some(200.0),
            ..Default::default()
        },
        viewport(),
    )
}

#[test]
fn below_threshold_moves_nothing() {
    let mut popup = popup();
    assert!(!popup.wants_global_pointer());

    assert_eq!(
        popup.handle_pointer(&PointerEvent::down(400.0, 310.0)),
        PointerOutcome::Handled
    );
    assert!(popup.state().is_drag_pending);
    assert!(popup.wants_global_pointer());

    assert_eq!(
        popup.handle_pointer(&PointerEvent::moved(404.0, 313.0)),
        PointerOutcome::Handled
    );
    assert!(popup.state().is_drag_pending);
    assert!(!popup.state().is_dragging);
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (350.0, 300.0));

    // exactly 5px of travel on both axes still sits on the pending side
    assert_eq!(
        popup.handle_pointer(&PointerEvent::moved(405.0, 315.0)),
        PointerOutcome::Handled
    );
    assert!(popup.state().is_drag_pending);
    assert!(!popup.state().is_dragging);
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (350.0, 300.0));

    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(404.0, 313.0)),
        PointerOutcome::Handled
    );
    assert!(!popup.wants_global_pointer());
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (350.0, 300.0));
}

#[test]
fn crossing_threshold_starts_a_clamped_drag() {
    let mut popup = popup();
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0));

    // 6px of horizontal travel crosses the threshold; the grab offset
    // from the surface top-left (50, 10) is preserved
    let _ = popup.handle_pointer(&PointerEvent::moved(406.0, 310.0));
    assert!(popup.state().is_dragging);
    assert!(popup.surface().pointer_captured());
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (356.0, 300.0));

    let _ = popup.handle_pointer(&PointerEvent::moved(500.0, 400.0));
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (450.0, 390.0));

    // far off-screen: tracking clamps against the padded viewport
    let _ = popup.handle_pointer(&PointerEvent::moved(5000.0, 5000.0));
    let rect = popup.bounding_rect();
    assert_eq!((rect.left, rect.top), (684.0, 584.0));

    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(5000.0, 5000.0)),
        PointerOutcome::Handled
    );
    assert!(!popup.state().is_dragging);
    assert!(!popup.surface().pointer_captured());
    assert_eq!(popup.bounding_rect().left, 684.0);
}

#[test]
fn cancel_ends_the_drag_in_place() {
    let mut popup = popup();
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0));
    let _ = popup.handle_pointer(&PointerEvent::moved(450.0, 310.0));
    assert!(popup.state().is_dragging);

    assert_eq!(
        popup.handle_pointer(&PointerEvent::cancel(450.0, 310.0)),
        PointerOutcome::Handled
    );
    assert!(!popup.wants_global_pointer());
    assert!(!popup.surface().pointer_captured());
    assert_eq!(popup.bounding_rect().left, 400.0);

    // a stray cancel with no drag in flight is not ours
    assert_eq!(
        popup.handle_pointer(&PointerEvent::cancel(450.0, 310.0)),
        PointerOutcome::Ignored
    );
}

#[test]
fn buttons_and_cluster_never_begin_a_drag() {
    let mut popup = popup();
    assert_eq!(
        popup.handle_pointer(&PointerEvent::down(626.0, 320.0)),
        PointerOutcome::Handled
    );
    assert!(!popup.wants_global_pointer());
    let _ = popup.handle_pointer(&PointerEvent::moved(700.0, 320.0));
    assert_eq!(popup.bounding_rect().left, 350.0);
}

#[test]
fn secondary_button_does_not_drag() {
    let mut popup = popup();
    let down = PointerEvent::new(PointerKind::Down, PointerButton::Secondary, 400.0, 310.0);
    assert_eq!(popup.handle_pointer(&down), PointerOutcome::Handled);
    assert!(!popup.wants_global_pointer());
}

#[test]
fn non_draggable_popup_ignores_header_grabs() {
    let mut popup = PopupWindow::new(
        PopupConfig {
            class_name: "drag-off".to_string(),
            width: Some(300.0),
            height: Some(200.0),
            draggable: false,
            ..Default::default()
        },
        viewport(),
    );
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0));
    assert!(!popup.wants_global_pointer());
    let _ = popup.handle_pointer(&PointerEvent::moved(500.0, 310.0));
    assert_eq!(popup.bounding_rect().left, 350.0);
}

#[test]
fn maximized_popup_ignores_header_grabs() {
    let mut popup = popup();
    popup.maximize();
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 30.0));
    assert!(!popup.wants_global_pointer());
    let _ = popup.handle_pointer(&PointerEvent::moved(500.0, 30.0));
    assert_eq!(popup.surface().effective_left().to_string(), "16px");
}

#[test]
fn pointer_up_on_close_requests_closing() {
    let mut popup = popup();
    let _ = popup.handle_pointer(&PointerEvent::down(626.0, 320.0));
    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(626.0, 320.0)),
        PointerOutcome::CloseRequested
    );
    // the request is only intent; nothing closed yet
    assert!(popup.surface().visible());
}

#[test]
fn drag_released_over_close_does_not_close() {
    let mut popup = popup();
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0));
    // drag right until the popup pins at left = 684; the pointer keeps
    // going and ends up over the close button at [946, 974)
    let _ = popup.handle_pointer(&PointerEvent::moved(5000.0, 320.0));
    assert_eq!(popup.bounding_rect().left, 684.0);
    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(960.0, 320.0)),
        PointerOutcome::Handled
    );
    assert!(popup.surface().visible());
}

#[test]
fn double_activation_toggles_maximize() {
    let mut popup = popup();
    let t0 = Instant::now();

    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0).at(t0));
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t0));
    assert!(!popup.is_maximized());

    let t1 = t0 + Duration::from_millis(299);
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0).at(t1));
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t1));
    assert!(popup.is_maximized());

    // the detector resets on firing: the next release starts a fresh pair
    let t2 = t1 + Duration::from_millis(200);
    let _ = popup.handle_pointer(&PointerEvent::down(100.0, 30.0).at(t2));
    let _ = popup.handle_pointer(&PointerEvent::up(100.0, 30.0).at(t2));
    assert!(popup.is_maximized());

    let t3 = t2 + Duration::from_millis(150);
    let _ = popup.handle_pointer(&PointerEvent::down(100.0, 30.0).at(t3));
    let _ = popup.handle_pointer(&PointerEvent::up(100.0, 30.0).at(t3));
    assert!(!popup.is_maximized());
}

#[test]
fn slow_second_release_does_not_toggle() {
    let mut popup = popup();
    let t0 = Instant::now();
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t0));
    let t1 = t0 + Duration::from_millis(301);
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t1));
    assert!(!popup.is_maximized());
}

#[test]
fn close_button_releases_never_count_as_activations() {
    let mut popup = popup();
    let t0 = Instant::now();
    let _ = popup.handle_pointer(&PointerEvent::up(626.0, 320.0).at(t0));
    let t1 = t0 + Duration::from_millis(100);
    let _ = popup.handle_pointer(&PointerEvent::up(626.0, 320.0).at(t1));
    assert!(!popup.is_maximized());

    // and they leave no half-open pair behind for the drag area
    let t2 = t1 + Duration::from_millis(100);
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t2));
    assert!(!popup.is_maximized());
}

#[test]
fn closed_popup_ignores_the_pointer_stream() {
    let mut popup = popup();
    assert!(pollster::block_on(popup.close()));

    // events at the stale geometry: no drag, no activation, no close intent
    assert_eq!(
        popup.handle_pointer(&PointerEvent::down(400.0, 310.0)),
        PointerOutcome::Ignored
    );
    assert_eq!(
        popup.handle_pointer(&PointerEvent::moved(450.0, 310.0)),
        PointerOutcome::Ignored
    );
    assert!(!popup.wants_global_pointer());
    assert_eq!(popup.bounding_rect().left, 350.0);

    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(626.0, 320.0)),
        PointerOutcome::Ignored
    );
    let t0 = Instant::now();
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t0));
    let _ = popup.handle_pointer(&PointerEvent::up(400.0, 310.0).at(t0 + Duration::from_millis(100)));
    assert!(!popup.is_maximized());

    // reopening restores normal interaction
    popup.open(None);
    assert_eq!(
        popup.handle_pointer(&PointerEvent::down(400.0, 310.0)),
        PointerOutcome::Handled
    );
    assert!(popup.wants_global_pointer());
}

#[test]
fn close_during_a_drag_releases_the_pointer() {
    let mut popup = popup();
    let _ = popup.handle_pointer(&PointerEvent::down(400.0, 310.0));
    let _ = popup.handle_pointer(&PointerEvent::moved(450.0, 310.0));
    assert!(popup.state().is_dragging);

    assert!(pollster::block_on(popup.close()));
    assert!(!popup.wants_global_pointer());
    assert!(!popup.surface().pointer_captured());
    assert!(!popup.surface().visible());
}

#[test]
fn outside_events_are_not_ours() {
    let mut popup = popup();
    assert_eq!(
        popup.handle_pointer(&PointerEvent::down(10.0, 10.0)),
        PointerOutcome::Ignored
    );
    assert_eq!(
        popup.handle_pointer(&PointerEvent::moved(10.0, 10.0)),
        PointerOutcome::Ignored
    );
    assert_eq!(
        popup.handle_pointer(&PointerEvent::up(10.0, 10.0)),
        PointerOutcome::Ignored
    );
}
