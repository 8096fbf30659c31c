use clap::Parser;

use popupkit::popup::PointerOutcome;
use popupkit::surface::Surface;
use popupkit::{Content, PointerEvent, PopupConfig, PopupWindow, Theme, Viewport};

#[derive(Parser, Debug)]
#[command(
    name = "popupkit-sim",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scripted popup interaction replay for checking engine behavior"
)]
struct SimCli {
    /// Viewport inner width in px.
    #[arg(long, value_name = "PX", default_value_t = 1000.0)]
    viewport_width: f64,

    /// Viewport inner height in px.
    #[arg(long, value_name = "PX", default_value_t = 800.0)]
    viewport_height: f64,

    /// Popup width in px.
    #[arg(long, value_name = "PX", default_value_t = 300.0)]
    width: f64,

    /// Popup height in px.
    #[arg(long, value_name = "PX", default_value_t = 200.0)]
    height: f64,

    /// Theme name; anything but "dark" renders light.
    #[arg(long, default_value = "light")]
    theme: String,

    /// Uniform edge padding in px (-1 disables the constraint).
    #[arg(long, value_name = "PX", default_value_t = 16)]
    edge_padding: i32,

    /// Horizontal drag displacement to replay.
    #[arg(long, value_name = "PX", default_value_t = 400.0)]
    drag_dx: f64,

    /// Vertical drag displacement to replay.
    #[arg(long, value_name = "PX", default_value_t = 250.0)]
    drag_dy: f64,
}

fn print_surface(label: &str, popup: &PopupWindow) {
    let surface: &Surface = popup.surface();
    let rect = popup.bounding_rect();
    println!("--- {label} ---");
    println!("  class:   {}", surface.class_list());
    println!("  header:  {}", surface.header_class_list());
    println!(
        "  style:   left:{} top:{} width:{} height:{}",
        surface.effective_left(),
        surface.effective_top(),
        surface.effective_width(),
        surface.effective_height()
    );
    println!(
        "  rect:    ({}, {}) {}x{}",
        rect.left, rect.top, rect.width, rect.height
    );
    if surface.max_restore_button_visible() {
        println!("  button:  {}", surface.max_restore_glyph());
    }
    println!("  state:   {:?}", popup.state());
}

fn main() {
    popupkit::tracing_sub::init_default();
    let cli = SimCli::parse();

    let viewport = Viewport::new(cli.viewport_width, cli.viewport_height);
    let mut popup = PopupWindow::new(
        PopupConfig {
            theme: Theme::parse(&cli.theme),
            edge_padding: cli.edge_padding.into(),
            width: Some(cli.width),
            height: Some(cli.height),
            title: "popupkit-sim".to_string(),
            content: Content::from("<p>scripted replay</p>"),
            show_maximize_restore_button: true,
            ..Default::default()
        },
        viewport,
    );
    if let Some(css) = popup.take_stylesheet() {
        println!("stylesheet: {} bytes generated", css.len());
    }
    print_surface("mounted (centered, clamped)", &popup);

    // Drag from the header center by (drag_dx, drag_dy); the engine clamps
    // against the padded viewport on every move.
    let rect = popup.bounding_rect();
    let grab = (rect.left + rect.width / 2.0, rect.top + 12.0);
    let _ = popup.handle_pointer(&PointerEvent::down(grab.0, grab.1));
    for step in 1..=10 {
        let t = f64::from(step) / 10.0;
        let _ = popup.handle_pointer(&PointerEvent::moved(
            grab.0 + cli.drag_dx * t,
            grab.1 + cli.drag_dy * t,
        ));
    }
    let _ = popup.handle_pointer(&PointerEvent::up(grab.0 + cli.drag_dx, grab.1 + cli.drag_dy));
    print_surface("after drag", &popup);

    // Double-activation on the header toggles maximize.
    let rect = popup.bounding_rect();
    let tap = (rect.left + rect.width / 2.0, rect.top + 12.0);
    for _ in 0..2 {
        let _ = popup.handle_pointer(&PointerEvent::down(tap.0, tap.1));
        let _ = popup.handle_pointer(&PointerEvent::up(tap.0, tap.1));
    }
    print_surface("after double-activation (maximized)", &popup);

    // Pointer-up on the close button only requests the close; the async
    // can_close gate runs inside close().
    let outcome = popup.handle_pointer(&PointerEvent::up(
        popup.bounding_rect().left + popup.bounding_rect().width - 20.0,
        popup.bounding_rect().top + 20.0,
    ));
    if outcome == PointerOutcome::CloseRequested {
        let closed = pollster::block_on(popup.close());
        println!("close requested, performed: {closed}");
    }
    print_surface("after close (hidden, restored)", &popup);
}
