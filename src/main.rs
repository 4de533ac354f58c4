// src/main.rs
use nannou::prelude::*;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curtainslide::{
    config::Config,
    controllers::{OscCommand, OscController},
    models::{Direction, SurfaceSize},
    render::{load_texture, to_surface_point, FrameCompositor, MaskTextureCache, NannouMeshCanvas},
    views::CurtainView,
};

struct Model {
    // Core components:
    curtain: CurtainView<wgpu::Texture>,
    surface: SurfaceSize,

    // Comms components:
    osc_controller: Option<OscController>,

    // Rendering components:
    mask_textures: MaskTextureCache,

    // Input
    dragging: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Create window
    let window_id = app
        .new_window()
        .title("curtainslide")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .resized(resized)
        .focused(focused)
        .unfocused(unfocused)
        .build()
        .unwrap();
    let window = app.window(window_id).unwrap();
    let (width, height) = window.inner_size_points();
    let surface = SurfaceSize::new(width, height);

    let mut curtain = CurtainView::new(&config.curtain);
    curtain.on_surface_resize(width, height);

    // Without a texture the curtain simply draws nothing
    match load_texture(app, &config.resolve_texture_path()) {
        Ok(texture) => curtain.set_texture(texture),
        Err(e) => tracing::error!("{}", e),
    }

    // Start with the curtain drawn open; the trailing offset eases it in
    let open_fraction = match config.curtain.direction {
        Direction::Left => 0.0,
        Direction::Right => 1.0,
    };
    curtain.set_pull_point_fraction(open_fraction, 0.5);
    curtain.attach();

    // Create OSC controller
    let osc_controller = match OscController::new(config.osc.rx_port) {
        Ok(controller) => Some(controller),
        Err(e) => {
            tracing::warn!("OSC disabled: {}", e);
            None
        }
    };

    Model {
        curtain,
        surface,
        osc_controller,
        mask_textures: MaskTextureCache::new(),
        dragging: false,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    // Process OSC messages
    let commands = model
        .osc_controller
        .as_mut()
        .map(|osc| {
            osc.process_messages();
            osc.take_commands()
        })
        .unwrap_or_default();
    for command in commands {
        launch_command(app, model, command);
    }

    model.curtain.update(update.since_last.as_secs_f32());

    // Upload the overlay level this frame will need
    if let Some((mask, alpha)) = model.curtain.frame().and_then(|frame| frame.overlay) {
        model.mask_textures.prepare(app, mask, alpha);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    if let Some(curtain_frame) = model.curtain.frame() {
        let mut canvas = NannouMeshCanvas::new(&draw, model.surface, &model.mask_textures);
        FrameCompositor::compose(&curtain_frame, &mut canvas);
    }

    draw.to_frame(app, &frame).unwrap();
}

fn launch_command(app: &App, model: &mut Model, command: OscCommand) {
    match command {
        OscCommand::PullPoint { x, y } => model.curtain.set_pull_point(x, y),
        OscCommand::PullPointFraction { x, y } => model.curtain.set_pull_point_fraction(x, y),
        OscCommand::SetDirection(direction) => model.curtain.set_direction(direction),
        OscCommand::SetTexture { path } => match load_texture(app, Path::new(&path)) {
            Ok(texture) => {
                model.mask_textures.clear();
                model.curtain.set_texture(texture);
            }
            Err(e) => tracing::warn!("{}", e),
        },
        OscCommand::SetAttached(true) => model.curtain.attach(),
        OscCommand::SetAttached(false) => model.curtain.detach(),
        OscCommand::ClearTexture => {
            model.curtain.clear_texture();
            model.mask_textures.clear();
        }
    }
}

// ******************************* Input *******************************

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Left => model.curtain.set_direction(Direction::Left),
        Key::Right => model.curtain.set_direction(Direction::Right),
        Key::D => {
            let flipped = model.curtain.state().direction.flipped();
            model.curtain.set_direction(flipped);
        }
        Key::O => model.curtain.set_pull_point_fraction(1.0, 0.5),
        Key::C => model.curtain.set_pull_point_fraction(0.0, 0.5),
        Key::Space => {
            if model.curtain.is_attached() {
                model.curtain.detach();
            } else {
                model.curtain.attach();
            }
        }
        _ => (),
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.dragging = true;
        let (x, y) = to_surface_point(app.mouse.position(), model.surface);
        model.curtain.set_pull_point(x, y);
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.dragging = false;
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    if model.dragging {
        let (x, y) = to_surface_point(pos, model.surface);
        model.curtain.set_pull_point(x, y);
    }
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.surface = SurfaceSize::new(size.x, size.y);
    model.curtain.on_surface_resize(size.x, size.y);
}

// ******************************* Lifecycle *******************************

fn focused(_app: &App, model: &mut Model) {
    model.curtain.attach();
}

fn unfocused(_app: &App, model: &mut Model) {
    model.curtain.detach();
}
