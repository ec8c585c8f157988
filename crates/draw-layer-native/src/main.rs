mod lines;

use std::path::PathBuf;

use draw_layer::{ConfigFile, LogContext, MarkerStore, OverlayRenderer, RenderOptions};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use lines::WgpuLines;

/// Overrides the config file location (default: beside the executable).
const CONFIG_ENV: &str = "DRAW_LAYER_CONFIG";
/// Set to `bounded` for fixed-length crosshair arms.
const CROSSHAIR_ENV: &str = "DRAW_LAYER_CROSSHAIR";

fn config_file(log: LogContext) -> ConfigFile {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => ConfigFile::at(PathBuf::from(path), log),
        None => ConfigFile::beside_executable(log),
    }
}

fn render_options() -> RenderOptions {
    match std::env::var(CROSSHAIR_ENV).as_deref() {
        Ok("bounded") => RenderOptions::bounded_crosshair(),
        _ => RenderOptions::default(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let store = MarkerStore::open(config_file(LogContext::default()));
    let log = store.log();
    log.info(format_args!("{} markers configured", store.len()));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Draw Layer")
        .build(&event_loop)?;

    let backend = pollster::block_on(WgpuLines::new(&window))?;
    let mut renderer = OverlayRenderer::new(backend, render_options(), log);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => renderer.backend_mut().resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            renderer.dispose();
            if let Err(e) = store.save() {
                log.error(format_args!("error saving configuration: {e}"));
            }
            elwt.exit();
        }
        Event::AboutToWait => {
            let viewport = renderer.backend().viewport();
            renderer.draw_markers(store.markers(), None, viewport);
            renderer.backend().window().request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
