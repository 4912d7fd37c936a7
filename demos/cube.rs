//! Textured cube with orbit controls.
//!
//! Run with `cargo run --example cube`. Frames go to the headless renderer;
//! the FPS counter in the window title shows the update loop running.

use diorama::settings::WindowSettings;
use diorama::showcase::cube::{cube_camera, cube_scene};
use diorama::utils::logging::{LoggingConfig, init_logging};
use diorama::{App, Engine, HeadlessRenderer, OrbitControls};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let window = WindowSettings {
        title: "diorama: cube".to_string(),
        ..WindowSettings::default()
    };

    App::new(window).run(|window| {
        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let camera = cube_camera();

        let engine = Engine::new(
            cube_scene(aspect),
            HeadlessRenderer::new(size.width, size.height).with_history(1),
        )
        .with_controls(OrbitControls::new(camera.position, camera.target));
        Ok(engine)
    })?;

    Ok(())
}
