//! The toy train, built from boxes and cylinders.

use diorama::settings::WindowSettings;
use diorama::showcase::add_train;
use diorama::showcase::cube::cube_camera;
use diorama::showcase::{add_camera, add_lights, base_scene};
use diorama::utils::logging::{LoggingConfig, init_logging};
use diorama::{App, Engine, HeadlessRenderer, OrbitControls};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let window = WindowSettings {
        title: "diorama: train".to_string(),
        ..WindowSettings::default()
    };

    App::new(window).run(|window| {
        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let camera = cube_camera();

        let mut scene = base_scene();
        add_camera(&mut scene, &camera, aspect);
        add_lights(&mut scene, 0x20_20_20);
        let train = add_train(&mut scene);
        log::info!("Train assembled under {:?}", train.group);

        let engine = Engine::new(
            scene,
            HeadlessRenderer::new(size.width, size.height).with_history(1),
        )
        .with_controls(OrbitControls::new(camera.position, camera.target));
        Ok(engine)
    })?;

    Ok(())
}
