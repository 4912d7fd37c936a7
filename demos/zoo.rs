//! Three animated birds loaded from glTF in the background.
//!
//! ```text
//! cargo run --example zoo -- [settings.json]
//! ```
//!
//! Without a settings file the Parrot, Flamingo and Stork are read from
//! `demos/assets/models/`. The birds appear as their loads finish; a missing
//! file is logged and the rest of the scene keeps running.

use std::sync::Arc;

use diorama::settings::{EngineSettings, WindowSettings};
use diorama::showcase::zoo::{zoo_camera, zoo_models, zoo_scene};
use diorama::utils::logging::{LoggingConfig, init_logging};
use diorama::{App, Engine, GltfLoader, HeadlessRenderer, ModelLoader, OrbitControls};

const MODEL_DIR: &str = "demos/assets/models";

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::from_json_file(&path)?,
        None => EngineSettings {
            window: WindowSettings {
                title: "diorama: zoo".to_string(),
                ..WindowSettings::default()
            },
            camera: Some(zoo_camera()),
            models: zoo_models(MODEL_DIR),
            ..EngineSettings::default()
        },
    };

    let camera = settings.camera_or(zoo_camera);
    let models = settings.models.clone();

    App::new(settings.window.clone()).run(move |window| {
        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;

        let mut scene = zoo_scene(&camera, aspect);
        if let Some(hex) = settings.background {
            scene.background = Some(diorama::resources::color::hex_to_linear(hex));
        }

        let loader = ModelLoader::new(Arc::new(GltfLoader::new()))?;
        let mut engine = Engine::new(
            scene,
            HeadlessRenderer::new(size.width, size.height).with_history(1),
        )
        .with_loader(loader)
        .with_controls(OrbitControls::new(camera.position, camera.target));

        for placement in models {
            engine.request_model(placement)?;
        }
        Ok(engine)
    })?;

    Ok(())
}
