use glam::Vec3;

use crate::assets::ModelPlacement;
use crate::scene::Scene;
use crate::settings::CameraSettings;
use crate::showcase::{add_camera, add_lights, base_scene};

/// Uniform scale the bird models are shown at.
pub const MODEL_SCALE: f32 = 0.025;

/// Camera used by the zoo scene when the settings do not name one.
#[must_use]
pub fn zoo_camera() -> CameraSettings {
    CameraSettings {
        fov: 35.0,
        near: 1.0,
        far: 100.0,
        position: Vec3::new(-1.5, 1.5, 6.5),
        target: Vec3::ZERO,
    }
}

/// The three animated birds, relative to `dir`.
#[must_use]
pub fn zoo_models(dir: &str) -> Vec<ModelPlacement> {
    let path = |file: &str| {
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{file}", dir.trim_end_matches('/'))
        }
    };
    vec![
        ModelPlacement::new(path("Parrot.glb"), Vec3::new(0.0, 0.0, 2.5), MODEL_SCALE),
        ModelPlacement::new(path("Flamingo.glb"), Vec3::new(7.5, 0.0, -10.0), MODEL_SCALE),
        ModelPlacement::new(path("Stork.glb"), Vec3::new(0.0, -2.5, -10.0), MODEL_SCALE),
    ]
}

/// Camera, lights and background for the zoo. Models are added as they load.
#[must_use]
pub fn zoo_scene(camera: &CameraSettings, aspect: f32) -> Scene {
    let mut scene = base_scene();
    add_camera(&mut scene, camera, aspect);
    add_lights(&mut scene, 0x0f_0e_0d);
    scene
}
