//! Ready-made scenes: a textured cube, a toy train and a bird zoo.

pub mod cube;
pub mod train;
pub mod zoo;

pub use cube::cube_scene;
pub use train::{TrainParts, add_train};
pub use zoo::{zoo_models, zoo_scene};

use glam::Vec3;

use crate::resources::color::hex_to_linear;
use crate::scene::{Camera, Light, NodeHandle, Scene};
use crate::settings::CameraSettings;

/// Sky blue clear colour shared by every showcase scene.
pub const BACKGROUND: u32 = 0x8f_bc_d4;

pub const SKY_COLOR: u32 = 0xdd_ee_ff;
pub const LIGHT_INTENSITY: f32 = 5.0;

/// Hemisphere fill plus a white directional key light at (10, 10, 10).
///
/// Returns `(hemisphere, directional)`.
pub fn add_lights(scene: &mut Scene, ground_color: u32) -> (NodeHandle, NodeHandle) {
    let hemisphere = scene.add_light(
        "hemisphere",
        Light::new_hemisphere(
            hex_to_linear(SKY_COLOR),
            hex_to_linear(ground_color),
            LIGHT_INTENSITY,
        ),
    );

    let main = scene.add_light("main", Light::new_directional(Vec3::ONE, LIGHT_INTENSITY));
    if let Some(node) = scene.get_node_mut(main) {
        node.transform.position = Vec3::new(10.0, 10.0, 10.0);
    }

    (hemisphere, main)
}

/// Adds the active camera described by `settings`, looking at its target.
pub fn add_camera(scene: &mut Scene, settings: &CameraSettings, aspect: f32) -> NodeHandle {
    let camera: Camera = settings.build(aspect);
    let handle = scene.add_camera("camera", camera);
    if let Some(node) = scene.get_node_mut(handle) {
        node.transform.position = settings.position;
        node.transform.look_at(settings.target, Vec3::Y);
    }
    handle
}

/// Empty scene with the showcase background.
#[must_use]
pub fn base_scene() -> Scene {
    let mut scene = Scene::new();
    scene.background = Some(hex_to_linear(BACKGROUND));
    scene
}
