use std::sync::Arc;

use glam::Vec3;

use crate::resources::material::MeshStandardMaterial;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::create_box;
use crate::resources::texture::{ColorSpace, Texture};
use crate::scene::Scene;
use crate::settings::CameraSettings;
use crate::showcase::{add_camera, add_lights, base_scene};

pub const CUBE_TEXTURE: &str = "textures/uv_test_bw.png";

/// Camera used by the cube scene.
#[must_use]
pub fn cube_camera() -> CameraSettings {
    CameraSettings {
        fov: 35.0,
        near: 0.1,
        far: 100.0,
        position: Vec3::new(-4.0, 4.0, 10.0),
        target: Vec3::ZERO,
    }
}

/// A 2x2x2 cube with the UV test texture, lit by the showcase lights.
#[must_use]
pub fn cube_scene(aspect: f32) -> Scene {
    let mut scene = base_scene();
    add_camera(&mut scene, &cube_camera(), aspect);
    add_lights(&mut scene, 0x20_20_20);

    let texture = Texture::new(CUBE_TEXTURE)
        .with_color_space(ColorSpace::Srgb)
        .with_anisotropy(16);
    let material = MeshStandardMaterial::default().with_map(texture);

    scene.add_mesh(
        "cube",
        Mesh::new(Arc::new(create_box(2.0, 2.0, 2.0)), Arc::new(material)),
    );
    scene
}
