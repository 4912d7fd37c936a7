use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3;

use crate::resources::color::hex_to_linear;
use crate::resources::geometry::Geometry;
use crate::resources::material::MeshStandardMaterial;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{CylinderOptions, create_box, create_cylinder};
use crate::scene::{NodeHandle, Scene};

const BODY_COLOR: u32 = 0xff_33_33;
const DETAIL_COLOR: u32 = 0x33_33_33;

/// Handles of the train's nodes.
#[derive(Debug, Clone, Copy)]
pub struct TrainParts {
    pub group: NodeHandle,
    pub nose: NodeHandle,
    pub cabin: NodeHandle,
    pub chimney: NodeHandle,
    /// Rear, centre and front.
    pub small_wheels: [NodeHandle; 3],
    pub big_wheel: NodeHandle,
}

fn flat_material(hex: u32) -> Arc<MeshStandardMaterial> {
    Arc::new(MeshStandardMaterial::new(hex_to_linear(hex)).with_flat_shading(true))
}

fn wheel_geometry() -> Geometry {
    let mut wheel = create_cylinder(CylinderOptions::new(0.4, 0.4, 1.75, 16));
    wheel.rotate_x(PI / 2.0);
    wheel
}

/// Assembles the toy train under a new root group node named `train`.
pub fn add_train(scene: &mut Scene) -> TrainParts {
    let body = flat_material(BODY_COLOR);
    let detail = flat_material(DETAIL_COLOR);

    let nose_geometry = Arc::new(create_cylinder(CylinderOptions::new(0.75, 0.75, 3.0, 12)));
    let cabin_geometry = Arc::new(create_box(2.0, 2.25, 1.5));
    let chimney_geometry = Arc::new(create_cylinder(CylinderOptions {
        radius_top: 0.3,
        radius_bottom: 0.1,
        height: 0.5,
        ..CylinderOptions::default()
    }));
    let wheel = Mesh::new(Arc::new(wheel_geometry()), detail.clone());

    let group = scene.create_node("train");

    let mut part = |name: &str, mesh: Mesh, position: Vec3| {
        let handle = scene.add_mesh_to_parent(name, mesh, group);
        if let Some(node) = scene.get_node_mut(handle) {
            node.transform.position = position;
        }
        handle
    };

    let nose = part("nose", Mesh::new(nose_geometry, body.clone()), Vec3::new(-1.0, 0.0, 0.0));
    let cabin = part("cabin", Mesh::new(cabin_geometry, body), Vec3::new(1.5, 0.4, 0.0));
    let chimney = part("chimney", Mesh::new(chimney_geometry, detail), Vec3::new(-2.0, 0.9, 0.0));

    let small_wheels = [
        part("small_wheel_rear", wheel.clone(), Vec3::new(0.0, -0.5, 0.0)),
        part("small_wheel_center", wheel.clone(), Vec3::new(-1.0, -0.5, 0.0)),
        part("small_wheel_front", wheel.clone(), Vec3::new(-2.0, -0.5, 0.0)),
    ];
    let big_wheel = part("big_wheel", wheel, Vec3::new(1.5, -0.1, 0.0));

    if let Some(node) = scene.get_node_mut(nose) {
        node.transform.set_rotation_euler(0.0, 0.0, PI / 2.0);
    }
    if let Some(node) = scene.get_node_mut(big_wheel) {
        node.transform.scale = Vec3::new(2.0, 2.0, 1.25);
    }

    TrainParts {
        group,
        nose,
        cabin,
        chimney,
        small_wheels,
        big_wheel,
    }
}
