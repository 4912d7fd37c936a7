//! Geometry and BoundingBox Tests
//!
//! Tests for:
//! - BoundingBox from points
//! - Primitive geometry creation (box, cylinder, cone)
//! - Baked rotations

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use diorama::resources::{BoundingBox, Geometry};
use diorama::{CylinderOptions, create_box, create_cylinder};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn assert_indices_in_range(geo: &Geometry) {
    let count = geo.vertex_count() as u32;
    assert!(geo.indices.iter().all(|&i| i < count));
    assert_eq!(geo.indices.len() % 3, 0);
}

fn assert_attributes_match(geo: &Geometry) {
    assert_eq!(geo.normals.len(), geo.vertex_count());
    assert_eq!(geo.uvs.len(), geo.vertex_count());
}

// ============================================================================
// BoundingBox Tests
// ============================================================================

#[test]
fn bounding_box_from_points() {
    let bb = BoundingBox::from_points(&[[1.0, -2.0, 0.0], [-1.0, 3.0, 0.5]]).unwrap();
    assert!(vec3_approx(bb.min, Vec3::new(-1.0, -2.0, 0.0)));
    assert!(vec3_approx(bb.max, Vec3::new(1.0, 3.0, 0.5)));
    assert!(vec3_approx(bb.size(), Vec3::new(2.0, 5.0, 0.5)));
}

#[test]
fn bounding_box_of_nothing() {
    assert!(BoundingBox::from_points(&[]).is_none());
}

// ============================================================================
// Box
// ============================================================================

#[test]
fn box_has_four_vertices_per_face() {
    let geo = create_box(2.0, 2.25, 1.5);
    assert_eq!(geo.vertex_count(), 24);
    assert_eq!(geo.triangle_count(), 12);
    assert_attributes_match(&geo);
    assert_indices_in_range(&geo);

    let bb = geo.bounding_box.unwrap();
    assert!(vec3_approx(bb.size(), Vec3::new(2.0, 2.25, 1.5)));
    assert!(vec3_approx(bb.min + bb.max, Vec3::ZERO));
}

#[test]
fn box_normals_are_unit_axes() {
    let geo = create_box(1.0, 1.0, 1.0);
    for n in &geo.normals {
        let n = Vec3::from_array(*n);
        assert!(approx(n.length(), 1.0));
        assert!(approx(n.abs().max_element(), 1.0));
    }
}

// ============================================================================
// Cylinder
// ============================================================================

#[test]
fn cylinder_counts() {
    let geo = create_cylinder(CylinderOptions::new(0.4, 0.4, 1.75, 16));
    // 2 side rings of 17, 2 caps of 1 + 17
    assert_eq!(geo.vertex_count(), 34 + 36);
    assert_eq!(geo.triangle_count(), 32 + 32);
    assert_attributes_match(&geo);
    assert_indices_in_range(&geo);
}

#[test]
fn open_cylinder_has_no_caps() {
    let geo = create_cylinder(CylinderOptions {
        open_ended: true,
        ..CylinderOptions::new(1.0, 1.0, 1.0, 8)
    });
    assert_eq!(geo.vertex_count(), 18);
    assert_eq!(geo.triangle_count(), 16);
}

#[test]
fn chimney_cone_bounds() {
    let geo = create_cylinder(CylinderOptions {
        radius_top: 0.3,
        radius_bottom: 0.1,
        height: 0.5,
        ..CylinderOptions::default()
    });
    let bb = geo.bounding_box.unwrap();
    assert!(approx(bb.size().y, 0.5));
    assert!(bb.max.x <= 0.3 + EPSILON);
    assert!(bb.max.x > 0.1);
}

#[test]
fn segments_are_clamped_to_three() {
    let geo = create_cylinder(CylinderOptions::new(1.0, 1.0, 1.0, 1));
    assert_eq!(geo.triangle_count(), 6 + 3 + 3);
}

// ============================================================================
// Baked transforms
// ============================================================================

#[test]
fn rotate_x_lays_cylinder_on_its_side() {
    let mut geo = create_cylinder(CylinderOptions::new(0.4, 0.4, 1.75, 16));
    geo.rotate_x(FRAC_PI_2);

    let bb = geo.bounding_box.unwrap();
    assert!(approx(bb.size().z, 1.75));
    assert!(approx(bb.size().y, 0.8));
    for n in &geo.normals {
        assert!(approx(Vec3::from_array(*n).length(), 1.0));
    }
}

#[test]
fn rotate_z_keeps_box_extent() {
    let mut geo = create_box(2.0, 1.0, 1.0);
    geo.rotate_z(FRAC_PI_2);
    let bb = geo.bounding_box.unwrap();
    assert!(approx(bb.size().x, 1.0));
    assert!(approx(bb.size().y, 2.0));
}
