use std::f32::consts::TAU;

use crate::resources::geometry::Geometry;

#[derive(Debug, Clone, Copy)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub open_ended: bool,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 8,
            open_ended: false,
        }
    }
}

impl CylinderOptions {
    #[must_use]
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            ..Self::default()
        }
    }
}

/// Builds a Y-aligned cylinder (or truncated cone) centred on the origin.
#[must_use]
pub fn create_cylinder(options: CylinderOptions) -> Geometry {
    let segments = options.radial_segments.max(3);
    let half_height = options.height / 2.0;
    // Side normals tilt when the radii differ.
    let slope = (options.radius_bottom - options.radius_top) / options.height.max(f32::EPSILON);

    let mut geo = Geometry::new();

    // Side: two rings with a duplicated seam column for UV continuity.
    for (ring, (y, radius)) in [
        (half_height, options.radius_top),
        (-half_height, options.radius_bottom),
    ]
    .into_iter()
    .enumerate()
    {
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            geo.positions.push([radius * sin, y, radius * cos]);
            let n = glam::Vec3::new(sin, slope, cos).normalize();
            geo.normals.push(n.to_array());
            geo.uvs.push([u, ring as f32]);
        }
    }

    let stride = segments + 1;
    for x in 0..segments {
        let a = x;
        let b = x + stride;
        let c = x + stride + 1;
        let d = x + 1;
        geo.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if !options.open_ended {
        for (top, y, radius) in [
            (true, half_height, options.radius_top),
            (false, -half_height, options.radius_bottom),
        ] {
            if radius <= 0.0 {
                continue;
            }
            let normal_y = if top { 1.0 } else { -1.0 };
            let center = geo.positions.len() as u32;
            geo.positions.push([0.0, y, 0.0]);
            geo.normals.push([0.0, normal_y, 0.0]);
            geo.uvs.push([0.5, 0.5]);

            for x in 0..=segments {
                let (sin, cos) = (x as f32 / segments as f32 * TAU).sin_cos();
                geo.positions.push([radius * sin, y, radius * cos]);
                geo.normals.push([0.0, normal_y, 0.0]);
                geo.uvs.push([sin * 0.5 + 0.5, cos * 0.5 + 0.5]);
            }

            for x in 0..segments {
                let i = center + 1 + x;
                if top {
                    geo.indices.extend_from_slice(&[i, i + 1, center]);
                } else {
                    geo.indices.extend_from_slice(&[i + 1, i, center]);
                }
            }
        }
    }

    geo.compute_bounding_volume();
    geo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_bounds_match_dimensions() {
        let geo = create_cylinder(CylinderOptions::new(0.75, 0.75, 3.0, 12));
        let bb = geo.bounding_box.expect("non-empty geometry");
        assert!((bb.size().y - 3.0).abs() < 1e-5);
        assert!((bb.size().x - 1.5).abs() < 1e-2);
        // 2 rings of 13 + 2 caps of (1 + 13)
        assert_eq!(geo.vertex_count(), 26 + 28);
        assert_eq!(geo.triangle_count(), 24 + 24);
    }

    #[test]
    fn cone_without_top_cap() {
        let geo = create_cylinder(CylinderOptions::new(0.0, 1.0, 2.0, 8));
        assert_eq!(geo.vertex_count(), 18 + 10);
    }
}
