use crate::resources::geometry::Geometry;

/// Face table: (normal, u axis, v axis). Corners are emitted CCW seen from outside.
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
];

/// Builds an axis-aligned box centred on the origin, 24 vertices (4 per face).
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let half = [width / 2.0, height / 2.0, depth / 2.0];

    let mut geo = Geometry::new();

    for (face, (normal, u, v)) in FACES.iter().enumerate() {
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut p = [0.0_f32; 3];
            for axis in 0..3 {
                p[axis] = (normal[axis] + u[axis] * su + v[axis] * sv) * half[axis];
            }
            geo.positions.push(p);
            geo.normals.push(*normal);
            geo.uvs.push([(su + 1.0) / 2.0, (1.0 - sv) / 2.0]);
        }

        let base = (face * 4) as u32;
        geo.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    geo.compute_bounding_volume();
    geo
}
