use glam::{Mat3, Mat4, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let first = Vec3::from_array(*points.first()?);
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            let p = Vec3::from_array(*p);
            (min.min(p), max.max(p))
        });
        Some(Self { min, max })
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// CPU-side triangle geometry.
///
/// Planar attribute arrays; `indices` address them with CCW winding.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub bounding_box: Option<BoundingBox>,
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn compute_bounding_volume(&mut self) {
        self.bounding_box = BoundingBox::from_points(&self.positions);
    }

    /// Bakes a transform into the vertex data.
    pub fn apply_matrix(&mut self, matrix: Mat4) {
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();

        for p in &mut self.positions {
            *p = matrix.transform_point3(Vec3::from_array(*p)).to_array();
        }
        for n in &mut self.normals {
            *n = (normal_matrix * Vec3::from_array(*n)).normalize_or_zero().to_array();
        }

        self.compute_bounding_volume();
    }

    /// Rotates the vertex data about the X axis, in radians.
    pub fn rotate_x(&mut self, angle: f32) {
        self.apply_matrix(Mat4::from_rotation_x(angle));
    }

    /// Rotates the vertex data about the Z axis, in radians.
    pub fn rotate_z(&mut self, angle: f32) {
        self.apply_matrix(Mat4::from_rotation_z(angle));
    }
}
