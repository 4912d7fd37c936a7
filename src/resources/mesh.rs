use std::sync::Arc;

use crate::resources::geometry::Geometry;
use crate::resources::material::MeshStandardMaterial;

/// Mesh component: shared geometry drawn with a shared material.
///
/// Geometry and material are reference counted so clones (e.g. the train's
/// wheels) reuse the same data.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub material: Arc<MeshStandardMaterial>,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, material: Arc<MeshStandardMaterial>) -> Self {
        Self { geometry, material }
    }
}
