use glam::Vec3;

use crate::resources::texture::Texture;

/// Physically based material description. Colours are linear RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStandardMaterial {
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub flat_shading: bool,
    /// Base colour map, multiplied with `color`.
    pub map: Option<Texture>,
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            roughness: 1.0,
            metalness: 0.0,
            flat_shading: false,
            map: None,
        }
    }
}

impl MeshStandardMaterial {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_map(mut self, map: Texture) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_flat_shading(mut self, flat: bool) -> Self {
        self.flat_shading = flat;
        self
    }

    #[must_use]
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }
}
