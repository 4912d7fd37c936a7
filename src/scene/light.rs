use glam::Vec3;

/// Sky/ground gradient light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    /// Linear colour received from below.
    pub ground_color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Parallel rays travelling from the node position towards the origin.
    Directional,
    /// The light's `color` is the sky colour.
    Hemisphere(HemisphereLight),
    Ambient,
}

/// Light component. Colours are linear RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    #[must_use]
    pub fn new_hemisphere(sky_color: Vec3, ground_color: Vec3, intensity: f32) -> Self {
        Self {
            color: sky_color,
            intensity,
            kind: LightKind::Hemisphere(HemisphereLight { ground_color }),
        }
    }

    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }
}
