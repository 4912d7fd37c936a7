//! Engine configuration.
//!
//! Every section has defaults, so a settings file only needs the values it
//! changes. The camera section is optional: when it is absent each scene
//! supplies its own camera through [`EngineSettings::camera_or`].
//!
//! ```json
//! {
//!     "window": { "title": "Zoo", "width": 1280, "height": 720 },
//!     "background": 9419988,
//!     "models": [
//!         { "path": "models/Parrot.glb", "position": [0, 0, 2.5], "scale": 0.025 }
//!     ]
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::ModelPlacement;
use crate::errors::{Error, Result};
use crate::scene::Camera;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "diorama".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the camera looks at and orbits around.
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 35.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(-4.0, 4.0, 10.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraSettings {
    /// Builds a camera with these intrinsics and the given aspect ratio.
    #[must_use]
    pub fn build(&self, aspect: f32) -> Camera {
        Camera::new_perspective(self.fov, aspect, self.near, self.far)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(Error::Config(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub window: WindowSettings,
    /// Background colour as `0xRRGGBB` (sRGB).
    pub background: Option<u32>,
    /// `None` when the file has no camera section.
    pub camera: Option<CameraSettings>,
    pub models: Vec<ModelPlacement>,
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// The configured camera, or `fallback()` when the section was omitted.
    #[must_use]
    pub fn camera_or(&self, fallback: impl FnOnce() -> CameraSettings) -> CameraSettings {
        self.camera.clone().unwrap_or_else(fallback)
    }

    /// Rejects values no camera or window can be built from.
    pub fn validate(&self) -> Result<()> {
        if let Some(camera) = &self.camera {
            camera.validate()?;
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config("window size must be non-zero".to_string()));
        }
        if let Some(model) = self.models.iter().find(|m| m.path.is_empty()) {
            return Err(Error::Config(format!(
                "model placement at {:?} has an empty path",
                model.position
            )));
        }
        Ok(())
    }
}
