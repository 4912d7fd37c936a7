use glam::{Affine3A, Mat4, Vec3};

/// Perspective camera component.
///
/// The intrinsics (`fov`, `near`, `far`) are fixed at construction; only the
/// aspect ratio changes at runtime, through [`set_aspect`](Self::set_aspect).
/// Every aspect change marks the projection dirty and rebuilds it, so a
/// projection matrix never lags behind the aspect it was derived from.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, in radians.
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,

    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    projection_dirty: bool,
}

impl Camera {
    /// Creates a perspective camera. `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov.to_radians(),
            aspect,
            near,
            far,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            projection_dirty: true,
        };
        cam.update_projection_matrix();
        cam
    }

    #[inline]
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Changes the aspect ratio and rebuilds the projection.
    ///
    /// Non-finite or non-positive ratios are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("Ignoring invalid camera aspect ratio {aspect}");
            return;
        }
        if (self.aspect - aspect).abs() > f32::EPSILON {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
        self.update_projection_matrix();
    }

    #[inline]
    #[must_use]
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Recomputes the projection from fov/aspect/near/far if it is stale.
    pub fn update_projection_matrix(&mut self) {
        if !self.projection_dirty {
            return;
        }
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.projection_dirty = false;
    }

    /// Syncs the view matrix with the camera node's world transform.
    pub fn update_view(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Copies out what a renderer needs for one frame.
    #[must_use]
    pub fn extract_render_camera(&self) -> RenderCamera {
        RenderCamera {
            view_matrix: self.view_matrix,
            projection_matrix: self.projection_matrix,
            view_projection_matrix: self.projection_matrix * self.view_matrix,
            position: self.world_matrix.translation.into(),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

/// Immutable per-frame camera snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderCamera {
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub view_projection_matrix: Mat4,
    pub position: Vec3,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_rebuilds_projection() {
        let mut cam = Camera::new_perspective(35.0, 1.0, 0.1, 100.0);
        let before = *cam.projection_matrix();
        cam.set_aspect(2.0);
        assert!(!cam.is_projection_dirty());
        assert_ne!(before, *cam.projection_matrix());
        let expected = Mat4::perspective_rh(35f32.to_radians(), 2.0, 0.1, 100.0);
        assert!(cam.projection_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = Camera::new_perspective(35.0, 1.5, 0.1, 100.0);
        cam.set_aspect(f32::INFINITY);
        cam.set_aspect(0.0);
        assert_eq!(cam.aspect(), 1.5);
    }
}
