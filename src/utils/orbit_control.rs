use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::app::input::{Input, MouseButton};
use crate::scene::transform::Transform;

const POLAR_EPS: f32 = 0.0001;

/// Orbit camera controller.
///
/// Left drag rotates around `center`, the wheel zooms, right drag pans.
/// The camera transform is rewritten every update; the controller owns no
/// other scene state.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    /// Azimuth around +Y
    pub theta: f32,
    /// Polar angle from +Y
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    /// Creates controls looking from `position` at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(POLAR_EPS);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            center: target,
            radius,
            theta,
            phi,

            rotate_delta: Vec2::ZERO,
        }
    }

    fn offset_direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);

            self.theta += delta_apply.x;
            self.phi += delta_apply.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(POLAR_EPS, PI - POLAR_EPS);

        if input.scroll_delta.y != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll_delta.y.abs());
            if input.scroll_delta.y > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.is_button_pressed(MouseButton::Right) {
            let half_fov = fov_degrees.to_radians() / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world = target_world_height / screen_height;

            let forward = -self.offset_direction();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            self.center += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }

        transform.position = self.center + self.offset_direction() * self.radius;
        transform.look_at(self.center, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_keeps_camera_position() {
        let start = Vec3::new(-4.0, 4.0, 10.0);
        let mut controls = OrbitControls::new(start, Vec3::ZERO);
        let mut transform = Transform::new();
        let mut input = Input::new();
        input.handle_resize(800, 600);

        controls.update(&mut transform, &input, 35.0, 1.0 / 60.0);
        assert!((transform.position - start).length() < 1e-3);
    }

    #[test]
    fn scroll_zooms_in_within_limits() {
        let mut controls = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let mut transform = Transform::new();
        let mut input = Input::new();
        input.handle_scroll(0.0, 5.0);

        controls.update(&mut transform, &input, 35.0, 1.0 / 60.0);
        assert!(controls.radius < 10.0);
        assert!(controls.radius >= controls.min_distance);
    }
}
