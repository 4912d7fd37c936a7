use glam::{Quat, Vec3, Vec4};

/// Maximum number of morph targets a weight track animates.
pub const MAX_MORPH_TARGETS: usize = 8;

/// A keyframe value type.
///
/// `interpolate_linear` is a plain lerp for vectors and scalars and a
/// shortest-arc slerp for rotations. `interpolate_cubic` evaluates a Hermite
/// segment whose tangents are scaled by the keyframe interval `dt`.
pub trait Interpolatable: Copy + Default + std::fmt::Debug {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;
}

/// Hermite basis `(s0, s1, s2, s3)` for `v0`, `m0`, `v1`, `m1`.
#[inline]
fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    (s0, s1, s2, s3)
}

/// Fixed-size morph weight sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MorphWeightData {
    pub weights: [f32; MAX_MORPH_TARGETS],
}

impl MorphWeightData {
    /// Packs up to [`MAX_MORPH_TARGETS`] weights; extra values are dropped.
    #[must_use]
    pub fn from_slice(values: &[f32]) -> Self {
        let mut data = Self::default();
        let n = values.len().min(MAX_MORPH_TARGETS);
        data.weights[..n].copy_from_slice(&values[..n]);
        data
    }
}

impl Interpolatable for MorphWeightData {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let mut result = Self::default();
        for (i, w) in result.weights.iter_mut().enumerate() {
            *w = f32::interpolate_linear(start.weights[i], end.weights[i], t);
        }
        result
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let mut result = Self::default();
        for (i, w) in result.weights.iter_mut().enumerate() {
            *w = f32::interpolate_cubic(
                v0.weights[i],
                out_tangent0.weights[i],
                in_tangent1.weights[i],
                v1.weights[i],
                t,
                dt,
            );
        }
        result
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        s0 * v0 + s1 * out_tangent0 * dt + s2 * v1 + s3 * in_tangent1 * dt
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        v0 * s0 + out_tangent0 * (s1 * dt) + v1 * s2 + in_tangent1 * (s3 * dt)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        let result = Vec4::from(v0) * s0
            + Vec4::from(out_tangent0) * (s1 * dt)
            + Vec4::from(v1) * s2
            + Vec4::from(in_tangent1) * (s3 * dt);

        // Hermite blending leaves the unit sphere.
        Quat::from_vec4(result).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn hermite_endpoints_match_keyframes() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.0, 8.0);
        let m = Vec3::splat(10.0);
        assert!(Vec3::interpolate_cubic(a, m, m, b, 0.0, 1.0).abs_diff_eq(a, 1e-6));
        assert!(Vec3::interpolate_cubic(a, m, m, b, 1.0, 1.0).abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn slerp_midpoint_is_half_angle() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(PI / 2.0);
        let mid = Quat::interpolate_linear(a, b, 0.5);
        assert!(mid.abs_diff_eq(Quat::from_rotation_y(PI / 4.0), 1e-5));
    }

    #[test]
    fn morph_weights_pack_and_lerp() {
        let a = MorphWeightData::from_slice(&[0.0, 1.0]);
        let b = MorphWeightData::from_slice(&[1.0, 0.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let mid = MorphWeightData::interpolate_linear(a, b, 0.5);
        assert!((mid.weights[0] - 0.5).abs() < 1e-6);
        assert!((mid.weights[1] - 0.5).abs() < 1e-6);
        assert!((mid.weights[7] - 0.25).abs() < 1e-6);
    }
}
