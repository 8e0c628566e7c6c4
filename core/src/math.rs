//! Minimal vector, quaternion and TRS types.
//!
//! Covers what the lifecycle manager needs (pose storage, Euler conversion,
//! the composed local transform) without pulling in a linear-algebra crate.

use core::ops::Mul;

use serde::{Deserialize, Serialize};

/// A 3-component vector, serialized as `[x, y, z]`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// A rotation quaternion, serialized as `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::from_xyzw(0.0, 0.0, 0.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `radians` around a unit `axis`.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::from_xyzw(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Converts Euler angles in degrees.
    ///
    /// Rotation is applied around Z first, then X, then Y, matching the
    /// convention game engines use for inspector-style angles.
    #[must_use]
    pub fn from_euler_degrees(degrees: Vec3) -> Self {
        let qx = Self::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), degrees.x.to_radians());
        let qy = Self::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), degrees.y.to_radians());
        let qz = Self::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), degrees.z.to_radians());
        qy * qx * qz
    }
}

impl From<[f32; 4]> for Quat {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::from_xyzw(x, y, z, w)
    }
}

impl From<Quat> for [f32; 4] {
    fn from(q: Quat) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product; `a * b` applies `b` first.
    fn mul(self, rhs: Self) -> Self {
        Self::from_xyzw(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

/// World-space position and orientation of a marker or anchor.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default)]
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// Translation / rotation / scale relative to a parent anchor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LocalTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_quat_near(actual: Quat, expected: Quat) {
        let delta = [
            actual.x - expected.x,
            actual.y - expected.y,
            actual.z - expected.z,
            actual.w - expected.w,
        ];
        assert!(
            delta.iter().all(|d| d.abs() < 1e-5),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn zero_euler_is_identity() {
        assert_quat_near(Quat::from_euler_degrees(Vec3::ZERO), Quat::IDENTITY);
    }

    #[test]
    fn yaw_only_euler_matches_axis_angle() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let q = Quat::from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        assert_quat_near(q, Quat::from_xyzw(0.0, h, 0.0, h));
    }

    #[test]
    fn euler_applies_x_before_y() {
        // qy * qx; the reverse order would give z = +0.5
        let q = Quat::from_euler_degrees(Vec3::new(90.0, 90.0, 0.0));
        assert_quat_near(q, Quat::from_xyzw(0.5, 0.5, -0.5, 0.5));
    }

    #[test]
    fn pose_serializes_as_arrays() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let json = serde_json::to_string(&pose).unwrap();
        assert_eq!(json, r#"{"position":[1.0,2.0,3.0],"orientation":[0.0,0.0,0.0,1.0]}"#);

        let back: Pose = serde_json::from_str(r#"{"position":[1,2,3]}"#).unwrap();
        assert_eq!(back, pose);
    }
}
