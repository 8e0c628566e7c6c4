//! Global transform policy
//!
//! One scale / rotation / position offset shared by every instance. The
//! composed transform is local to the anchor, so it stacks on top of the
//! world-space pose written by the synchronizer.

use tether_types::TransformSettings;

use crate::math::{LocalTransform, Quat, Vec3};
use crate::pool::InstancePool;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransformPolicy {
    scale: Vec3,
    /// Euler degrees as configured
    rotation_euler: Vec3,
    rotation: Quat,
    position: Vec3,
}

impl Default for GlobalTransformPolicy {
    fn default() -> Self {
        Self::new(Vec3::ONE, Vec3::ZERO, Vec3::ZERO)
    }
}

impl From<&TransformSettings> for GlobalTransformPolicy {
    fn from(settings: &TransformSettings) -> Self {
        Self::new(
            settings.scale.into(),
            settings.rotation.into(),
            settings.position.into(),
        )
    }
}

impl GlobalTransformPolicy {
    pub fn new(scale: Vec3, rotation_euler: Vec3, position: Vec3) -> Self {
        if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
            tracing::warn!(?scale, "Non-positive global scale component");
        }
        Self {
            scale,
            rotation_euler,
            rotation: Quat::from_euler_degrees(rotation_euler),
            position,
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation_euler(&self) -> Vec3 {
        self.rotation_euler
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Composed transform applied to every content object
    pub fn local_transform(&self) -> LocalTransform {
        LocalTransform {
            translation: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn set_scale(&mut self, pool: &mut InstancePool, scale: Vec3) {
        if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
            tracing::warn!(?scale, "Non-positive global scale component");
        }
        self.scale = scale;
        self.apply(pool);
    }

    pub fn set_rotation(&mut self, pool: &mut InstancePool, euler_degrees: Vec3) {
        self.rotation_euler = euler_degrees;
        self.rotation = Quat::from_euler_degrees(euler_degrees);
        self.apply(pool);
    }

    pub fn set_position(&mut self, pool: &mut InstancePool, position: Vec3) {
        self.position = position;
        self.apply(pool);
    }

    /// Re-apply to every instance, visible or not.
    pub fn apply(&self, pool: &mut InstancePool) {
        let local = self.local_transform();
        for instance in pool.iter_mut() {
            instance.apply_local_transform(&local);
        }
        tracing::info!(
            scale = ?self.scale,
            rotation = ?self.rotation_euler,
            position = ?self.position,
            instances = pool.len(),
            "Global transform applied"
        );
    }
}
