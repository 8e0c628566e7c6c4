//! Marker pose -> anchor synchronization

use crate::math::Pose;
use crate::pool::InstancePool;

/// Overwrite the anchor of `id` with the marker's world-space `pose`.
///
/// No smoothing and no staleness check. Returns false on a pool miss.
pub fn sync(pool: &mut InstancePool, id: &str, pose: Pose) -> bool {
    let Some(instance) = pool.get_mut(id) else {
        return false;
    };
    instance.set_anchor_pose(pose);
    true
}
