//! Visibility state machine
//!
//! Consumes marker lifecycle batches and administrative commands, and keeps
//! every instance either Hidden or Visible. With single-visible mode on, at
//! most one instance is Visible at any time and `currently_visible` names it.

use serde::Serialize;
use tether_types::TrackerConfig;

use crate::events::{BatchHandler, Command, TrackingBatch, TrackingQuality};
use crate::math::{LocalTransform, Pose, Vec3};
use crate::pool::{ContentFactory, InstancePool, Visibility};
use crate::registry::ContentRegistry;

use super::policy::GlobalTransformPolicy;
use super::pose::sync as sync_pose;

/// Policy flags fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerOptions {
    /// At most one instance visible at a time
    pub single_visible: bool,
    /// Hide as soon as a marker reports Limited / None tracking
    pub hide_on_tracking_lost: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            single_visible: false,
            hide_on_tracking_lost: true,
        }
    }
}

impl From<&TrackerConfig> for ManagerOptions {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            single_visible: config.single_visible,
            hide_on_tracking_lost: config.hide_on_tracking_lost,
        }
    }
}

/// Read-only view of one instance for overlays and tooling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceStatus {
    pub id: String,
    pub visible: bool,
    pub anchor: Pose,
    pub local: LocalTransform,
}

/// Owns the registry, the instance pool and the global transform policy.
pub struct VisibilityManager {
    registry: ContentRegistry,
    pool: InstancePool,
    policy: GlobalTransformPolicy,
    options: ManagerOptions,
    /// Most recently shown instance that is still visible
    current: Option<String>,
}

impl VisibilityManager {
    /// Preload one instance per registered descriptor, all Hidden.
    pub fn new(
        registry: ContentRegistry,
        factory: &mut dyn ContentFactory,
        policy: GlobalTransformPolicy,
        options: ManagerOptions,
    ) -> Self {
        let pool = InstancePool::preload(&registry, factory, &policy.local_transform());
        Self {
            registry,
            pool,
            policy,
            options,
            current: None,
        }
    }

    /// Build registry, policy and pool straight from a tracker config.
    pub fn from_config(config: &TrackerConfig, factory: &mut dyn ContentFactory) -> Self {
        let registry = ContentRegistry::build(&config.content, config.duplicate_ids);
        let policy = GlobalTransformPolicy::from(&config.transform);
        Self::new(registry, factory, policy, ManagerOptions::from(config))
    }

    // --- Queries ---

    /// Number of instances in the pool
    pub fn count(&self) -> usize {
        self.pool.len()
    }

    pub fn visible_count(&self) -> usize {
        self.pool.iter().filter(|i| i.is_visible()).count()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.pool.get(id).is_some_and(|i| i.is_visible())
    }

    pub fn currently_visible(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Visible ids in registry order
    pub fn visible_ids(&self) -> Vec<&str> {
        self.pool
            .iter()
            .filter(|i| i.is_visible())
            .map(|i| i.id())
            .collect()
    }

    pub fn anchor_pose(&self, id: &str) -> Option<Pose> {
        self.pool.get(id).map(|i| i.anchor().pose)
    }

    pub fn local_transform(&self) -> LocalTransform {
        self.policy.local_transform()
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &InstancePool {
        &self.pool
    }

    pub fn policy(&self) -> &GlobalTransformPolicy {
        &self.policy
    }

    pub fn options(&self) -> ManagerOptions {
        self.options
    }

    pub fn snapshot(&self) -> Vec<InstanceStatus> {
        self.pool
            .iter()
            .map(|i| InstanceStatus {
                id: i.id().to_string(),
                visible: i.is_visible(),
                anchor: i.anchor().pose,
                local: *i.local_transform(),
            })
            .collect()
    }

    // --- Marker lifecycle ---

    pub fn on_added(&mut self, id: &str, pose: Pose) {
        if !self.pool.contains(id) {
            tracing::debug!(id, "Added event for unknown marker, ignoring");
            return;
        }
        self.show_tracked(id, pose);
    }

    pub fn on_updated(&mut self, id: &str, pose: Pose, quality: TrackingQuality) {
        let Some(instance) = self.pool.get(id) else {
            tracing::debug!(id, "Updated event for unknown marker, ignoring");
            return;
        };

        if quality.is_tracking() {
            if instance.is_visible() {
                sync_pose(&mut self.pool, id, pose);
            } else {
                self.show_tracked(id, pose);
            }
        } else if self.options.hide_on_tracking_lost {
            self.hide(id);
        }
    }

    pub fn on_removed(&mut self, id: &str) {
        if !self.pool.contains(id) {
            tracing::debug!(id, "Removed event for unknown marker, ignoring");
            return;
        }
        self.hide(id);
    }

    // --- Administrative ---

    pub fn hide_all(&mut self) {
        for instance in self.pool.iter_mut() {
            if instance.set_visibility(Visibility::Hidden) {
                tracing::debug!(id = instance.id(), "Hidden");
            }
        }
        self.current = None;
    }

    /// Show `id` without a pose update. Returns false for an unknown id.
    pub fn force_show(&mut self, id: &str) -> bool {
        if !self.pool.contains(id) {
            tracing::warn!(id, "Cannot force-show unknown marker");
            return false;
        }
        if self.options.single_visible {
            self.hide_all();
        }
        self.set_visible(id);
        true
    }

    pub fn force_hide(&mut self, id: &str) {
        self.on_removed(id);
    }

    pub fn set_global_scale(&mut self, scale: Vec3) {
        self.policy.set_scale(&mut self.pool, scale);
    }

    /// Euler angles in degrees
    pub fn set_global_rotation(&mut self, euler_degrees: Vec3) {
        self.policy.set_rotation(&mut self.pool, euler_degrees);
    }

    pub fn set_global_position(&mut self, position: Vec3) {
        self.policy.set_position(&mut self.pool, position);
    }

    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::ForceShow { id } => {
                self.force_show(id);
            }
            Command::ForceHide { id } => self.force_hide(id),
            Command::HideAll => self.hide_all(),
            Command::SetScale { value } => self.set_global_scale(*value),
            Command::SetRotation { value } => self.set_global_rotation(*value),
            Command::SetPosition { value } => self.set_global_position(*value),
        }
    }

    // --- Transitions ---

    /// Shared path for Added and the Hidden -> Visible branch of Updated.
    fn show_tracked(&mut self, id: &str, pose: Pose) {
        if self.options.single_visible {
            self.hide_others(id);
        }
        sync_pose(&mut self.pool, id, pose);
        self.set_visible(id);
    }

    fn hide_others(&mut self, keep: &str) {
        for instance in self.pool.iter_mut() {
            if instance.id() != keep && instance.set_visibility(Visibility::Hidden) {
                tracing::debug!(id = instance.id(), shown = keep, "Evicted");
            }
        }
        if self.current.as_deref().is_some_and(|c| c != keep) {
            self.current = None;
        }
    }

    fn set_visible(&mut self, id: &str) {
        let Some(instance) = self.pool.get_mut(id) else {
            return;
        };
        if instance.set_visibility(Visibility::Visible) {
            tracing::debug!(id, "Visible");
        }
        self.current = Some(id.to_string());
    }

    fn hide(&mut self, id: &str) {
        let Some(instance) = self.pool.get_mut(id) else {
            return;
        };
        if instance.set_visibility(Visibility::Hidden) {
            tracing::debug!(id, "Hidden");
        }
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
    }
}

impl BatchHandler for VisibilityManager {
    fn handle_batch(&mut self, batch: &TrackingBatch) {
        for added in &batch.added {
            self.on_added(&added.id, added.pose);
        }
        for updated in &batch.updated {
            self.on_updated(&updated.id, updated.pose, updated.quality);
        }
        for id in &batch.removed {
            self.on_removed(id);
        }
    }
}

impl std::fmt::Debug for VisibilityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityManager")
            .field("options", &self.options)
            .field("policy", &self.policy)
            .field("current", &self.current)
            .field("pool", &self.pool)
            .finish()
    }
}
