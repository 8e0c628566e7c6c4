use serde::{Deserialize, Serialize};

use crate::math::Pose;

/// How confidently the tracking subsystem is estimating a marker's pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingQuality {
    /// Pose is being actively tracked
    #[default]
    Tracking,
    /// Pose is an estimate (marker partially out of view, motion blur, ...)
    Limited,
    /// Marker is not tracked
    None,
}

impl TrackingQuality {
    /// Only full tracking counts as active; limited and none are treated as lost.
    pub fn is_tracking(self) -> bool {
        matches!(self, Self::Tracking)
    }
}

/// A marker that started being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerAdded {
    pub id: String,
    #[serde(default)]
    pub pose: Pose,
}

/// A marker whose pose or tracking quality changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerUpdated {
    pub id: String,
    #[serde(default)]
    pub pose: Pose,
    #[serde(default)]
    pub quality: TrackingQuality,
}

/// One batch of marker lifecycle events delivered on the update cycle.
///
/// Handlers process `added`, then `updated`, then `removed`, each list in
/// the order the tracking subsystem supplied it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingBatch {
    #[serde(default)]
    pub added: Vec<MarkerAdded>,
    #[serde(default)]
    pub updated: Vec<MarkerUpdated>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl TrackingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    pub fn with_added(mut self, id: impl Into<String>, pose: Pose) -> Self {
        self.added.push(MarkerAdded {
            id: id.into(),
            pose,
        });
        self
    }

    pub fn with_updated(
        mut self,
        id: impl Into<String>,
        pose: Pose,
        quality: TrackingQuality,
    ) -> Self {
        self.updated.push(MarkerUpdated {
            id: id.into(),
            pose,
            quality,
        });
        self
    }

    pub fn with_removed(mut self, id: impl Into<String>) -> Self {
        self.removed.push(id.into());
        self
    }
}
