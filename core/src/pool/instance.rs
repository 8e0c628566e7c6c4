use crate::math::{LocalTransform, Pose};

use super::ContentObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

/// World-space pose holder that the content object is parented under
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub pose: Pose,
}

/// Runtime state for one registered marker.
///
/// Created once during preload and reused for the whole session.
pub struct Instance {
    id: String,
    content: Box<dyn ContentObject>,
    anchor: Anchor,
    local: LocalTransform,
    visibility: Visibility,
}

impl Instance {
    pub(crate) fn new(
        id: String,
        mut content: Box<dyn ContentObject>,
        local: &LocalTransform,
    ) -> Self {
        content.set_local_transform(local);
        content.set_enabled(false);
        Self {
            id,
            content,
            anchor: Anchor::default(),
            local: *local,
            visibility: Visibility::Hidden,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn local_transform(&self) -> &LocalTransform {
        &self.local
    }

    /// Move to `visibility`. Returns false (and touches nothing) if already there.
    pub(crate) fn set_visibility(&mut self, visibility: Visibility) -> bool {
        if self.visibility == visibility {
            return false;
        }
        self.visibility = visibility;
        self.content.set_enabled(visibility.is_visible());
        true
    }

    pub(crate) fn set_anchor_pose(&mut self, pose: Pose) {
        self.anchor.pose = pose;
        self.content.anchor_moved(&pose);
    }

    pub(crate) fn apply_local_transform(&mut self, local: &LocalTransform) {
        self.local = *local;
        self.content.set_local_transform(local);
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("anchor", &self.anchor)
            .field("local", &self.local)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
