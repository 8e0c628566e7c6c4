use thiserror::Error;

use crate::math::LocalTransform;
use crate::registry::{ContentDescriptor, TemplateRef};

/// Presentation side of an instance.
///
/// The lifecycle manager owns visibility state; implementors only react to the
/// enable/disable and transform calls it makes on transitions.
pub trait ContentObject {
    /// Called exactly once per Hidden <-> Visible transition
    fn set_enabled(&mut self, enabled: bool);

    /// Called at preload and whenever the global transform policy changes
    fn set_local_transform(&mut self, transform: &LocalTransform);

    /// Optional: the anchor this content hangs under was moved
    fn anchor_moved(&mut self, _pose: &crate::math::Pose) {}
}

/// Builds content objects from templates during preload.
pub trait ContentFactory {
    fn instantiate(
        &mut self,
        descriptor: &ContentDescriptor,
    ) -> Result<Box<dyn ContentObject>, InstantiationError>;
}

/// Content for a template could not be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to instantiate template '{template}': {reason}")]
pub struct InstantiationError {
    pub template: String,
    pub reason: String,
}

impl InstantiationError {
    pub fn new(template: &TemplateRef, reason: impl Into<String>) -> Self {
        Self {
            template: template.as_str().to_string(),
            reason: reason.into(),
        }
    }
}
