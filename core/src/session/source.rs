//! Tracking sources and the session that pumps them
//!
//! The camera/image-tracking subsystem is opaque to the core: anything that
//! can hand over [`TrackingBatch`]es implements [`TrackingSource`].

use std::collections::VecDeque;

use crate::events::{BatchHandler, TrackingBatch};
use crate::tracking::VisibilityManager;

/// Producer of marker lifecycle batches
pub trait TrackingSource {
    /// Next pending batch, or None once nothing is queued for this cycle
    fn poll(&mut self) -> Option<TrackingBatch>;
}

/// FIFO source, used for replays and tests
#[derive(Debug, Clone, Default)]
pub struct QueuedSource {
    pending: VecDeque<TrackingBatch>,
}

impl QueuedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: TrackingBatch) {
        self.pending.push_back(batch);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl TrackingSource for QueuedSource {
    fn poll(&mut self) -> Option<TrackingBatch> {
        self.pending.pop_front()
    }
}

impl From<Vec<TrackingBatch>> for QueuedSource {
    fn from(batches: Vec<TrackingBatch>) -> Self {
        Self {
            pending: batches.into(),
        }
    }
}

/// Binds a tracking source to a visibility manager.
///
/// Without a source the session is inert: the problem is logged once at
/// construction and [`TrackingSession::pump`] never delivers anything.
pub struct TrackingSession {
    manager: VisibilityManager,
    source: Option<Box<dyn TrackingSource>>,
    batches_handled: u64,
}

impl TrackingSession {
    pub fn new(manager: VisibilityManager, source: Option<Box<dyn TrackingSource>>) -> Self {
        if source.is_none() {
            tracing::error!("No tracking source configured, marker content will never be shown");
        }
        Self {
            manager,
            source,
            batches_handled: 0,
        }
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Drain and handle every pending batch in order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let Some(source) = self.source.as_mut() else {
            return 0;
        };
        let mut handled = 0;
        while let Some(batch) = source.poll() {
            self.manager.handle_batch(&batch);
            handled += 1;
        }
        self.batches_handled += handled as u64;
        handled
    }

    pub fn batches_handled(&self) -> u64 {
        self.batches_handled
    }

    pub fn manager(&self) -> &VisibilityManager {
        &self.manager
    }

    /// Administrative access (force show/hide, policy changes)
    pub fn manager_mut(&mut self) -> &mut VisibilityManager {
        &mut self.manager
    }

    pub fn into_manager(self) -> VisibilityManager {
        self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{LocalTransform, Pose};
    use crate::pool::{ContentFactory, ContentObject, InstantiationError};
    use crate::registry::ContentDescriptor;
    use tether_types::{ContentEntry, TrackerConfig};

    struct Inert;

    impl ContentObject for Inert {
        fn set_enabled(&mut self, _enabled: bool) {}
        fn set_local_transform(&mut self, _transform: &LocalTransform) {}
    }

    struct InertFactory;

    impl ContentFactory for InertFactory {
        fn instantiate(
            &mut self,
            _descriptor: &ContentDescriptor,
        ) -> Result<Box<dyn ContentObject>, InstantiationError> {
            Ok(Box::new(Inert))
        }
    }

    fn manager() -> VisibilityManager {
        let config = TrackerConfig {
            single_visible: true,
            content: vec![ContentEntry::new("qr1", "a"), ContentEntry::new("qr2", "b")],
            ..TrackerConfig::default()
        };
        VisibilityManager::from_config(&config, &mut InertFactory)
    }

    #[test]
    fn test_pump_drains_batches_in_order() {
        let source = QueuedSource::from(vec![
            TrackingBatch::new().with_added("qr1", Pose::IDENTITY),
            TrackingBatch::new().with_added("qr2", Pose::IDENTITY),
        ]);
        let mut session = TrackingSession::new(manager(), Some(Box::new(source)));

        assert_eq!(session.pump(), 2);
        assert_eq!(session.pump(), 0);
        assert_eq!(session.batches_handled(), 2);
        assert_eq!(session.manager().currently_visible(), Some("qr2"));
    }

    #[test]
    fn test_session_without_source_is_inert() {
        let mut session = TrackingSession::new(manager(), None);

        assert!(!session.has_source());
        assert_eq!(session.pump(), 0);
        assert_eq!(session.manager().visible_count(), 0);

        // Administrative access still works
        session.manager_mut().force_show("qr1");
        assert!(session.manager().is_visible("qr1"));
    }
}
