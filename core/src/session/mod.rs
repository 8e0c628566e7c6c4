mod source;

pub use source::{QueuedSource, TrackingSession, TrackingSource};
