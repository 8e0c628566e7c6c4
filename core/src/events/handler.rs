use super::TrackingBatch;

/// Anything that reacts to marker lifecycle batches.
/// One batch is handled to completion before the next one arrives.
pub trait BatchHandler {
    fn handle_batch(&mut self, batch: &TrackingBatch);
}
