pub mod batch;
pub mod command;
pub mod handler;

pub use batch::{MarkerAdded, MarkerUpdated, TrackingBatch, TrackingQuality};
pub use command::Command;
pub use handler::BatchHandler;
