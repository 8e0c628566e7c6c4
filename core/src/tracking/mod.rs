//! Marker lifecycle tracking
//!
//! This module provides:
//! - **Visibility**: the Hidden / Visible state machine driven by marker batches
//! - **Pose sync**: copying live marker poses onto instance anchors
//! - **Policy**: the global local-space transform shared by all instances
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   TrackingBatch (tracking subsystem)             │
//! │  added: [qr1 @ pose]   updated: [qr2 @ pose, None]   removed: [] │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                     VisibilityManager
//!                   (registry + pool + policy)
//!                              │
//!              ┌───────────────┼────────────────┐
//!              ▼               ▼                ▼
//!        pose::sync     set_enabled(bool)   read-only queries
//!        (anchor)       (content object)    (overlay, controllers)
//! ```

pub mod policy;
pub mod pose;
mod visibility;


pub use policy::GlobalTransformPolicy;
pub use visibility::{InstanceStatus, ManagerOptions, VisibilityManager};
