pub mod config;
pub mod events;
pub mod math;
pub mod pool;
pub mod registry;
pub mod session;
pub mod tracking;

// Re-exports for convenience
pub use config::{ConfigError, load_config, load_config_or_default};
pub use events::{BatchHandler, Command, TrackingBatch, TrackingQuality};
pub use math::{LocalTransform, Pose, Quat, Vec3};
pub use pool::{ContentFactory, ContentObject, InstantiationError, Visibility};
pub use registry::{ContentDescriptor, ContentRegistry, DescriptorError, TemplateRef};
pub use session::{QueuedSource, TrackingSession, TrackingSource};
pub use tracking::{GlobalTransformPolicy, InstanceStatus, ManagerOptions, VisibilityManager};
