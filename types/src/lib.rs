//! Shared configuration types for Tether.
//!
//! These types are deserialized from the tracker TOML config and shared
//! between the core lifecycle manager and the tooling crates.

mod config;

pub use config::{ContentEntry, DuplicatePolicy, TrackerConfig, TransformSettings};
