use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Tracker Config
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure of a tracker config file.
///
/// ```toml
/// single_visible = true
/// hide_on_tracking_lost = true
///
/// [transform]
/// scale = [0.5, 0.5, 0.5]
///
/// [[content]]
/// id = "qr1"
/// template = "models/robot.glb"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Restrict the whole pool to at most one visible instance
    #[serde(default)]
    pub single_visible: bool,

    /// Hide an instance as soon as its marker reports lost tracking
    #[serde(default = "default_true")]
    pub hide_on_tracking_lost: bool,

    /// What to do when two content entries share an id
    #[serde(default)]
    pub duplicate_ids: DuplicatePolicy,

    /// Offsets applied to every instance's local transform
    #[serde(default)]
    pub transform: TransformSettings,

    /// Marker id -> content template pairs
    #[serde(default, rename = "content")]
    pub content: Vec<ContentEntry>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            single_visible: false,
            hide_on_tracking_lost: true,
            duplicate_ids: DuplicatePolicy::default(),
            transform: TransformSettings::default(),
            content: Vec::new(),
        }
    }
}

/// Raw content entry as written in config.
///
/// Entries are validated when the registry is built; a blank id or a
/// missing template is reported and the entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Marker identifier reported by the tracking subsystem (case-sensitive)
    #[serde(default)]
    pub id: String,

    /// Opaque reference to the content template (asset path, prefab name, ...)
    #[serde(default)]
    pub template: Option<String>,
}

impl ContentEntry {
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: Some(template.into()),
        }
    }
}

/// Policy for content entries that reuse an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later entry replaces the earlier one
    #[default]
    Overwrite,
    /// Earlier entry is kept, later one is reported as a config error
    Reject,
}

/// Global transform offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSettings {
    /// Per-axis scale
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],

    /// Euler angles in degrees
    #[serde(default)]
    pub rotation: [f32; 3],

    /// Position offset relative to the anchor
    #[serde(default)]
    pub position: [f32; 3],
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            rotation: [0.0; 3],
            position: [0.0; 3],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_true() -> bool {
    true
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
single_visible = true
hide_on_tracking_lost = false
duplicate_ids = "reject"

[transform]
scale = [0.5, 0.5, 0.5]
rotation = [0.0, 90.0, 0.0]
position = [0.0, 0.1, 0.0]

[[content]]
id = "qr1"
template = "models/robot.glb"

[[content]]
id = "qr2"
template = "models/plant.glb"
"#;

        let config: TrackerConfig = toml::from_str(toml).unwrap();
        assert!(config.single_visible);
        assert!(!config.hide_on_tracking_lost);
        assert_eq!(config.duplicate_ids, DuplicatePolicy::Reject);
        assert_eq!(config.transform.scale, [0.5, 0.5, 0.5]);
        assert_eq!(config.transform.rotation, [0.0, 90.0, 0.0]);
        assert_eq!(config.content.len(), 2);
        assert_eq!(config.content[1], ContentEntry::new("qr2", "models/plant.glb"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: TrackerConfig = toml::from_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert!(config.hide_on_tracking_lost);
        assert_eq!(config.transform.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_entry_without_template_still_parses() {
        let toml = r#"
[[content]]
id = "orphan"
"#;

        let config: TrackerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.content[0].template, None);
    }
}
