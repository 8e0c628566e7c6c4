use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Administrative operations external controllers can issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ForceShow { id: String },
    ForceHide { id: String },
    HideAll,
    SetScale { value: Vec3 },
    /// Euler angles in degrees
    SetRotation { value: Vec3 },
    SetPosition { value: Vec3 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let show: Command =
            serde_json::from_str(r#"{"command": "force_show", "id": "qr1"}"#).unwrap();
        assert_eq!(show, Command::ForceShow { id: "qr1".into() });

        let hide_all: Command = serde_json::from_str(r#"{"command": "hide_all"}"#).unwrap();
        assert_eq!(hide_all, Command::HideAll);

        let scale: Command =
            serde_json::from_str(r#"{"command": "set_scale", "value": [2, 2, 2]}"#).unwrap();
        assert_eq!(
            scale,
            Command::SetScale {
                value: Vec3::new(2.0, 2.0, 2.0)
            }
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"command": "explode"}"#).is_err());
    }
}
