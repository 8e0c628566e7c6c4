//! JSON-lines replay files
//!
//! Each non-empty line is either a tracking batch or an administrative
//! command. Lines starting with `#` are comments.
//!
//! ```text
//! {"added": [{"id": "qr1", "pose": {"position": [0, 0, 1]}}]}
//! {"updated": [{"id": "qr1", "pose": {"position": [0, 0, 1]}, "quality": "none"}]}
//! {"command": "force_show", "id": "qr2"}
//! ```

use tether_core::{Command, TrackingBatch};

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayLine {
    Command(Command),
    Batch(TrackingBatch),
}

/// A parsed line with its 1-based position in the file
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub line: usize,
    pub entry: ReplayLine,
}

pub fn parse_replay(contents: &str) -> Result<Vec<ReplayStep>, String> {
    let mut steps = Vec::new();
    for (i, raw) in contents.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry = parse_line(trimmed).map_err(|e| format!("line {}: {}", i + 1, e))?;
        steps.push(ReplayStep { line: i + 1, entry });
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<ReplayLine, String> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    // A "command" key always means a command, so typos surface instead of
    // silently parsing as an empty batch
    if value.get("command").is_some() {
        return serde_json::from_value::<Command>(value)
            .map(ReplayLine::Command)
            .map_err(|e| e.to_string());
    }
    serde_json::from_value::<TrackingBatch>(value)
        .map(ReplayLine::Batch)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::TrackingQuality;

    #[test]
    fn test_parse_mixed_replay() {
        let contents = r#"
# warm up
{"added": [{"id": "qr1", "pose": {"position": [0, 0, 1]}}]}

{"updated": [{"id": "qr1", "quality": "none"}]}
{"command": "hide_all"}
"#;

        let steps = parse_replay(contents).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].line, 3);
        assert!(matches!(&steps[0].entry, ReplayLine::Batch(b) if b.added[0].id == "qr1"));
        assert!(matches!(
            &steps[1].entry,
            ReplayLine::Batch(b) if b.updated[0].quality == TrackingQuality::None
        ));
        assert_eq!(steps[2].entry, ReplayLine::Command(Command::HideAll));
    }

    #[test]
    fn test_bad_command_reports_line() {
        let err = parse_replay("{}\n{\"command\": \"force_shw\", \"id\": \"qr1\"}").unwrap_err();
        assert!(err.starts_with("line 2:"), "{err}");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_replay("{not json").is_err());
    }
}
