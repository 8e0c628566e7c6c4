//! Content registry
//!
//! Immutable mapping from marker id to content descriptor, built once at
//! startup from the raw `[[content]]` entries of the tracker config.
//! Invalid entries are reported and skipped; they never abort startup.

use std::fmt;

use hashbrown::HashMap;
use tether_types::{ContentEntry, DuplicatePolicy};
use thiserror::Error;

/// Opaque reference to a content template. Not owned or interpreted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated content entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub id: String,
    pub template: TemplateRef,
}

/// Why a raw content entry was not registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("content entry #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("content entry '{id}' has no template")]
    MissingTemplate { id: String },

    #[error("content entry '{id}' duplicates an earlier entry and was rejected")]
    DuplicateId { id: String },
}

impl ContentDescriptor {
    /// Validate the raw entry at position `index` of the content table
    pub fn from_entry(index: usize, entry: &ContentEntry) -> Result<Self, DescriptorError> {
        if entry.id.trim().is_empty() {
            return Err(DescriptorError::EmptyId { index });
        }
        let template = match entry.template.as_deref() {
            Some(t) if !t.trim().is_empty() => TemplateRef::new(t),
            _ => {
                return Err(DescriptorError::MissingTemplate {
                    id: entry.id.clone(),
                });
            }
        };
        Ok(Self {
            id: entry.id.clone(),
            template,
        })
    }
}

/// Registered descriptors, iterated in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    descriptors: Vec<ContentDescriptor>,
    index: HashMap<String, usize>,
}

impl ContentRegistry {
    /// Build a registry from raw entries, logging and skipping invalid ones.
    pub fn build(entries: &[ContentEntry], duplicates: DuplicatePolicy) -> Self {
        let (registry, errors) = Self::build_with_errors(entries, duplicates);
        for err in &errors {
            tracing::warn!(error = %err, "Skipping content entry");
        }
        registry
    }

    /// Same as [`ContentRegistry::build`] but hands the rejected entries back
    /// instead of logging them.
    pub fn build_with_errors(
        entries: &[ContentEntry],
        duplicates: DuplicatePolicy,
    ) -> (Self, Vec<DescriptorError>) {
        let mut registry = Self::default();
        let mut errors = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            let descriptor = match ContentDescriptor::from_entry(i, entry) {
                Ok(d) => d,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            match registry.index.get(&descriptor.id) {
                Some(&slot) => match duplicates {
                    DuplicatePolicy::Overwrite => {
                        tracing::warn!(
                            id = %descriptor.id,
                            previous = %registry.descriptors[slot].template,
                            replacement = %descriptor.template,
                            "Duplicate content id, later entry wins"
                        );
                        registry.descriptors[slot] = descriptor;
                    }
                    DuplicatePolicy::Reject => {
                        errors.push(DescriptorError::DuplicateId { id: descriptor.id });
                    }
                },
                None => {
                    registry
                        .index
                        .insert(descriptor.id.clone(), registry.descriptors.len());
                    registry.descriptors.push(descriptor);
                }
            }
        }

        (registry, errors)
    }

    pub fn get(&self, id: &str) -> Option<&ContentDescriptor> {
        self.index.get(id).map(|&slot| &self.descriptors[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentDescriptor> {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, template: Option<&str>) -> ContentEntry {
        ContentEntry {
            id: id.to_string(),
            template: template.map(str::to_string),
        }
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let entries = vec![
            entry("qr1", Some("robot")),
            entry("", Some("nameless")),
            entry("qr2", None),
            entry("qr3", Some("   ")),
            entry("qr4", Some("plant")),
        ];

        let (registry, errors) =
            ContentRegistry::build_with_errors(&entries, DuplicatePolicy::Overwrite);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("qr1"));
        assert!(registry.contains("qr4"));
        assert_eq!(
            errors,
            vec![
                DescriptorError::EmptyId { index: 1 },
                DescriptorError::MissingTemplate { id: "qr2".into() },
                DescriptorError::MissingTemplate { id: "qr3".into() },
            ]
        );
    }

    #[test]
    fn test_whitespace_id_counts_as_empty() {
        let entries = vec![entry("   ", Some("robot")), entry("\t", Some("plant"))];

        let (registry, errors) =
            ContentRegistry::build_with_errors(&entries, DuplicatePolicy::Overwrite);

        assert!(registry.is_empty());
        assert_eq!(
            errors,
            vec![
                DescriptorError::EmptyId { index: 0 },
                DescriptorError::EmptyId { index: 1 },
            ]
        );
    }

    #[test]
    fn test_duplicate_overwrite_keeps_position_and_takes_latest_template() {
        let entries = vec![
            entry("qr1", Some("first")),
            entry("qr2", Some("other")),
            entry("qr1", Some("second")),
        ];

        let (registry, errors) =
            ContentRegistry::build_with_errors(&entries, DuplicatePolicy::Overwrite);

        assert!(errors.is_empty());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("qr1").unwrap().template.as_str(), "second");
        let ids: Vec<_> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["qr1", "qr2"]);
    }

    #[test]
    fn test_duplicate_reject_keeps_first() {
        let entries = vec![entry("qr1", Some("first")), entry("qr1", Some("second"))];

        let (registry, errors) =
            ContentRegistry::build_with_errors(&entries, DuplicatePolicy::Reject);

        assert_eq!(registry.get("qr1").unwrap().template.as_str(), "first");
        assert_eq!(errors, vec![DescriptorError::DuplicateId { id: "qr1".into() }]);
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        let entries = vec![entry("QR1", Some("upper")), entry("qr1", Some("lower"))];

        let registry = ContentRegistry::build(&entries, DuplicatePolicy::Reject);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("QR1").unwrap().template.as_str(), "upper");
        assert!(registry.get("Qr1").is_none());
    }
}
