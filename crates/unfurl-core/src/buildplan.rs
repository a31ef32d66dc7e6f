//! Build plan exchanged between pipeline contributors.
//!
//! The plan is a mapping from dependency name to a record of capabilities
//! the contributor provides and capabilities (with metadata) it requires.
//! This contributor reads and writes only its own entries; the plan as a
//! whole is owned by the surrounding pipeline and passed in by value.

use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Dependency name under which this contributor publishes its request.
pub const DEPENDENCY: &str = "application-archive";

/// Companion capability this contributor unconditionally provides alongside
/// the archive expansion itself: downstream contributors see an unpacked
/// application.
pub const APPLICATION: &str = "unpacked-application";

/// Metadata key holding the absolute path of the archive to expand.
pub const ARCHIVE: &str = "archive";

/// A capability requirement: a name plus free-form string metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Name of the required capability.
    pub name: String,

    /// Key/value metadata attached to the requirement.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Requirement {
    /// Creates a requirement with the given name and no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// One contributor's record in the build plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Capability names this contributor provides.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,

    /// Capabilities this contributor requires from the pipeline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Requirement>,
}

impl Entry {
    /// Adds `name` to `provides` unless already present.
    pub fn provide(&mut self, name: &str) {
        if !self.provides.iter().any(|p| p == name) {
            self.provides.push(name.to_string());
        }
    }

    /// Returns the requirement with the given name, creating it if absent.
    ///
    /// Pre-existing metadata on an existing requirement is preserved.
    pub fn require(&mut self, name: &str) -> &mut Requirement {
        if let Some(idx) = self.requires.iter().position(|r| r.name == name) {
            &mut self.requires[idx]
        } else {
            self.requires.push(Requirement::new(name));
            // Just pushed, so the last element exists.
            let last = self.requires.len() - 1;
            &mut self.requires[last]
        }
    }

    /// Returns the requirement with the given name, if present.
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requires.iter().find(|r| r.name == name)
    }
}

/// Mapping from dependency name to contributor record.
///
/// Immutable once handed to a component; merging produces a new plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildPlan(BTreeMap<String, Entry>);

impl BuildPlan {
    /// Creates an empty build plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.0.get(name)
    }

    /// Returns a mutable entry for `name`, inserting a default if absent.
    pub fn entry(&mut self, name: &str) -> &mut Entry {
        self.0.entry(name.to_string()).or_default()
    }

    /// Returns `true` if the plan has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
