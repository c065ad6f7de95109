//! Catalog module - slot and template definitions

use crate::ContentTypeId;
use std::fmt;

/// Identifier of a slot definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u64);

impl SlotId {
    /// Create a SlotId from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a template definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateId(u64);

impl TemplateId {
    /// Create a TemplateId from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named slot that classifies relationships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Slot identifier
    pub id: SlotId,

    /// Human-readable slot name
    pub name: String,

    /// Kind of relationship created in this slot (e.g. "ActiveAssembly")
    pub relationship_name: Option<String>,
}

impl Slot {
    /// Create a new slot definition
    pub fn new(id: SlotId, name: impl Into<String>, relationship_name: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            relationship_name,
        }
    }

    /// Whether the slot carries a non-blank relationship name
    pub fn is_configured(&self) -> bool {
        self.relationship_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// A named template assigned to created relationships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template identifier
    pub id: TemplateId,

    /// Human-readable template name
    pub name: String,

    /// Content type the template is bound to, if any
    pub content_type: Option<ContentTypeId>,
}

impl Template {
    /// Create a new template definition
    pub fn new(id: TemplateId, name: impl Into<String>, content_type: Option<ContentTypeId>) -> Self {
        Self {
            id,
            name: name.into(),
            content_type,
        }
    }
}
