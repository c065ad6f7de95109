//! Item module - content identifiers, revisions and head locators

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a content item, independent of revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(u32);

impl ContentId {
    /// Create a ContentId from its raw value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ContentId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when text is not a valid content id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContentIdError {
    input: String,
    reason: String,
}

impl ParseContentIdError {
    /// The text that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseContentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid content id '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseContentIdError {}

impl FromStr for ContentId {
    type Err = ParseContentIdError;

    /// Parse a decimal content id, ignoring surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use relsync_domain::ContentId;
    ///
    /// let id: ContentId = " 700 ".parse().unwrap();
    /// assert_eq!(id.value(), 700);
    /// assert!("".parse::<ContentId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e: ParseIntError| ParseContentIdError {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Revision number of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u32);

impl Revision {
    /// Create a Revision from its raw value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a content type (the item's schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentTypeId(u64);

impl ContentTypeId {
    /// Create a ContentTypeId from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A specific revision of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locator {
    /// Content item
    pub id: ContentId,

    /// Revision of the item
    pub revision: Revision,
}

impl Locator {
    /// Create a new locator
    pub fn new(id: ContentId, revision: Revision) -> Self {
        Self { id, revision }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.revision)
    }
}

/// Summary of a content item as known to the host platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    /// Content item
    pub id: ContentId,

    /// Content type of the item
    pub content_type: ContentTypeId,

    /// Current (published) revision
    pub current_revision: Revision,

    /// Revision checked out for editing, if any
    pub edit_revision: Option<Revision>,
}

impl ItemSummary {
    /// Create a summary with no edit revision
    pub fn new(id: ContentId, content_type: ContentTypeId, current_revision: Revision) -> Self {
        Self {
            id,
            content_type,
            current_revision,
            edit_revision: None,
        }
    }

    /// Set the edit revision
    pub fn with_edit_revision(mut self, revision: Revision) -> Self {
        self.edit_revision = Some(revision);
        self
    }

    /// Locator of the editable revision, else the current revision
    pub fn head_locator(&self) -> Locator {
        Locator::new(self.id, self.edit_revision.unwrap_or(self.current_revision))
    }

    /// Whether the revision is the current or the edit revision of this item
    pub fn is_head_revision(&self, revision: Revision) -> bool {
        revision == self.current_revision || self.edit_revision == Some(revision)
    }
}
