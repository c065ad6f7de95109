//! Relsync Domain Layer
//!
//! This crate contains the domain model for slot relationships and the trait
//! interfaces for the collaborators every other layer talks to. It has ZERO
//! external dependencies and defines the values that flow between the
//! relationship builders, the store adapters and the exit adapters.
//!
//! ## Key Concepts
//!
//! - **Item**: a content item, addressed by a [`ContentId`] and, for a specific
//!   revision, by a [`Locator`]
//! - **Head locator**: the editable revision of an item if it has one,
//!   otherwise its current revision
//! - **Relationship**: a directed owner → dependent link tagged with a slot
//!   and a template
//! - **Slot**: named bucket classifying what kind of related content a
//!   relationship represents
//! - **Template**: descriptor assigned to every relationship a builder creates
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Plain values and set containers only
//! - Store, catalog and summary implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod item;
pub mod relationship;
pub mod traits;

// Re-exports for convenience
pub use catalog::{Slot, SlotId, Template, TemplateId};
pub use item::{ContentId, ContentTypeId, ItemSummary, Locator, ParseContentIdError, Revision};
pub use relationship::{
    Relationship, RelationshipFilter, RelationshipId, RelationshipKey, RelationshipSet, Side,
};
pub use traits::{Catalog, ItemSummaryResolver, RelationshipStore};
