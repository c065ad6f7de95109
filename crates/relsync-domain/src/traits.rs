//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the reconciliation logic and
//! the host platform. Implementations live in other crates (relsync-store).
//!
//! All methods take `&self`; adapters that mutate shared state handle that
//! internally. Each trait is also implemented for `&T`, so a single adapter
//! value can be lent to a builder as store, catalog and summary resolver at
//! once.

use crate::{ContentId, ContentTypeId, ItemSummary, RelationshipFilter, RelationshipSet, Slot, Template};

/// Trait for querying and persisting relationships
///
/// Implemented by the infrastructure layer (relsync-store)
pub trait RelationshipStore {
    /// Error type for store operations
    type Error;

    /// Get every relationship matching the filter
    fn query(&self, filter: &RelationshipFilter) -> Result<RelationshipSet, Self::Error>;

    /// Persist new relationships; an empty set is a no-op
    fn save(&self, relationships: &RelationshipSet) -> Result<(), Self::Error>;

    /// Remove relationships; an empty set is a no-op
    fn delete(&self, relationships: &RelationshipSet) -> Result<(), Self::Error>;
}

/// Trait for resolving slot and template names to definitions
pub trait Catalog {
    /// Error type for catalog operations
    type Error;

    /// Find a slot by name
    fn find_slot_by_name(&self, name: &str) -> Result<Option<Slot>, Self::Error>;

    /// Find a template by name alone
    fn find_template_by_name(&self, name: &str) -> Result<Option<Template>, Self::Error>;

    /// Find a template by name, scoped to a content type
    fn find_template_by_name_and_type(
        &self,
        name: &str,
        content_type: ContentTypeId,
    ) -> Result<Option<Template>, Self::Error>;
}

/// Trait for loading item summaries (head revision and content type)
pub trait ItemSummaryResolver {
    /// Error type for summary lookups
    type Error;

    /// Load the summary of an item, `None` if the item does not exist
    fn load_summary(&self, id: ContentId) -> Result<Option<ItemSummary>, Self::Error>;
}

impl<T: RelationshipStore + ?Sized> RelationshipStore for &T {
    type Error = T::Error;

    fn query(&self, filter: &RelationshipFilter) -> Result<RelationshipSet, Self::Error> {
        (**self).query(filter)
    }

    fn save(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        (**self).save(relationships)
    }

    fn delete(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        (**self).delete(relationships)
    }
}

impl<T: Catalog + ?Sized> Catalog for &T {
    type Error = T::Error;

    fn find_slot_by_name(&self, name: &str) -> Result<Option<Slot>, Self::Error> {
        (**self).find_slot_by_name(name)
    }

    fn find_template_by_name(&self, name: &str) -> Result<Option<Template>, Self::Error> {
        (**self).find_template_by_name(name)
    }

    fn find_template_by_name_and_type(
        &self,
        name: &str,
        content_type: ContentTypeId,
    ) -> Result<Option<Template>, Self::Error> {
        (**self).find_template_by_name_and_type(name, content_type)
    }
}

impl<T: ItemSummaryResolver + ?Sized> ItemSummaryResolver for &T {
    type Error = T::Error;

    fn load_summary(&self, id: ContentId) -> Result<Option<ItemSummary>, Self::Error> {
        (**self).load_summary(id)
    }
}
