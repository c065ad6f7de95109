//! Relationship module - directed owner → dependent links within a slot

use crate::{ContentId, Locator, SlotId, TemplateId};
use std::collections::HashSet;
use std::fmt;

/// One end of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The item that holds the slot
    Owner,

    /// The item placed into the owner's slot
    Dependent,
}

impl Side {
    /// The other end of the relationship
    pub fn opposite(&self) -> Self {
        match self {
            Side::Owner => Side::Dependent,
            Side::Dependent => Side::Owner,
        }
    }

    /// Get the side name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Owner => "owner",
            Side::Dependent => "dependent",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-assigned identifier of a persisted relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipId(u64);

impl RelationshipId {
    /// Create a RelationshipId from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Revision-independent identity of a relationship
///
/// Two relationships with the same key link the same items in the same slot,
/// even if they point at different revisions of those items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipKey {
    /// Owner content item
    pub owner: ContentId,

    /// Dependent content item
    pub dependent: ContentId,

    /// Slot of the relationship
    pub slot: SlotId,
}

/// A directed link between two item revisions, classified by slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Identifier assigned by the store, `None` until saved
    pub id: Option<RelationshipId>,

    /// Owner revision
    pub owner: Locator,

    /// Dependent revision
    pub dependent: Locator,

    /// Slot the dependent occupies
    pub slot: SlotId,

    /// Template used to render the dependent
    pub template: TemplateId,
}

impl Relationship {
    /// Create a new, unsaved relationship
    pub fn new(owner: Locator, dependent: Locator, slot: SlotId, template: TemplateId) -> Self {
        Self {
            id: None,
            owner,
            dependent,
            slot,
            template,
        }
    }

    /// Create a relationship where `self_locator` sits on `side` and `peer` on the other end
    pub fn between(
        side: Side,
        self_locator: Locator,
        peer: Locator,
        slot: SlotId,
        template: TemplateId,
    ) -> Self {
        match side {
            Side::Owner => Self::new(self_locator, peer, slot, template),
            Side::Dependent => Self::new(peer, self_locator, slot, template),
        }
    }

    /// Set the store-assigned identifier
    pub fn with_id(mut self, id: RelationshipId) -> Self {
        self.id = Some(id);
        self
    }

    /// Locator on the requested side
    pub fn locator(&self, side: Side) -> Locator {
        match side {
            Side::Owner => self.owner,
            Side::Dependent => self.dependent,
        }
    }

    /// Content id on the requested side
    pub fn content_id(&self, side: Side) -> ContentId {
        self.locator(side).id
    }

    /// Revision-independent identity
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey {
            owner: self.owner.id,
            dependent: self.dependent.id,
            slot: self.slot,
        }
    }

    /// Owner revision, dependent revision and slot
    fn link(&self) -> Link {
        (self.owner, self.dependent, self.slot)
    }
}

/// An insertion-ordered collection of relationships without exact duplicates
///
/// Relationships that link the same revisions in the same slot are stored
/// once. Relationships that differ only by revision are kept apart, since the
/// store returns one row per revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipSet {
    relationships: Vec<Relationship>,
    links: HashSet<Link>,
}

type Link = (Locator, Locator, SlotId);

impl RelationshipSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relationship, returning false if the same link is already present
    pub fn insert(&mut self, relationship: Relationship) -> bool {
        if !self.links.insert(relationship.link()) {
            return false;
        }
        self.relationships.push(relationship);
        true
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.relationships.iter()
    }

    /// Keep only the relationships matching the predicate
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Relationship) -> bool,
    {
        let links = &mut self.links;
        self.relationships.retain(|relationship| {
            let keep = f(relationship);
            if !keep {
                links.remove(&relationship.link());
            }
            keep
        });
    }
}

impl FromIterator<Relationship> for RelationshipSet {
    fn from_iter<T: IntoIterator<Item = Relationship>>(iter: T) -> Self {
        let mut set = RelationshipSet::new();
        for relationship in iter {
            set.insert(relationship);
        }
        set
    }
}

impl IntoIterator for RelationshipSet {
    type Item = Relationship;
    type IntoIter = std::vec::IntoIter<Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.relationships.into_iter()
    }
}

impl<'a> IntoIterator for &'a RelationshipSet {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.relationships.iter()
    }
}

/// Criteria for querying relationships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipFilter {
    /// Only relationships owned by this item (any revision)
    pub owner: Option<ContentId>,

    /// Only relationships whose dependent is this item (any revision)
    pub dependent: Option<ContentId>,

    /// Slot to query
    pub slot: SlotId,

    /// Only relationships whose owner locator is the current or edit revision
    pub head_owner_revision: bool,

    /// Only relationships whose dependent locator is the current or edit revision
    pub head_dependent_revision: bool,
}

impl RelationshipFilter {
    /// Filter for every relationship in a slot
    pub fn in_slot(slot: SlotId) -> Self {
        Self {
            owner: None,
            dependent: None,
            slot,
            head_owner_revision: false,
            head_dependent_revision: false,
        }
    }

    /// Restrict the given side to one content item
    pub fn with_item(mut self, side: Side, id: ContentId) -> Self {
        match side {
            Side::Owner => self.owner = Some(id),
            Side::Dependent => self.dependent = Some(id),
        }
        self
    }

    /// Restrict the given side to head revisions; may be applied to both sides
    pub fn head_revision_of(mut self, side: Side) -> Self {
        match side {
            Side::Owner => self.head_owner_revision = true,
            Side::Dependent => self.head_dependent_revision = true,
        }
        self
    }

    /// Whether the given side is restricted to head revisions
    pub fn limits_head_revision(&self, side: Side) -> bool {
        match side {
            Side::Owner => self.head_owner_revision,
            Side::Dependent => self.head_dependent_revision,
        }
    }

    /// Sides restricted to head revisions, owner first
    pub fn head_revision_sides(&self) -> impl Iterator<Item = Side> + '_ {
        [Side::Owner, Side::Dependent]
            .into_iter()
            .filter(|side| self.limits_head_revision(*side))
    }

    /// Whether the relationship satisfies the item and slot criteria
    ///
    /// Revision restrictions need item summaries and are left to the store.
    pub fn matches_items(&self, relationship: &Relationship) -> bool {
        relationship.slot == self.slot
            && self.owner.is_none_or(|id| relationship.owner.id == id)
            && self.dependent.is_none_or(|id| relationship.dependent.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Revision;

    fn loc(id: u32, rev: u32) -> Locator {
        Locator::new(ContentId::new(id), Revision::new(rev))
    }

    fn rel(owner: Locator, dependent: Locator) -> Relationship {
        Relationship::new(owner, dependent, SlotId::new(1), TemplateId::new(9))
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Owner.opposite(), Side::Dependent);
        assert_eq!(Side::Dependent.opposite(), Side::Owner);
    }

    #[test]
    fn test_between_places_self_on_side() {
        let r = Relationship::between(Side::Dependent, loc(1, 1), loc(2, 1), SlotId::new(1), TemplateId::new(9));
        assert_eq!(r.owner, loc(2, 1));
        assert_eq!(r.dependent, loc(1, 1));
        assert_eq!(r.content_id(Side::Dependent), ContentId::new(1));
    }

    #[test]
    fn test_set_rejects_exact_duplicates() {
        let mut set = RelationshipSet::new();
        assert!(set.insert(rel(loc(1, 1), loc(2, 1))));
        assert!(!set.insert(rel(loc(1, 1), loc(2, 1)).with_id(RelationshipId::new(4))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_accepts_link_again_after_retain_drops_it() {
        let mut set: RelationshipSet = vec![rel(loc(1, 1), loc(2, 1)), rel(loc(1, 1), loc(3, 1))]
            .into_iter()
            .collect();

        set.retain(|r| r.dependent.id != ContentId::new(2));
        assert_eq!(set.len(), 1);
        assert!(set.insert(rel(loc(1, 1), loc(2, 1))));
        assert!(!set.insert(rel(loc(1, 1), loc(3, 1))));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_keeps_revision_variants() {
        let set: RelationshipSet = vec![rel(loc(1, 1), loc(2, 1)), rel(loc(1, 1), loc(2, 2))]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        let keys: Vec<_> = set.iter().map(Relationship::key).collect();
        assert_eq!(keys[0], keys[1]);
    }

    #[test]
    fn test_filter_head_revision_sides_accumulate() {
        let filter = RelationshipFilter::in_slot(SlotId::new(1));
        assert_eq!(filter.head_revision_sides().count(), 0);

        let filter = filter.head_revision_of(Side::Dependent).head_revision_of(Side::Owner);
        assert!(filter.limits_head_revision(Side::Owner));
        assert!(filter.limits_head_revision(Side::Dependent));
        assert_eq!(
            filter.head_revision_sides().collect::<Vec<_>>(),
            vec![Side::Owner, Side::Dependent]
        );
    }

    #[test]
    fn test_filter_matches_items() {
        let filter = RelationshipFilter::in_slot(SlotId::new(1)).with_item(Side::Owner, ContentId::new(1));

        assert!(filter.matches_items(&rel(loc(1, 3), loc(2, 1))));
        assert!(!filter.matches_items(&rel(loc(7, 1), loc(2, 1))));

        let other_slot = Relationship::new(loc(1, 1), loc(2, 1), SlotId::new(2), TemplateId::new(9));
        assert!(!filter.matches_items(&other_slot));
    }
}
