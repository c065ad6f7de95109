//! In-memory platform shared by the builder integration tests

#![allow(dead_code)]

use relsync_domain::traits::{Catalog, ItemSummaryResolver, RelationshipStore};
use relsync_domain::{
    ContentId, ContentTypeId, ItemSummary, Locator, Relationship, RelationshipFilter,
    RelationshipId, RelationshipSet, Revision, Side, Slot, SlotId, Template, TemplateId,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

pub const RELATED_SLOT: &str = "related";
pub const BARE_SLOT: &str = "bare";
pub const SNIPPET: &str = "snippet";
pub const ARTICLE_TYPE: ContentTypeId = ContentTypeId::new(1);
pub const PAGE_TYPE: ContentTypeId = ContentTypeId::new(2);

/// Store, catalog and item summaries backed by plain collections
///
/// Every store call is recorded so tests can assert on batch counts.
pub struct FakePlatform {
    items: RefCell<HashMap<ContentId, ItemSummary>>,
    slots: Vec<Slot>,
    templates: Vec<Template>,
    rows: RefCell<Vec<Relationship>>,
    next_id: Cell<u64>,
    pub queries: Cell<usize>,
    pub catalog_calls: Cell<usize>,
    pub saves: RefCell<Vec<RelationshipSet>>,
    pub deletes: RefCell<Vec<RelationshipSet>>,
    pub fail_delete: Cell<bool>,
}

impl FakePlatform {
    pub fn new() -> Self {
        let platform = Self {
            items: RefCell::new(HashMap::new()),
            slots: vec![
                Slot::new(SlotId::new(1), RELATED_SLOT, Some("ActiveAssembly".to_string())),
                Slot::new(SlotId::new(2), BARE_SLOT, None),
            ],
            templates: vec![
                Template::new(TemplateId::new(10), SNIPPET, Some(ARTICLE_TYPE)),
                Template::new(TemplateId::new(20), SNIPPET, Some(PAGE_TYPE)),
                Template::new(TemplateId::new(30), "untyped", None),
            ],
            rows: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            queries: Cell::new(0),
            catalog_calls: Cell::new(0),
            saves: RefCell::new(Vec::new()),
            deletes: RefCell::new(Vec::new()),
            fail_delete: Cell::new(false),
        };

        for id in (1..=10).chain(100..=110).chain(300..=310).chain(700..=710) {
            platform.put_item(ItemSummary::new(ContentId::new(id), ARTICLE_TYPE, Revision::new(1)));
        }
        platform
    }

    pub fn put_item(&self, summary: ItemSummary) {
        self.items.borrow_mut().insert(summary.id, summary);
    }

    pub fn slot(&self, name: &str) -> SlotId {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.id)
            .expect("slot exists")
    }

    /// Insert a relationship row directly, bypassing the save counter
    pub fn seed(&self, owner: Locator, dependent: Locator, slot: &str) {
        let relationship = Relationship::new(owner, dependent, self.slot(slot), TemplateId::new(30));
        self.insert_row(relationship);
    }

    /// Seed relationships where `item` holds `side` and each id sits on the other end
    pub fn seed_related(&self, side: Side, item: u32, related: &[u32], slot: &str) {
        for &id in related {
            let this = loc(item, 1);
            let peer = loc(id, 1);
            match side {
                Side::Owner => self.seed(this, peer, slot),
                Side::Dependent => self.seed(peer, this, slot),
            }
        }
    }

    pub fn rows(&self) -> Vec<Relationship> {
        self.rows.borrow().clone()
    }

    /// Ids on `peer` of the rows where `item` is on the other side, in `slot`
    pub fn related_ids(&self, side: Side, item: u32, slot: &str) -> BTreeSet<ContentId> {
        let slot = self.slot(slot);
        self.rows
            .borrow()
            .iter()
            .filter(|r| r.slot == slot && r.content_id(side) == ContentId::new(item))
            .map(|r| r.content_id(side.opposite()))
            .collect()
    }

    pub fn save_calls(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.borrow().len()
    }

    pub fn reset_calls(&self) {
        self.queries.set(0);
        self.catalog_calls.set(0);
        self.saves.borrow_mut().clear();
        self.deletes.borrow_mut().clear();
    }

    fn insert_row(&self, relationship: Relationship) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.rows
            .borrow_mut()
            .push(relationship.with_id(RelationshipId::new(id)));
    }

    fn is_head(&self, locator: Locator) -> bool {
        self.items
            .borrow()
            .get(&locator.id)
            .is_some_and(|summary| summary.is_head_revision(locator.revision))
    }
}

impl RelationshipStore for FakePlatform {
    type Error = String;

    fn query(&self, filter: &RelationshipFilter) -> Result<RelationshipSet, Self::Error> {
        self.queries.set(self.queries.get() + 1);
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|r| filter.matches_items(r))
            .filter(|r| filter.head_revision_sides().all(|side| self.is_head(r.locator(side))))
            .cloned()
            .collect())
    }

    fn save(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        self.saves.borrow_mut().push(relationships.clone());
        for relationship in relationships {
            self.insert_row(relationship.clone());
        }
        Ok(())
    }

    fn delete(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        if self.fail_delete.get() {
            return Err("delete rejected".to_string());
        }
        self.deletes.borrow_mut().push(relationships.clone());
        self.rows.borrow_mut().retain(|row| {
            !relationships.iter().any(|r| {
                r.owner == row.owner && r.dependent == row.dependent && r.slot == row.slot
            })
        });
        Ok(())
    }
}

impl Catalog for FakePlatform {
    type Error = String;

    fn find_slot_by_name(&self, name: &str) -> Result<Option<Slot>, Self::Error> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        Ok(self.slots.iter().find(|slot| slot.name == name).cloned())
    }

    fn find_template_by_name(&self, name: &str) -> Result<Option<Template>, Self::Error> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        Ok(self.templates.iter().find(|t| t.name == name).cloned())
    }

    fn find_template_by_name_and_type(
        &self,
        name: &str,
        content_type: ContentTypeId,
    ) -> Result<Option<Template>, Self::Error> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        Ok(self
            .templates
            .iter()
            .find(|t| t.name == name && t.content_type == Some(content_type))
            .cloned())
    }
}

impl ItemSummaryResolver for FakePlatform {
    type Error = String;

    fn load_summary(&self, id: ContentId) -> Result<Option<ItemSummary>, Self::Error> {
        Ok(self.items.borrow().get(&id).cloned())
    }
}

pub fn loc(id: u32, revision: u32) -> Locator {
    Locator::new(ContentId::new(id), Revision::new(revision))
}

pub fn ids(values: &[u32]) -> BTreeSet<ContentId> {
    values.iter().copied().map(ContentId::new).collect()
}
