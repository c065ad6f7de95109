//! Generic relationship builder: extraction and reconciliation for one role

use crate::plan::{ReconcilePlan, ReconcileReport};
use crate::role::{DependentRole, OwnerRole, Role};
use crate::set_algebra::{extract_side_ids, load_summary, resolve_locators};
use crate::{BuilderConfig, BuilderError, SlotLocks};
use relsync_domain::{
    Catalog, ContentId, ItemSummary, ItemSummaryResolver, Relationship, RelationshipFilter,
    RelationshipSet, RelationshipStore, Side, Slot, Template,
};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError};
use tracing::{debug, debug_span, info, warn, Dispatch};

/// Builder where the source item owns the relationships
pub type OwnerRelationshipBuilder<S, C, I> = RelationshipBuilder<OwnerRole, S, C, I>;

/// Builder where the source item is the dependent of the relationships
pub type DependentRelationshipBuilder<S, C, I> = RelationshipBuilder<DependentRole, S, C, I>;

/// Reconciles the relationships of one item in a slot against a desired set
///
/// The role `R` decides which side of the relationship the source item plays
/// and how templates are resolved. `S`, `C` and `I` are the relationship
/// store, the catalog and the item summary resolver; a single adapter can be
/// passed by reference for all three.
///
/// The builder keeps no state between calls apart from its collaborators,
/// its configuration and the optional logging dispatch and lock table.
pub struct RelationshipBuilder<R, S, C, I> {
    store: S,
    catalog: C,
    items: I,
    config: BuilderConfig,
    dispatch: Option<Dispatch>,
    locks: Option<Arc<SlotLocks>>,
    _role: PhantomData<fn() -> R>,
}

impl<R, S, C, I> RelationshipBuilder<R, S, C, I> {
    /// Create a builder with default configuration
    pub fn new(store: S, catalog: C, items: I) -> Self {
        Self {
            store,
            catalog,
            items,
            config: BuilderConfig::default(),
            dispatch: None,
            locks: None,
            _role: PhantomData,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Emit this builder's logs through `dispatch` instead of the global default
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Serialize reconcile calls with every builder sharing `locks`
    pub fn with_locks(mut self, locks: Arc<SlotLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Get the relationship store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl<R, S, C, I> RelationshipBuilder<R, S, C, I>
where
    R: Role,
    S: RelationshipStore,
    C: Catalog,
    I: ItemSummaryResolver,
    S::Error: Display,
    C::Error: Display,
    I::Error: Display,
{
    /// Ids of the items related to `item` in the named slot
    ///
    /// Returns the peer side of every relationship where `item` plays this
    /// builder's role, restricted to head revisions of the peers, in
    /// first-seen order without duplicates. An empty vector means no
    /// relationships matched.
    pub fn extract_related_ids(
        &self,
        item: ContentId,
        slot_name: &str,
    ) -> Result<Vec<ContentId>, BuilderError> {
        ensure_slot_name(slot_name)?;

        self.in_scope(|| -> Result<Vec<ContentId>, BuilderError> {
            let span = debug_span!("extract_related_ids", role = R::NAME, item = %item, slot = slot_name);
            let _enter = span.enter();

            let slot = self.find_slot(slot_name)?;
            let relationships = self.current_relationships(item, &slot)?;
            let ids = extract_side_ids(&relationships, R::peer());
            debug!("Found {} related ids", ids.len());
            Ok(ids)
        })
    }

    /// Compute the diff `reconcile` would apply, without writing anything
    pub fn plan(
        &self,
        item: ContentId,
        desired: &BTreeSet<ContentId>,
        slot_name: &str,
    ) -> Result<ReconcilePlan, BuilderError> {
        ensure_slot_name(slot_name)?;

        self.in_scope(|| -> Result<ReconcilePlan, BuilderError> {
            let slot = self.find_slot(slot_name)?;
            let current = self.current_relationships(item, &slot)?;
            Ok(plan_against(&current, desired, R::peer()))
        })
    }

    /// Converge the relationships of `item` in the named slot to `desired`
    ///
    /// Relationships are created for desired ids without one, using the named
    /// template, and deleted for current ids not in `desired`. Relationships
    /// to ids in both sets are left untouched. At most one save call and one
    /// delete call are issued; empty batches are skipped.
    ///
    /// # Errors
    ///
    /// - [`BuilderError::InvalidArgument`] if `slot_name` is blank, before any
    ///   collaborator is called
    /// - [`BuilderError::SlotNotFound`] / [`BuilderError::TemplateNotFound`]
    ///   if a name does not resolve
    /// - [`BuilderError::ItemNotFound`] if `item` or any id to add has no
    ///   summary; nothing is written in that case
    /// - [`BuilderError::Store`] if the store fails. A delete failure after a
    ///   successful save leaves the additions in place.
    pub fn reconcile(
        &self,
        item: ContentId,
        desired: &BTreeSet<ContentId>,
        slot_name: &str,
        template_name: &str,
    ) -> Result<ReconcileReport, BuilderError> {
        ensure_slot_name(slot_name)?;

        self.in_scope(|| -> Result<ReconcileReport, BuilderError> {
            let span = debug_span!("reconcile", role = R::NAME, item = %item, slot = slot_name);
            let _enter = span.enter();

            let Some(locks) = &self.locks else {
                return self.apply(item, desired, slot_name, template_name);
            };

            let lock = locks.entry(R::SIDE, item, slot_name);
            let result = {
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                self.apply(item, desired, slot_name, template_name)
            };
            drop(lock);
            locks.release(R::SIDE, item, slot_name);
            result
        })
    }

    /// Query, diff and write; callers hold the slot lock when one is attached
    fn apply(
        &self,
        item: ContentId,
        desired: &BTreeSet<ContentId>,
        slot_name: &str,
        template_name: &str,
    ) -> Result<ReconcileReport, BuilderError> {
        debug!("desired ids: {:?}", desired);

        let summary = load_summary(&self.items, item)?;
        let self_locator = summary.head_locator();
        let template = self.find_template(template_name, &summary)?;
        let slot = self.find_slot(slot_name)?;

        let mut current = self.current_relationships(item, &slot)?;
        let plan = if current.is_empty() {
            debug!("no current ids, add ids = desired ids, no remove ids");
            ReconcilePlan::compute(&BTreeSet::new(), desired)
        } else {
            let plan = plan_against(&current, desired, R::peer());
            if self.config.validate_slot {
                validate_slot(&slot);
            }
            plan
        };
        debug!("add ids: {:?}", plan.to_add);
        debug!("remove ids: {:?}", plan.to_remove);

        let additions: RelationshipSet = resolve_locators(&self.items, plan.to_add.iter().copied())?
            .into_iter()
            .map(|peer| Relationship::between(R::SIDE, self_locator, peer, slot.id, template.id))
            .collect();

        let peer = R::peer();
        current.retain(|relationship| plan.to_remove.contains(&relationship.content_id(peer)));
        let removals = current;

        let report = ReconcileReport {
            item,
            side: R::SIDE,
            slot: slot.name.clone(),
            saved: additions.len(),
            deleted: removals.len(),
            dry_run: self.config.dry_run,
            plan,
        };

        if self.config.dry_run {
            info!("{}", report.summary());
            return Ok(report);
        }

        if !additions.is_empty() {
            self.store
                .save(&additions)
                .map_err(|e| BuilderError::Store(format!("Failed to save relationships: {}", e)))?;
        }
        if !removals.is_empty() {
            self.store
                .delete(&removals)
                .map_err(|e| BuilderError::Store(format!("Failed to delete relationships: {}", e)))?;
        }

        info!("{}", report.summary());
        Ok(report)
    }

    fn find_slot(&self, slot_name: &str) -> Result<Slot, BuilderError> {
        self.catalog
            .find_slot_by_name(slot_name)
            .map_err(|e| BuilderError::Catalog(format!("Failed to look up slot '{}': {}", slot_name, e)))?
            .ok_or_else(|| BuilderError::SlotNotFound(slot_name.to_string()))
    }

    fn find_template(&self, template_name: &str, item: &ItemSummary) -> Result<Template, BuilderError> {
        R::resolve_template(&self.catalog, template_name, item)
            .map_err(|e| {
                BuilderError::Catalog(format!("Failed to look up template '{}': {}", template_name, e))
            })?
            .ok_or_else(|| BuilderError::TemplateNotFound(template_name.to_string()))
    }

    /// Relationships where `item` holds this role
    ///
    /// Limited to head revisions of the peers and of the owner, so links from
    /// superseded owner revisions are neither reported nor deleted.
    fn current_relationships(&self, item: ContentId, slot: &Slot) -> Result<RelationshipSet, BuilderError> {
        let filter = RelationshipFilter::in_slot(slot.id)
            .with_item(R::SIDE, item)
            .head_revision_of(R::peer())
            .head_revision_of(Side::Owner);

        self.store
            .query(&filter)
            .map_err(|e| BuilderError::Store(format!("Failed to query relationships: {}", e)))
    }
}

fn ensure_slot_name(slot_name: &str) -> Result<(), BuilderError> {
    if slot_name.trim().is_empty() {
        return Err(BuilderError::InvalidArgument(
            "slot name may not be blank".to_string(),
        ));
    }
    Ok(())
}

fn plan_against(
    current: &RelationshipSet,
    desired: &BTreeSet<ContentId>,
    peer: Side,
) -> ReconcilePlan {
    let current_ids: BTreeSet<ContentId> = extract_side_ids(current, peer).into_iter().collect();
    debug!("current ids: {:?}", current_ids);
    ReconcilePlan::compute(&current_ids, desired)
}

/// Advisory check that the slot has a relationship name; only logs
fn validate_slot(slot: &Slot) -> bool {
    if slot.is_configured() {
        return true;
    }
    warn!(
        "Slot '{}' does not have a relationship name set. \
         Check the slot definition so that relationships created in it have a kind.",
        slot.name
    );
    false
}
