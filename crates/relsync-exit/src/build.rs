//! Build exit - Reconcile an item's relationships to a delimited id list

use crate::context::{content_id, RequestContext};
use crate::error::translate;
use crate::params::{parse_id_list, ExitParams};
use crate::ExitError;
use relsync_builder::{DependentRole, OwnerRole, ReconcileReport, RelationshipBuilder, Role};
use relsync_domain::{Catalog, ContentId, ItemSummaryResolver, RelationshipStore};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::{debug, warn};

/// Makes the request's item the dependent of every listed owner
pub type BuildOwnerRelationshipsExit<S, C, I> = BuildRelationshipsExit<DependentRole, S, C, I>;

/// Makes the request's item the owner of every listed dependent
pub type BuildDependentRelationshipsExit<S, C, I> = BuildRelationshipsExit<OwnerRole, S, C, I>;

/// Result of a build invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    /// Content id of the request's item
    pub item: u32,
    /// Side of the relationships held by the item (owner or dependent)
    pub role: String,
    /// Slot that was reconciled
    pub slot: String,
    /// Ids that gained a relationship
    pub added: Vec<u32>,
    /// Ids whose relationship was removed
    pub removed: Vec<u32>,
    /// Ids whose relationship was kept as is
    pub unchanged: Vec<u32>,
    /// Relationships saved
    pub saved: usize,
    /// Relationships deleted
    pub deleted: usize,
    /// Whether writes were skipped
    pub dry_run: bool,
    /// List entries that were not ids
    pub invalid_entries: Vec<String>,
}

impl BuildOutcome {
    fn from_report(report: &ReconcileReport, invalid_entries: Vec<String>) -> Self {
        let values =
            |ids: &BTreeSet<ContentId>| -> Vec<u32> { ids.iter().map(|id| id.value()).collect() };
        Self {
            item: report.item.value(),
            role: report.side.to_string(),
            slot: report.slot.clone(),
            added: values(&report.plan.to_add),
            removed: values(&report.plan.to_remove),
            unchanged: values(&report.plan.unchanged),
            saved: report.saved,
            deleted: report.deleted,
            dry_run: report.dry_run,
            invalid_entries,
        }
    }

    /// Human readable one-line summary
    pub fn message(&self) -> String {
        let prefix = if self.dry_run { "Would update" } else { "Updated" };
        let mut message = format!(
            "{} slot '{}' of item {} ({}): {} added, {} removed, {} unchanged",
            prefix,
            self.slot,
            self.item,
            self.role,
            self.added.len(),
            self.removed.len(),
            self.unchanged.len(),
        );
        if !self.invalid_entries.is_empty() {
            message.push_str(&format!("; skipped {} invalid entries", self.invalid_entries.len()));
        }
        message
    }
}

/// Exit reconciling the request's item to the ids listed in a request parameter
pub struct BuildRelationshipsExit<R, S, C, I> {
    builder: RelationshipBuilder<R, S, C, I>,
}

impl<R, S, C, I> BuildRelationshipsExit<R, S, C, I> {
    /// Wrap a builder
    pub fn new(builder: RelationshipBuilder<R, S, C, I>) -> Self {
        Self { builder }
    }

    /// Get the wrapped builder
    pub fn builder(&self) -> &RelationshipBuilder<R, S, C, I> {
        &self.builder
    }
}

impl<R, S, C, I> BuildRelationshipsExit<R, S, C, I>
where
    R: Role,
    S: RelationshipStore,
    C: Catalog,
    I: ItemSummaryResolver,
    S::Error: Display,
    C::Error: Display,
    I::Error: Display,
{
    /// Handle a build invocation
    ///
    /// Returns `None` without touching the store when the request lacks the
    /// related-ids parameter. A present but empty list removes every
    /// relationship of the item in the slot. Entries that are not ids are
    /// skipped and listed in the outcome.
    ///
    /// # Arguments
    ///
    /// * `params` - slot name, template name and (optionally) the name of
    ///   the request parameter holding the ids
    /// * `request` - must carry the item's `sys_contentid`
    pub fn process<Q>(
        &self,
        params: &[Option<&str>],
        request: &Q,
    ) -> Result<Option<BuildOutcome>, ExitError>
    where
        Q: RequestContext + ?Sized,
    {
        let params = ExitParams::parse(params)?;
        let template_name = params.template_name()?;
        let item = content_id(request)?;

        let Some(raw) = request.parameter(&params.related_ids_param) else {
            debug!("Request has no '{}' parameter, nothing to build", params.related_ids_param);
            return Ok(None);
        };

        let parsed = parse_id_list(&raw);
        if !parsed.invalid.is_empty() {
            warn!(
                "Ignoring {} invalid entries in '{}'",
                parsed.invalid.len(),
                params.related_ids_param
            );
        }

        let report = self
            .builder
            .reconcile(item, &parsed.ids, &params.slot_name, template_name)
            .map_err(translate)?;

        Ok(Some(BuildOutcome::from_report(&report, parsed.invalid)))
    }
}
