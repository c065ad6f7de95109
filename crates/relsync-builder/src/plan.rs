//! Reconciliation plans and reports

use crate::set_algebra::complement;
use relsync_domain::{ContentId, Side};
use std::collections::BTreeSet;

/// Diff between the current and desired related ids of one item/slot pair
///
/// `to_add` and `to_remove` never share an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Desired ids with no current relationship
    pub to_add: BTreeSet<ContentId>,

    /// Current ids that are no longer desired
    pub to_remove: BTreeSet<ContentId>,

    /// Ids present in both; their relationships are left untouched
    pub unchanged: BTreeSet<ContentId>,
}

impl ReconcilePlan {
    /// Compute the plan turning `current` into `desired`
    ///
    /// # Examples
    ///
    /// ```
    /// use relsync_builder::ReconcilePlan;
    /// use relsync_domain::ContentId;
    /// use std::collections::BTreeSet;
    ///
    /// let ids = |v: &[u32]| v.iter().copied().map(ContentId::new).collect::<BTreeSet<_>>();
    /// let plan = ReconcilePlan::compute(&ids(&[101, 102, 103]), &ids(&[102, 104]));
    ///
    /// assert_eq!(plan.to_add, ids(&[104]));
    /// assert_eq!(plan.to_remove, ids(&[101, 103]));
    /// assert_eq!(plan.unchanged, ids(&[102]));
    /// ```
    pub fn compute(current: &BTreeSet<ContentId>, desired: &BTreeSet<ContentId>) -> Self {
        Self {
            to_add: complement(desired, current),
            to_remove: complement(current, desired),
            unchanged: current.intersection(desired).copied().collect(),
        }
    }

    /// Whether applying the plan would change nothing
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Outcome of a reconcile call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Source item
    pub item: ContentId,

    /// Side of the relationships held by the source item
    pub side: Side,

    /// Slot that was reconciled
    pub slot: String,

    /// The diff that was computed
    pub plan: ReconcilePlan,

    /// Relationships handed to the store's save call
    pub saved: usize,

    /// Relationships handed to the store's delete call
    pub deleted: usize,

    /// Whether writes were skipped
    pub dry_run: bool,
}

impl ReconcileReport {
    /// Generate a one-line summary of the report
    pub fn summary(&self) -> String {
        let prefix = if self.dry_run { "DRY RUN: " } else { "" };
        format!(
            "{}item {} ({}) slot '{}': +{} -{} ={} (saved {}, deleted {})",
            prefix,
            self.item,
            self.side,
            self.slot,
            self.plan.to_add.len(),
            self.plan.to_remove.len(),
            self.plan.unchanged.len(),
            self.saved,
            self.deleted,
        )
    }
}
