//! Set algebra over content ids and relationship sets

use crate::BuilderError;
use relsync_domain::{ContentId, ItemSummary, ItemSummaryResolver, Locator, RelationshipSet, Side};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use tracing::debug;

/// Elements of `retain` that are not in `suppress`
///
/// # Examples
///
/// ```
/// use relsync_builder::set_algebra::complement;
/// use relsync_domain::ContentId;
/// use std::collections::BTreeSet;
///
/// let ids = |v: &[u32]| v.iter().copied().map(ContentId::new).collect::<BTreeSet<_>>();
/// assert_eq!(complement(&ids(&[1, 2, 3]), &ids(&[2, 4])), ids(&[1, 3]));
/// ```
pub fn complement(retain: &BTreeSet<ContentId>, suppress: &BTreeSet<ContentId>) -> BTreeSet<ContentId> {
    retain
        .iter()
        .filter(|id| !suppress.contains(id))
        .copied()
        .collect()
}

/// Content ids on `side` of each relationship, in first-seen order
///
/// The store returns one relationship per revision, so the same item can
/// show up more than once; repeats are skipped.
pub fn extract_side_ids(relationships: &RelationshipSet, side: Side) -> Vec<ContentId> {
    let mut seen = HashSet::with_capacity(relationships.len());
    let mut ids = Vec::with_capacity(relationships.len());

    for relationship in relationships {
        let id = relationship.content_id(side);
        if seen.insert(id) {
            ids.push(id);
        } else {
            debug!(
                "Duplicate {} id {} in relationship set due to revisions, skipping",
                side, id
            );
        }
    }

    ids
}

/// Load the summary of an item, failing if it does not exist
pub fn load_summary<I>(resolver: &I, id: ContentId) -> Result<ItemSummary, BuilderError>
where
    I: ItemSummaryResolver,
    I::Error: Display,
{
    resolver
        .load_summary(id)
        .map_err(|e| BuilderError::Summary(format!("Failed to load summary for {}: {}", id, e)))?
        .ok_or(BuilderError::ItemNotFound(id))
}

/// Head locator of each id, in iteration order
///
/// Fails on the first id without a summary.
pub fn resolve_locators<I, T>(resolver: &I, ids: T) -> Result<Vec<Locator>, BuilderError>
where
    I: ItemSummaryResolver,
    I::Error: Display,
    T: IntoIterator<Item = ContentId>,
{
    ids.into_iter()
        .map(|id| load_summary(resolver, id).map(|summary| summary.head_locator()))
        .collect()
}
