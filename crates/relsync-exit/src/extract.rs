//! Extract exit - Read the related ids of an item as a delimited list

use crate::context::{content_id, RequestContext};
use crate::error::translate;
use crate::params::{join_ids, ExitParams};
use crate::ExitError;
use relsync_builder::{DependentRole, OwnerRole, RelationshipBuilder, Role};
use relsync_domain::{Catalog, ItemSummaryResolver, RelationshipStore};
use std::fmt::Display;
use tracing::debug;

/// Lists the owners of the relationships where the request's item is the dependent
pub type ExtractOwnerIdsExit<S, C, I> = ExtractIdsExit<DependentRole, S, C, I>;

/// Lists the dependents of the relationships the request's item owns
pub type ExtractDependentIdsExit<S, C, I> = ExtractIdsExit<OwnerRole, S, C, I>;

/// Exit returning the related ids of the request's item in a slot
pub struct ExtractIdsExit<R, S, C, I> {
    builder: RelationshipBuilder<R, S, C, I>,
}

impl<R, S, C, I> ExtractIdsExit<R, S, C, I> {
    /// Wrap a builder
    pub fn new(builder: RelationshipBuilder<R, S, C, I>) -> Self {
        Self { builder }
    }

    /// Get the wrapped builder
    pub fn builder(&self) -> &RelationshipBuilder<R, S, C, I> {
        &self.builder
    }
}

impl<R, S, C, I> ExtractIdsExit<R, S, C, I>
where
    R: Role,
    S: RelationshipStore,
    C: Catalog,
    I: ItemSummaryResolver,
    S::Error: Display,
    C::Error: Display,
    I::Error: Display,
{
    /// Handle an extract invocation
    ///
    /// Returns the ids joined with `;` (e.g. `692;651;339`), or `None` when
    /// the item has no relationships in the slot, so the caller leaves its
    /// field unchanged.
    ///
    /// # Arguments
    ///
    /// * `params` - positional exit parameters; the first is the slot name
    /// * `request` - must carry the item's `sys_contentid`
    pub fn process<Q>(
        &self,
        params: &[Option<&str>],
        request: &Q,
    ) -> Result<Option<String>, ExitError>
    where
        Q: RequestContext + ?Sized,
    {
        let params = ExitParams::parse(params)?;
        let item = content_id(request)?;

        let ids = self
            .builder
            .extract_related_ids(item, &params.slot_name)
            .map_err(translate)?;

        if ids.is_empty() {
            debug!("No {} relationships for {} in slot '{}'", R::NAME, item, params.slot_name);
            return Ok(None);
        }

        Ok(Some(join_ids(ids)))
    }
}
