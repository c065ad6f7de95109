//! Relsync Builder
//!
//! Reconciles the relationships between a content item and a set of related
//! items within one slot.
//!
//! # Overview
//!
//! Given a source item, the ids of the items it should be related to, and the
//! role the source item plays, a builder:
//! - queries the relationships the item currently has in the slot
//! - computes the ids to add (desired − current) and remove (current − desired)
//! - saves one batch of new relationships and deletes one batch of stale ones
//!
//! Relationships to ids present in both sets are never touched, so calling
//! `reconcile` twice with the same desired set is a no-op the second time.
//!
//! # Roles
//!
//! | Builder | Source item is | Related items are | Template lookup |
//! |---------|----------------|-------------------|-----------------|
//! | [`OwnerRelationshipBuilder`] | owner | dependents | by name |
//! | [`DependentRelationshipBuilder`] | dependent | owners | by name and the item's content type |
//!
//! Both are the same [`RelationshipBuilder`] instantiated with a different
//! [`Role`].
//!
//! # Usage
//!
//! ```
//! use relsync_builder::{BuilderError, OwnerRelationshipBuilder};
//! use relsync_domain::{Catalog, ContentId, ItemSummaryResolver, RelationshipStore};
//! use std::collections::BTreeSet;
//! use std::fmt::Display;
//!
//! fn link_related<P>(platform: &P) -> Result<(), BuilderError>
//! where
//!     P: RelationshipStore + Catalog + ItemSummaryResolver,
//!     <P as RelationshipStore>::Error: Display,
//!     <P as Catalog>::Error: Display,
//!     <P as ItemSummaryResolver>::Error: Display,
//! {
//!     let builder = OwnerRelationshipBuilder::new(platform, platform, platform);
//!
//!     let desired: BTreeSet<ContentId> = [101, 104].into_iter().map(ContentId::new).collect();
//!     let report = builder.reconcile(ContentId::new(7), &desired, "related", "snippet")?;
//!     println!("{}", report.summary());
//!
//!     let related = builder.extract_related_ids(ContentId::new(7), "related")?;
//!     assert_eq!(related.len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Builders log through `tracing`. Pass a [`tracing::Dispatch`] with
//! [`RelationshipBuilder::with_dispatch`] to route a builder's events to a
//! specific subscriber without installing a global one.
//!
//! # Concurrency
//!
//! Calls are synchronous and uncoordinated by default. Builders that share a
//! [`SlotLocks`] through [`RelationshipBuilder::with_locks`] serialize their
//! reconcile calls per (role, item, slot).

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod locks;
mod plan;
mod role;
pub mod set_algebra;

pub use builder::{DependentRelationshipBuilder, OwnerRelationshipBuilder, RelationshipBuilder};
pub use config::BuilderConfig;
pub use error::BuilderError;
pub use locks::SlotLocks;
pub use plan::{ReconcilePlan, ReconcileReport};
pub use role::{DependentRole, OwnerRole, Role};
