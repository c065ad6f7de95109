//! Relsync Exits
//!
//! Glue between a host request and the relationship builders. An exit takes
//! positional parameters plus a request context carrying the item's
//! `sys_contentid`, runs a builder, and hands back a plain result.
//!
//! Provides 2 exits, each available for both roles:
//! - [`ExtractIdsExit`] - related ids as a `;`-delimited list
//! - [`BuildRelationshipsExit`] - reconcile to a `;`-delimited list read from the request
//!
//! Every failure is reported as one [`ExitError`].
//!
//! # Example
//!
//! ```
//! use relsync_builder::OwnerRelationshipBuilder;
//! use relsync_exit::{ExtractDependentIdsExit, MapRequestContext};
//! use relsync_store::SqliteStore;
//!
//! let store = SqliteStore::in_memory().unwrap();
//! store.add_slot("related", Some("ActiveAssembly")).unwrap();
//!
//! let exit = ExtractDependentIdsExit::new(OwnerRelationshipBuilder::new(&store, &store, &store));
//! let request = MapRequestContext::new().with("sys_contentid", "7");
//!
//! assert_eq!(exit.process(&[Some("related")], &request).unwrap(), None);
//! ```

#![warn(missing_docs)]

mod build;
mod context;
mod error;
mod extract;
mod params;

pub use build::{
    BuildDependentRelationshipsExit, BuildOutcome, BuildOwnerRelationshipsExit,
    BuildRelationshipsExit,
};
pub use context::{content_id, MapRequestContext, RequestContext, CONTENT_ID_PARAM};
pub use error::ExitError;
pub use extract::{ExtractDependentIdsExit, ExtractIdsExit, ExtractOwnerIdsExit};
pub use params::{
    convert, join_ids, parse_id_list, ExitParams, ParsedIds, DEFAULT_RELATED_IDS_PARAM, DELIMITER,
};
