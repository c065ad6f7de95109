//! Extract command implementation.

use crate::cli::{ExtractArgs, RoleArg};
use crate::error::Result;
use crate::output::Formatter;
use relsync_builder::{BuilderConfig, DependentRole, OwnerRole, RelationshipBuilder, Role};
use relsync_exit::{ExitError, ExtractIdsExit, MapRequestContext, CONTENT_ID_PARAM};
use relsync_store::SqliteStore;

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    store: &SqliteStore,
    config: &BuilderConfig,
    formatter: &Formatter,
) -> Result<()> {
    let ids = extract(&args, store, config)?;
    let role = match args.role {
        RoleArg::Owner => OwnerRole::NAME,
        RoleArg::Dependent => DependentRole::NAME,
    };

    println!("{}", formatter.related_ids(&args.item, role, ids.as_deref())?);
    Ok(())
}

/// Run the extract exit for the requested role.
pub fn extract(
    args: &ExtractArgs,
    store: &SqliteStore,
    config: &BuilderConfig,
) -> std::result::Result<Option<String>, ExitError> {
    match args.role {
        RoleArg::Owner => run::<OwnerRole>(args, store, config),
        RoleArg::Dependent => run::<DependentRole>(args, store, config),
    }
}

fn run<R: Role>(
    args: &ExtractArgs,
    store: &SqliteStore,
    config: &BuilderConfig,
) -> std::result::Result<Option<String>, ExitError> {
    let builder = RelationshipBuilder::<R, _, _, _>::new(store, store, store).with_config(config.clone());
    let request = MapRequestContext::new().with(CONTENT_ID_PARAM, args.item.as_str());

    ExtractIdsExit::new(builder).process(&[Some(args.slot.as_str())], &request)
}
