//! Build command implementation.

use crate::cli::{BuildArgs, RoleArg};
use crate::error::Result;
use crate::output::Formatter;
use relsync_builder::{BuilderConfig, DependentRole, OwnerRole, RelationshipBuilder, Role};
use relsync_exit::{
    BuildOutcome, BuildRelationshipsExit, ExitError, MapRequestContext, CONTENT_ID_PARAM,
    DEFAULT_RELATED_IDS_PARAM,
};
use relsync_store::SqliteStore;

/// Execute the build command.
pub fn execute_build(
    args: BuildArgs,
    store: &SqliteStore,
    config: &BuilderConfig,
    formatter: &Formatter,
) -> Result<()> {
    match build(&args, store, config)? {
        Some(outcome) => println!("{}", formatter.build_outcome(&outcome)?),
        None => println!(
            "{}",
            formatter.info("No related ids given; relationships left unchanged")
        ),
    }
    Ok(())
}

/// Run the build exit for the requested role.
///
/// `--dry-run` turns on dry-run mode on top of the configured settings.
pub fn build(
    args: &BuildArgs,
    store: &SqliteStore,
    config: &BuilderConfig,
) -> std::result::Result<Option<BuildOutcome>, ExitError> {
    let mut config = config.clone();
    config.dry_run |= args.dry_run;

    match args.role {
        RoleArg::Owner => run::<OwnerRole>(args, store, config),
        RoleArg::Dependent => run::<DependentRole>(args, store, config),
    }
}

fn run<R: Role>(
    args: &BuildArgs,
    store: &SqliteStore,
    config: BuilderConfig,
) -> std::result::Result<Option<BuildOutcome>, ExitError> {
    let builder = RelationshipBuilder::<R, _, _, _>::new(store, store, store).with_config(config);

    let mut request = MapRequestContext::new().with(CONTENT_ID_PARAM, args.item.as_str());
    if let Some(related) = &args.related {
        request.set(DEFAULT_RELATED_IDS_PARAM, related.as_str());
    }

    let params = [Some(args.slot.as_str()), Some(args.template.as_str())];
    BuildRelationshipsExit::new(builder).process(&params, &request)
}
