//! Integration tests for the CLI commands against an on-disk database.

use relsync_cli::cli::{
    BuildArgs, ExtractArgs, ItemAction, ItemArgs, RoleArg, SlotAction, SlotArgs, TemplateAction,
    TemplateArgs,
};
use relsync_cli::commands::{self, build::build, extract::extract};
use relsync_cli::config::OutputFormat;
use relsync_cli::{CliError, Config, Formatter};
use relsync_builder::BuilderConfig;
use relsync_exit::ExitError;
use relsync_store::SqliteStore;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: SqliteStore,
    formatter: Formatter,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("relsync.db")).unwrap();
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    commands::execute_slot(
        SlotArgs {
            action: SlotAction::Add {
                name: "related".to_string(),
                relationship: Some("ActiveAssembly".to_string()),
            },
        },
        &store,
        &formatter,
    )
    .unwrap();
    commands::execute_template(
        TemplateArgs {
            action: TemplateAction::Add {
                name: "snippet".to_string(),
                content_type: Some(1),
            },
        },
        &store,
        &formatter,
    )
    .unwrap();
    for id in [7, 101, 102, 103, 104] {
        commands::execute_item(
            ItemArgs {
                action: ItemAction::Put {
                    id,
                    content_type: 1,
                    current: 1,
                    edit: None,
                },
            },
            &store,
            &formatter,
        )
        .unwrap();
    }

    Fixture {
        _dir: dir,
        store,
        formatter,
    }
}

fn build_args(role: RoleArg, related: Option<&str>) -> BuildArgs {
    BuildArgs {
        role,
        item: "7".to_string(),
        slot: "related".to_string(),
        template: "snippet".to_string(),
        related: related.map(str::to_string),
        dry_run: false,
    }
}

fn extract_args(role: RoleArg, item: &str) -> ExtractArgs {
    ExtractArgs {
        role,
        item: item.to_string(),
        slot: "related".to_string(),
    }
}

#[test]
fn test_build_and_extract_round() {
    let fx = fixture();
    let config = BuilderConfig::default();

    build(&build_args(RoleArg::Owner, Some("101;102;103")), &fx.store, &config).unwrap();
    let outcome = build(&build_args(RoleArg::Owner, Some("102;104")), &fx.store, &config)
        .unwrap()
        .unwrap();
    assert_eq!(outcome.added, vec![104]);
    assert_eq!(outcome.removed, vec![101, 103]);
    assert_eq!(outcome.unchanged, vec![102]);

    let ids = extract(&extract_args(RoleArg::Owner, "7"), &fx.store, &config)
        .unwrap()
        .unwrap();
    let mut ids: Vec<&str> = ids.split(';').collect();
    ids.sort();
    assert_eq!(ids, vec!["102", "104"]);

    // The same links seen from the other end
    assert_eq!(
        extract(&extract_args(RoleArg::Dependent, "104"), &fx.store, &config).unwrap(),
        Some("7".to_string())
    );
}

#[test]
fn test_dry_run_flag_overrides_config() {
    let fx = fixture();
    let mut args = build_args(RoleArg::Dependent, Some("101"));
    args.dry_run = true;

    let outcome = build(&args, &fx.store, &BuilderConfig::default())
        .unwrap()
        .unwrap();

    assert!(outcome.dry_run);
    assert_eq!(fx.store.relationship_count().unwrap(), 0);
}

#[test]
fn test_build_without_related_leaves_links() {
    let fx = fixture();
    let config = BuilderConfig::default();
    build(&build_args(RoleArg::Owner, Some("101")), &fx.store, &config).unwrap();

    assert!(build(&build_args(RoleArg::Owner, None), &fx.store, &config)
        .unwrap()
        .is_none());
    commands::execute_build(build_args(RoleArg::Owner, None), &fx.store, &config, &fx.formatter)
        .unwrap();
    assert_eq!(fx.store.relationship_count().unwrap(), 1);
}

#[test]
fn test_errors_carry_exit_codes() {
    let fx = fixture();
    let config = BuilderConfig::default();

    let err = commands::execute_extract(
        extract_args(RoleArg::Owner, "seven"),
        &fx.store,
        &config,
        &fx.formatter,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Exit(ExitError::InvalidRequest(_))));
    assert_eq!(err.exit_code(), 2);

    let mut args = build_args(RoleArg::Owner, Some("101"));
    args.template = "missing".to_string();
    let err = commands::execute_build(args, &fx.store, &config, &fx.formatter).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_duplicate_slot_is_store_error() {
    let fx = fixture();
    let err = commands::execute_slot(
        SlotArgs {
            action: SlotAction::Add {
                name: "related".to_string(),
                relationship: None,
            },
        },
        &fx.store,
        &fx.formatter,
    )
    .unwrap_err();

    assert!(matches!(err, CliError::Store(_)));
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.database = Some(dir.path().join("links.db"));
    config.builder.dry_run = true;
    config.settings.format = OutputFormat::Json;

    config.save_to(&path).unwrap();
    let loaded = Config::load(Some(&path)).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.database_path().unwrap(), dir.path().join("links.db"));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(CliError::Io(_))));
}
