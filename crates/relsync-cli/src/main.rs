//! Relsync CLI - Command-line interface for relationship reconciliation.

use clap::Parser;
use relsync_cli::commands;
use relsync_cli::{Cli, Command, Config, Formatter};
use relsync_store::SqliteStore;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    // Logs go to stderr so command output stays parseable
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Determine output format and color setting
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    if let Err(e) = run(cli, &config, &formatter) {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli, config: &Config, formatter: &Formatter) -> relsync_cli::Result<()> {
    let database = match cli.database {
        Some(path) => path,
        None => config.database_path()?,
    };
    tracing::debug!("Using database {}", database.display());

    match cli.command {
        Command::Init(args) => {
            let config_path = match cli.config {
                Some(path) => path,
                None => Config::path()?,
            };
            commands::execute_init(args, config, &config_path, &database, formatter)?;
        }
        Command::Item(args) => commands::execute_item(args, &open(&database)?, formatter)?,
        Command::Slot(args) => commands::execute_slot(args, &open(&database)?, formatter)?,
        Command::Template(args) => commands::execute_template(args, &open(&database)?, formatter)?,
        Command::Extract(args) => {
            commands::execute_extract(args, &open(&database)?, &config.builder, formatter)?
        }
        Command::Build(args) => {
            commands::execute_build(args, &open(&database)?, &config.builder, formatter)?
        }
    }

    Ok(())
}

fn open(database: &Path) -> relsync_cli::Result<SqliteStore> {
    Ok(SqliteStore::new(database)?)
}
