//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use relsync_store::SqliteStore;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Execute the init command.
///
/// Opening the store creates the schema; running it again is harmless.
pub fn execute_init(
    args: InitArgs,
    config: &Config,
    config_path: &Path,
    database: &Path,
    formatter: &Formatter,
) -> Result<()> {
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    SqliteStore::new(database)?;

    let message = format!("Initialized database at {}", database.display());
    println!(
        "{}",
        formatter.record(&message, json!({ "database": database.display().to_string() }))?
    );

    if args.save_config {
        config.save_to(config_path)?;
        println!("{}", formatter.info(&format!("Wrote configuration to {}", config_path.display())));
    }

    Ok(())
}
