//! Slot command implementation.

use crate::cli::{SlotAction, SlotArgs};
use crate::error::Result;
use crate::output::Formatter;
use relsync_store::SqliteStore;
use serde_json::json;

/// Execute the slot command.
pub fn execute_slot(args: SlotArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        SlotAction::Add { name, relationship } => {
            let slot = store.add_slot(&name, relationship.as_deref())?;

            println!(
                "{}",
                formatter.record(
                    &format!("Added slot '{}' ({})", slot.name, slot.id),
                    json!({
                        "id": slot.id.value(),
                        "name": &slot.name,
                        "relationship_name": &slot.relationship_name,
                    }),
                )?
            );
            if !slot.is_configured() {
                println!(
                    "{}",
                    formatter.warning("Slot has no relationship kind; builds will log a warning")
                );
            }
        }
    }

    Ok(())
}
