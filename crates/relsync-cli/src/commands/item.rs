//! Item command implementation.

use crate::cli::{ItemAction, ItemArgs};
use crate::error::Result;
use crate::output::Formatter;
use relsync_domain::{ContentId, ContentTypeId, ItemSummary, Revision};
use relsync_store::SqliteStore;
use serde_json::json;

/// Execute the item command.
pub fn execute_item(args: ItemArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        ItemAction::Put {
            id,
            content_type,
            current,
            edit,
        } => {
            let mut summary = ItemSummary::new(
                ContentId::new(id),
                ContentTypeId::new(content_type),
                Revision::new(current),
            );
            if let Some(edit) = edit {
                summary = summary.with_edit_revision(Revision::new(edit));
            }
            store.put_item(&summary)?;

            let head = summary.head_locator();
            let message = format!("Stored item {} (head revision {})", id, head.revision);
            println!(
                "{}",
                formatter.record(
                    &message,
                    json!({
                        "id": id,
                        "content_type": content_type,
                        "current_revision": current,
                        "edit_revision": edit,
                    }),
                )?
            );
        }
    }

    Ok(())
}
