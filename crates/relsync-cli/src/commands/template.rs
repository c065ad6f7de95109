//! Template command implementation.

use crate::cli::{TemplateAction, TemplateArgs};
use crate::error::Result;
use crate::output::Formatter;
use relsync_domain::ContentTypeId;
use relsync_store::SqliteStore;
use serde_json::json;

/// Execute the template command.
pub fn execute_template(args: TemplateArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        TemplateAction::Add { name, content_type } => {
            let template = store.add_template(&name, content_type.map(ContentTypeId::new))?;

            println!(
                "{}",
                formatter.record(
                    &format!("Added template '{}' ({})", template.name, template.id),
                    json!({
                        "id": template.id.value(),
                        "name": &template.name,
                        "content_type": content_type,
                    }),
                )?
            );
        }
    }

    Ok(())
}
