//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use relsync_exit::{BuildOutcome, DELIMITER};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of an extract.
    ///
    /// `ids` is the delimited list returned by the exit, `None` when nothing
    /// is related.
    pub fn related_ids(&self, item: &str, role: &str, ids: Option<&str>) -> Result<String> {
        let list: Vec<&str> = ids.map(|ids| ids.split(DELIMITER).collect()).unwrap_or_default();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "item": item,
                "role": role,
                "related_ids": ids.map(|_| list),
            }))?),
            OutputFormat::Quiet => Ok(ids.unwrap_or_default().to_string()),
            OutputFormat::Table => {
                if list.is_empty() {
                    return Ok(self.colorize("No related items found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Related ID"]);
                for id in &list {
                    builder.push_record([*id]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format the result of a build.
    pub fn build_outcome(&self, outcome: &BuildOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Quiet => {
                let mut related: Vec<u32> = outcome
                    .unchanged
                    .iter()
                    .chain(&outcome.added)
                    .copied()
                    .collect();
                related.sort_unstable();
                Ok(join(&related))
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Change", "Count", "IDs"]);
                for (label, ids) in [
                    ("added", &outcome.added),
                    ("removed", &outcome.removed),
                    ("unchanged", &outcome.unchanged),
                ] {
                    builder.push_record([label.to_string(), ids.len().to_string(), join(ids)]);
                }

                let mut lines = vec![self.success(&outcome.message()), self.table(builder)];
                if !outcome.invalid_entries.is_empty() {
                    let entries = outcome
                        .invalid_entries
                        .iter()
                        .map(|e| format!("'{}'", e))
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(self.warning(&format!("Skipped invalid entries: {}", entries)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a message for a command that changed the database.
    ///
    /// JSON output shows `record` instead of the message.
    pub fn record(&self, message: &str, record: serde_json::Value) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&record)?),
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => Ok(self.success(message)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> BuildOutcome {
        BuildOutcome {
            item: 7,
            role: "owner".to_string(),
            slot: "related".to_string(),
            added: vec![104],
            removed: vec![101, 103],
            unchanged: vec![102],
            saved: 1,
            deleted: 2,
            dry_run: false,
            invalid_entries: vec![String::new()],
        }
    }

    #[test]
    fn test_related_ids_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.related_ids("7", "owner", Some("692;651")).unwrap(), "692;651");
        assert_eq!(formatter.related_ids("7", "owner", None).unwrap(), "");
    }

    #[test]
    fn test_related_ids_json_distinguishes_none() {
        let formatter = Formatter::new(OutputFormat::Json, false);

        let output = formatter.related_ids("7", "owner", Some("692;651")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["related_ids"], json!(["692", "651"]));

        let output = formatter.related_ids("7", "owner", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["related_ids"].is_null());
    }

    #[test]
    fn test_related_ids_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.related_ids("7", "owner", Some("692;651")).unwrap();
        assert!(output.contains("Related ID"));
        assert!(output.contains("651"));

        let output = formatter.related_ids("7", "owner", None).unwrap();
        assert!(output.contains("No related items found"));
    }

    #[test]
    fn test_build_outcome_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.build_outcome(&outcome()).unwrap();
        assert!(output.starts_with("✓ Updated slot 'related' of item 7 (owner)"));
        assert!(output.contains("101;103"));
        assert!(output.contains("⚠ Skipped invalid entries: ''"));
    }

    #[test]
    fn test_build_outcome_quiet_lists_resulting_ids() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.build_outcome(&outcome()).unwrap(), "102;104");
    }

    #[test]
    fn test_record() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.record("Added slot", json!({"id": 1})).unwrap();
        assert!(output.contains("\"id\": 1"));

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.record("Added slot", json!({})).unwrap(), "✓ Added slot");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.error("test"), "✗ test");
        assert_eq!(formatter.info("test"), "ℹ test");
    }
}
