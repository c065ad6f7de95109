//! Exit parameters and delimited id lists

use crate::ExitError;
use relsync_domain::ContentId;
use std::collections::BTreeSet;
use tracing::warn;

/// Separator between ids in a delimited id list
pub const DELIMITER: char = ';';

/// Request parameter read by the build exit when none is configured
pub const DEFAULT_RELATED_IDS_PARAM: &str = "related_ids";

/// Positional parameters shared by the extract and build exits
///
/// | Position | Meaning | Required |
/// |----------|---------|----------|
/// | 0 | slot name | always |
/// | 1 | template name | build only |
/// | 2 | request parameter holding the related ids | no (`related_ids`) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitParams {
    /// Slot to extract from or build into
    pub slot_name: String,

    /// Template for relationships created by the build exit
    pub template_name: Option<String>,

    /// Request parameter holding the delimited related ids
    pub related_ids_param: String,
}

impl ExitParams {
    /// Parse positional exit parameters
    ///
    /// Missing, empty and blank values count as absent.
    pub fn parse(params: &[Option<&str>]) -> Result<Self, ExitError> {
        let value = |index: usize| {
            params
                .get(index)
                .copied()
                .flatten()
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let slot_name = value(0)
            .ok_or_else(|| ExitError::InvalidRequest("slot name parameter is required".to_string()))?;

        Ok(Self {
            slot_name: slot_name.to_string(),
            template_name: value(1).map(str::to_string),
            related_ids_param: value(2).unwrap_or(DEFAULT_RELATED_IDS_PARAM).to_string(),
        })
    }

    /// Template name, required by the build exit
    pub fn template_name(&self) -> Result<&str, ExitError> {
        self.template_name
            .as_deref()
            .ok_or_else(|| ExitError::InvalidRequest("template name parameter is required".to_string()))
    }
}

/// Ids parsed from a delimited list, plus the entries that were not ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIds {
    /// Distinct valid ids
    pub ids: BTreeSet<ContentId>,

    /// Entries that could not be parsed, in input order
    pub invalid: Vec<String>,
}

/// Parse each token as a content id into `output`
///
/// Returns the tokens that are not ids (including empty ones). They are
/// logged and skipped; the remaining tokens are still converted.
pub fn convert<'a, T>(tokens: T, output: &mut BTreeSet<ContentId>) -> Vec<String>
where
    T: IntoIterator<Item = &'a str>,
{
    let mut invalid = Vec::new();

    for token in tokens {
        match token.parse::<ContentId>() {
            Ok(id) => {
                output.insert(id);
            }
            Err(e) => {
                warn!("Skipping {}", e);
                invalid.push(token.to_string());
            }
        }
    }

    invalid
}

/// Split a delimited id list and convert every entry
///
/// # Examples
///
/// ```
/// use relsync_exit::parse_id_list;
///
/// let parsed = parse_id_list("700;;301");
/// assert_eq!(parsed.ids.len(), 2);
/// assert_eq!(parsed.invalid, vec![String::new()]);
/// ```
pub fn parse_id_list(input: &str) -> ParsedIds {
    let mut ids = BTreeSet::new();
    let invalid = convert(input.split(DELIMITER), &mut ids);
    ParsedIds { ids, invalid }
}

/// Join ids into a delimited list, keeping their order
pub fn join_ids<T>(ids: T) -> String
where
    T: IntoIterator<Item = ContentId>,
{
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}
