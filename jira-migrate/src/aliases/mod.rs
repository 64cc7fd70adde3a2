//! Label alias table and label rewriting.
//!
//! The alias file is a two-column CSV mapping a Jira label to its GitHub
//! replacement. Two replacement values are reserved: [`DELETED`] drops the
//! label and [`SAME`] keeps it unchanged.

mod error;

pub use error::AliasError;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Replacement value that drops a label.
pub const DELETED: &str = "DELETED";

/// Replacement value that keeps a label as-is.
pub const SAME: &str = "same";

/// How an aliased label relates to its original.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AliasMode {
    /// The replacement takes the place of the original label.
    #[default]
    Replace,

    /// The replacement is added and the original label is kept too.
    Union,
}

/// Mapping of Jira labels to GitHub labels.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Loads an alias table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError`] if the file can't be opened or parsed.
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        info!(path = %path.display(), "Loading label aliases");

        let file = std::fs::File::open(path).map_err(|e| AliasError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_reader(file).map_err(|e| AliasError::CsvError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Parses alias rows from any reader.
    ///
    /// Rows with fewer than two columns are skipped and an empty replacement
    /// drops the label. Later rows override earlier ones.
    ///
    /// # Errors
    ///
    /// Returns a [`csv::Error`] if the input isn't valid CSV.
    pub fn from_reader(reader: impl Read) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .quote(b'"')
            .flexible(true)
            .from_reader(reader);

        let mut aliases = HashMap::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(label), Some("")) => {
                    warn!(row = row + 1, label, "Empty alias replacement, label will be dropped");
                    aliases.insert(label.to_string(), DELETED.to_string());
                }
                (Some(label), Some(replacement)) => {
                    aliases.insert(label.to_string(), replacement.to_string());
                }
                _ => warn!(row = row + 1, "Skipping alias row without a replacement"),
            }
        }

        debug!(count = aliases.len(), "Loaded label aliases");
        Ok(Self { aliases })
    }

    /// Builds a table from label/replacement pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if no aliases are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Rewrites a label set.
    ///
    /// The result keeps the order of the input and contains no duplicates
    /// or empty labels.
    #[must_use]
    pub fn apply(&self, labels: &[String], mode: AliasMode) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(labels.len());
        let mut push = |label: &str| {
            if !label.is_empty() && !result.iter().any(|existing| existing == label) {
                result.push(label.to_string());
            }
        };

        for label in labels {
            match self.aliases.get(label).map(String::as_str) {
                None | Some(SAME) => push(label),
                Some(DELETED) => {}
                Some(replacement) => {
                    push(replacement);
                    if mode == AliasMode::Union {
                        push(label);
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_table() -> AliasTable {
        AliasTable::from_pairs([("bug", "DELETED"), ("feature", "enhancement")])
    }

    #[test]
    fn replace_mode_swaps_aliased_labels() {
        let result = sample_table().apply(&labels(&["bug", "feature", "other"]), AliasMode::Replace);

        assert_eq!(result, labels(&["enhancement", "other"]));
    }

    #[test]
    fn union_mode_keeps_original_labels() {
        let result = sample_table().apply(&labels(&["bug", "feature", "other"]), AliasMode::Union);

        assert_eq!(result, labels(&["enhancement", "feature", "other"]));
    }

    #[test]
    fn same_keeps_label() {
        let table = AliasTable::from_pairs([("Major", "same")]);
        let result = table.apply(&labels(&["Major"]), AliasMode::Replace);

        assert_eq!(result, labels(&["Major"]));
    }

    #[test]
    fn merged_aliases_are_deduplicated() {
        let table = AliasTable::from_pairs([("Critical", "urgent"), ("Blocker", "urgent")]);
        let result = table.apply(&labels(&["Critical", "Blocker"]), AliasMode::Replace);

        assert_eq!(result, labels(&["urgent"]));
    }

    #[test]
    fn empty_table_passes_labels_through() {
        let input = labels(&["a", "b"]);

        assert_eq!(AliasTable::default().apply(&input, AliasMode::Replace), input);
    }

    #[test]
    fn can_parse_quoted_csv() {
        let csv = "\"bug\",\"DELETED\"\n\"New Feature\",\"enhancement, new\"\nlonely\n";
        let table = AliasTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.apply(&labels(&["New Feature", "lonely"]), AliasMode::Replace),
            labels(&["enhancement, new", "lonely"])
        );
    }

    #[test]
    fn empty_replacement_drops_label() {
        let table = AliasTable::from_reader("bug,\nOpen,DELETED\n".as_bytes()).unwrap();
        let result = table.apply(&labels(&["Open", "bug", "ui"]), AliasMode::Replace);

        assert_eq!(result, labels(&["ui"]));
    }

    #[test]
    fn empty_replacement_from_pairs_is_never_emitted() {
        let table = AliasTable::from_pairs([("bug", "")]);
        let result = table.apply(&labels(&["bug", "ui"]), AliasMode::Union);

        assert_eq!(result, labels(&["bug", "ui"]));
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = AliasTable::load(&temp.path().join("aliases.csv"));

        assert!(matches!(result, Err(AliasError::IoError { .. })));
    }
}
