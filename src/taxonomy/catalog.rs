//! Catalog loading - the external ESCO skill file
//!
//! The catalog is a JSON array of `{id, label, body}` objects, one per
//! ESCO skill, produced by the upstream preprocessing pipeline. It is
//! read once at initialization and never written by this service.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// One skill of the external taxonomy.
///
/// Read-only for the lifetime of the process after initialization; the
/// persisted [`crate::Competency`] row is materialized from this on first
/// match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// ESCO-assigned id, unique within a catalog version
    pub id: i64,
    /// Canonical skill label, e.g. "project management"
    pub label: String,
    /// Skill description text
    #[serde(default)]
    pub body: String,
}

impl TaxonomyEntry {
    pub fn new(id: i64, label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            body: body.into(),
        }
    }
}

/// Read a catalog file into entries.
///
/// Validation (empty catalog, duplicate ids) happens in
/// [`super::TaxonomyIndex::build`], not here: this function only gets the
/// bytes off disk and through serde.
pub fn load_catalog(path: &Path) -> Result<Vec<TaxonomyEntry>> {
    let contents = std::fs::read_to_string(path)?;
    let entries: Vec<TaxonomyEntry> = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded {} taxonomy entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_catalog_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "label": "project management", "body": "plan and steer projects"}},
               {{"id": 2, "label": "data analysis"}}]"#
        )
        .unwrap();

        let entries = load_catalog(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "project management");
        // Missing body defaults to empty
        assert_eq!(entries[1].body, "");
    }

    #[test]
    fn test_load_catalog_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        assert!(load_catalog(file.path()).is_err());
    }
}
