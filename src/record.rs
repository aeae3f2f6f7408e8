//! Persisted record types - Course and Competency
//!
//! Both are `{id, name, body}` rows with a unique name. Competencies come
//! from two places: bulk taxonomy import (ids pre-assigned from ESCO) or
//! lazy creation the first time the match engine resolves an ESCO skill.
//! Courses come from the explicit add operation or from extract-and-add.

use serde::{Deserialize, Serialize};

/// A persisted, uniquely named skill record.
///
/// Immutable once created, except that a bulk taxonomy import may fill in
/// an empty `body` for a row that was lazily created earlier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competency {
    /// Storage-assigned id (or ESCO-assigned on bulk import)
    pub id: i64,
    /// Unique name; for ESCO-sourced rows this is the canonical label
    pub name: String,
    /// Descriptive text
    pub body: String,
}

impl Competency {
    pub fn new(id: i64, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A persisted course. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    /// Unique name
    pub name: String,
    /// The free-text course description competencies are extracted from
    pub body: String,
}

impl Course {
    pub fn new(id: i64, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            body: body.into(),
        }
    }
}

impl PartialEq for Competency {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Competency {}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}
