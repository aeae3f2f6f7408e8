//! # Skillgraph - Competency Extraction Engine
//!
//! Deterministic ESCO skill matching for free-text course descriptions.
//!
//! Skillgraph provides:
//! - An inverted token/phrase index over the ESCO competency taxonomy
//! - A reproducible lexical-overlap match engine (no ML, no training step)
//! - SQLite-backed storage for the course↔competency relation graph
//! - An extraction orchestrator that persists a course and its matched
//!   competencies as one atomic unit

pub mod record;
pub mod relation;
pub mod taxonomy;
pub mod matcher;
pub mod storage;
pub mod extract;
pub mod server;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use record::{Competency, Course};
pub use relation::Relation;
pub use taxonomy::{TaxonomyEntry, TaxonomyIndex};
pub use matcher::{MatchCandidate, MatchEngine};
pub use storage::{OnConflict, RelationStore};
pub use extract::ExtractionOrchestrator;

/// Result type alias for Skillgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Skillgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The taxonomy catalog was empty, malformed, or carried duplicate ids
    #[error("Taxonomy load failed: {0}")]
    TaxonomyLoad(String),

    /// The caller handed us text we refuse to match or store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A course or competency with that name already exists
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// A relation endpoint does not exist in its table
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// A lookup filter id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by the request itself rather than by the service.
    ///
    /// The HTTP layer maps these to 400; everything else is a 500.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::TaxonomyLoad(_)
                | Error::InvalidInput(_)
                | Error::DuplicateName(_)
                | Error::MissingReference(_)
                | Error::NotFound(_)
        )
    }
}
