//! Extraction Orchestrator - ties index, matcher and store together
//!
//! Given a new course, runs the match engine over its body, resolves the
//! candidate taxonomy ids back to catalog entries, materializes missing
//! competency rows, and persists course + relations as one atomic unit.
//! A transient storage failure is retried exactly once; the rollback in
//! between guarantees no partial state survives the first attempt.

use crate::matcher::MatchEngine;
use crate::record::Course;
use crate::relation::Relation;
use crate::storage::{RelationStore, sqlite::is_transient};
use crate::taxonomy::TaxonomyIndex;
use crate::{Error, Result};

/// Composes TaxonomyIndex + MatchEngine + RelationStore for the
/// extract-and-add operation.
pub struct ExtractionOrchestrator<'a> {
    store: &'a mut RelationStore,
}

impl<'a> ExtractionOrchestrator<'a> {
    pub fn new(store: &'a mut RelationStore) -> Self {
        Self { store }
    }

    /// Create a course and persist its extracted competency relations.
    ///
    /// Fails with [`Error::DuplicateName`] if the course name is taken and
    /// with [`Error::MissingReference`] if a candidate id is absent from
    /// the index snapshot; in every failure case nothing is persisted.
    pub fn add_course_and_extract(
        &mut self,
        name: &str,
        body: &str,
        index: &TaxonomyIndex,
        threshold: f32,
    ) -> Result<(Course, Vec<Relation>)> {
        let candidates = MatchEngine::new(index).extract(body, threshold)?;

        let mut resolved = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let entry = index.get(candidate.taxonomy_id).ok_or_else(|| {
                Error::MissingReference(format!("taxonomy id {}", candidate.taxonomy_id))
            })?;
            resolved.push((entry.label.clone(), entry.body.clone()));
        }

        tracing::info!(
            "Extracting course '{}': {} competencies above threshold {}",
            name,
            resolved.len(),
            threshold
        );

        self.with_retry(|store| store.persist_extraction(name, body, &resolved))
    }

    /// Explicit relation add, creating course and competency if absent.
    pub fn link_course_competency(
        &mut self,
        course_name: &str,
        course_body: &str,
        competency_name: &str,
        competency_body: &str,
    ) -> Result<Relation> {
        self.with_retry(|store| {
            store.link_by_name(course_name, course_body, competency_name, competency_body)
        })
    }

    /// Run a composite write, retrying once if the database was busy.
    fn with_retry<T>(&mut self, op: impl Fn(&mut RelationStore) -> Result<T>) -> Result<T> {
        match op(self.store) {
            Err(Error::Storage(e)) if is_transient(&e) => {
                tracing::warn!("Transient storage failure, retrying once: {}", e);
                op(self.store)
            }
            other => other,
        }
    }
}
