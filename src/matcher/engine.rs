//! Match engine implementation
//!
//! Scores every taxonomy entry against the input text as a weighted
//! combination of:
//! - label overlap: full-label phrase match counts 1.0, scattered label
//!   tokens count a damped fraction
//! - body overlap: fraction of the entry's body tokens present in the text
//!
//! This is a lexical matcher, not a classifier. Identical input always
//! produces the identical ranked result, which is what makes the
//! extracted competency mapping auditable.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::taxonomy::TaxonomyIndex;
use crate::taxonomy::index::IndexedEntry;
use crate::taxonomy::normalize::{self, MAX_PHRASE_LEN};
use crate::{Error, Result};

/// Weight of the label component in the final score
const LABEL_WEIGHT: f32 = 0.7;
/// Weight of the body component in the final score
const BODY_WEIGHT: f32 = 0.3;
/// Damping applied to label token matches that are not a full-phrase match
const PARTIAL_LABEL_FACTOR: f32 = 0.5;

/// A matched taxonomy entry with its confidence score in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Id of the matched [`crate::TaxonomyEntry`]
    pub taxonomy_id: i64,
    pub score: f32,
}

/// Stateless matcher over one taxonomy snapshot.
///
/// Safe to use from concurrent requests; all state lives in the shared
/// read-only index.
pub struct MatchEngine<'a> {
    index: &'a TaxonomyIndex,
}

impl<'a> MatchEngine<'a> {
    pub fn new(index: &'a TaxonomyIndex) -> Self {
        Self { index }
    }

    /// Extract ranked competency candidates from raw course text.
    ///
    /// Returns candidates scoring at least `threshold`, descending by
    /// score, ties broken by ascending taxonomy id. Empty text and text
    /// matching nothing both yield an empty result.
    pub fn extract(&self, text: &str, threshold: f32) -> Result<Vec<MatchCandidate>> {
        // The one malformed-text case a &str can still smuggle into
        // storage and log output.
        if text.contains('\0') {
            return Err(Error::InvalidInput("text contains a NUL byte".to_string()));
        }

        let tokens = normalize::tokenize(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        // Sets, not counts: repeated occurrences must not inflate overlap.
        let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let phrase_set: HashSet<String> =
            normalize::ngrams(&tokens, MAX_PHRASE_LEN).into_iter().collect();

        let mut candidates = Vec::new();
        for indexed in self.index.indexed_entries() {
            let score = score_entry(indexed, &token_set, &phrase_set);
            if score > 0.0 && score >= threshold {
                candidates.push(MatchCandidate {
                    taxonomy_id: indexed.entry.id,
                    score,
                });
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.taxonomy_id.cmp(&b.taxonomy_id))
        });

        tracing::debug!(
            "Extracted {} candidates above threshold {}",
            candidates.len(),
            threshold
        );
        Ok(candidates)
    }
}

fn score_entry(
    entry: &IndexedEntry,
    token_set: &HashSet<&str>,
    phrase_set: &HashSet<String>,
) -> f32 {
    LABEL_WEIGHT * label_overlap(entry, token_set, phrase_set)
        + BODY_WEIGHT * body_overlap(entry, token_set)
}

/// Label component in [0, 1].
///
/// A contiguous full-label match is worth 1.0; the same tokens scattered
/// through the text are worth the overlap fraction damped by
/// [`PARTIAL_LABEL_FACTOR`].
fn label_overlap(
    entry: &IndexedEntry,
    token_set: &HashSet<&str>,
    phrase_set: &HashSet<String>,
) -> f32 {
    let label_tokens = &entry.label_tokens;
    if label_tokens.is_empty() {
        return 0.0;
    }

    let full_match = if label_tokens.len() == 1 {
        token_set.contains(label_tokens[0].as_str())
    } else {
        label_tokens.len() <= MAX_PHRASE_LEN && phrase_set.contains(&entry.label_phrase)
    };
    if full_match {
        return 1.0;
    }

    let hits = label_tokens
        .iter()
        .filter(|t| token_set.contains(t.as_str()))
        .count();
    (hits as f32 / label_tokens.len() as f32) * PARTIAL_LABEL_FACTOR
}

/// Body component in [0, 1]: fraction of unique body tokens present.
fn body_overlap(entry: &IndexedEntry, token_set: &HashSet<&str>) -> f32 {
    if entry.body_tokens.is_empty() {
        return 0.0;
    }

    let hits = entry
        .body_tokens
        .iter()
        .filter(|t| token_set.contains(t.as_str()))
        .count();
    hits as f32 / entry.body_tokens.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::TaxonomyEntry;

    fn sample_index() -> TaxonomyIndex {
        TaxonomyIndex::build(vec![
            TaxonomyEntry::new(1, "project management", "plan resources and steer projects"),
            TaxonomyEntry::new(2, "data analysis", "analyse datasets and report findings"),
            TaxonomyEntry::new(3, "sql", "query relational databases"),
        ])
        .unwrap()
    }

    #[test]
    fn test_full_label_match_clears_threshold() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let results = engine
            .extract("This course covers project management basics", 0.3)
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].taxonomy_id, 1);
        assert!(results[0].score >= 0.3);
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        assert!(engine.extract("", 0.1).unwrap().is_empty());
        assert!(engine.extract("the and of", 0.1).unwrap().is_empty());
    }

    #[test]
    fn test_no_overlap_yields_empty_result() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let results = engine.extract("medieval basket weaving techniques", 0.1).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_nul_byte_is_invalid_input() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let err = engine.extract("sql\0injection", 0.1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);
        let text = "Learn sql and data analysis: query relational databases, analyse datasets.";

        let first = engine.extract(text, 0.2).unwrap();
        let second = engine.extract(text, 0.2).unwrap();

        let pairs = |v: &[MatchCandidate]| {
            v.iter().map(|c| (c.taxonomy_id, c.score)).collect::<Vec<_>>()
        };
        assert_eq!(pairs(&first), pairs(&second));
        assert!(!first.is_empty());
    }

    #[test]
    fn test_ordering_and_tie_break() {
        // Identical labels score identically, so ordering falls back to id.
        let index = TaxonomyIndex::build(vec![
            TaxonomyEntry::new(5, "rust programming", ""),
            TaxonomyEntry::new(2, "rust programming", ""),
        ])
        .unwrap();
        let engine = MatchEngine::new(&index);

        let results = engine.extract("an introduction to rust programming", 0.1).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].taxonomy_id, 2);
        assert_eq!(results[1].taxonomy_id, 5);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_repetition_does_not_inflate_score() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let once = engine.extract("project management", 0.1).unwrap();
        let thrice = engine
            .extract("project management project management project management", 0.1)
            .unwrap();

        assert_eq!(once[0].score, thrice[0].score);
        assert!(once[0].score <= 1.0);
    }

    #[test]
    fn test_full_phrase_outscores_scattered_tokens() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let full = engine.extract("hands-on project management", 0.0).unwrap();
        let scattered = engine
            .extract("manage a project, learn time management", 0.0)
            .unwrap();

        let full_score = full.iter().find(|c| c.taxonomy_id == 1).unwrap().score;
        // "project" and "management" both present but never adjacent
        let scattered_score = scattered.iter().find(|c| c.taxonomy_id == 1).unwrap().score;
        assert!(full_score > scattered_score);
    }

    #[test]
    fn test_body_overlap_contributes() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);

        let label_only = engine.extract("data analysis", 0.0).unwrap();
        let label_and_body = engine
            .extract("data analysis: analyse datasets, report findings", 0.0)
            .unwrap();

        let score_of = |v: &[MatchCandidate]| v.iter().find(|c| c.taxonomy_id == 2).unwrap().score;
        assert!(score_of(&label_and_body) > score_of(&label_only));
        assert!(score_of(&label_and_body) <= 1.0);
    }

    #[test]
    fn test_threshold_discards_weak_candidates() {
        let index = sample_index();
        let engine = MatchEngine::new(&index);
        let text = "We briefly mention projects."; // weak partial overlap at best

        let strict = engine.extract(text, 0.5).unwrap();
        assert!(strict.is_empty());
    }
}
