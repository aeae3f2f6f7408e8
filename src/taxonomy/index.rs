//! Inverted index over the taxonomy catalog
//!
//! Maps normalized tokens and phrases (n-grams up to
//! [`normalize::MAX_PHRASE_LEN`]) to the entries whose label or body
//! contains them. Built once, read-only afterwards; concurrent readers
//! share it without locking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::catalog::TaxonomyEntry;
use super::normalize::{self, MAX_PHRASE_LEN};
use crate::{Error, Result};

/// An entry plus its precomputed normalized forms.
///
/// The match engine scores against these instead of re-tokenizing the
/// catalog on every request.
#[derive(Debug)]
pub(crate) struct IndexedEntry {
    pub(crate) entry: TaxonomyEntry,
    /// Normalized label token sequence
    pub(crate) label_tokens: Vec<String>,
    /// Full label as a phrase key ("project management")
    pub(crate) label_phrase: String,
    /// Unique normalized body tokens
    pub(crate) body_tokens: BTreeSet<String>,
}

/// Searchable snapshot of the ESCO competency catalog.
#[derive(Debug, Default)]
pub struct TaxonomyIndex {
    /// id → entry, ordered so iteration is deterministic
    entries: BTreeMap<i64, IndexedEntry>,
    /// token → ids of entries whose label or body contains it
    tokens: HashMap<String, BTreeSet<i64>>,
    /// phrase → ids of entries whose label or body contains it
    phrases: HashMap<String, BTreeSet<i64>>,
}

impl TaxonomyIndex {
    /// Build an index from a catalog.
    ///
    /// Fails with [`Error::TaxonomyLoad`] if the catalog is empty or
    /// contains duplicate ids. The returned index is immutable; to refresh
    /// the taxonomy, build a new one and swap it in.
    pub fn build(catalog: Vec<TaxonomyEntry>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::TaxonomyLoad("catalog is empty".to_string()));
        }

        let mut index = TaxonomyIndex::default();

        for entry in catalog {
            if index.entries.contains_key(&entry.id) {
                return Err(Error::TaxonomyLoad(format!(
                    "duplicate taxonomy id {}",
                    entry.id
                )));
            }

            let label_tokens = normalize::tokenize(&entry.label);
            let body_token_seq = normalize::tokenize(&entry.body);

            for token in label_tokens.iter().chain(body_token_seq.iter()) {
                index.tokens.entry(token.clone()).or_default().insert(entry.id);
            }
            for phrase in normalize::ngrams(&label_tokens, MAX_PHRASE_LEN)
                .into_iter()
                .chain(normalize::ngrams(&body_token_seq, MAX_PHRASE_LEN))
            {
                index.phrases.entry(phrase).or_default().insert(entry.id);
            }

            let indexed = IndexedEntry {
                label_phrase: normalize::phrase(&label_tokens),
                label_tokens,
                body_tokens: body_token_seq.into_iter().collect(),
                entry,
            };
            index.entries.insert(indexed.entry.id, indexed);
        }

        tracing::info!("Built taxonomy index over {} entries", index.entries.len());
        Ok(index)
    }

    /// Number of entries in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a taxonomy id to its entry
    pub fn get(&self, id: i64) -> Option<&TaxonomyEntry> {
        self.entries.get(&id).map(|e| &e.entry)
    }

    /// All entries, ascending id
    pub fn entries(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.entries.values().map(|e| &e.entry)
    }

    /// Entries whose label or body contains the given token.
    ///
    /// The argument is normalized with the same rules as everything else,
    /// so `lookup_token("Management,")` behaves like `"management"`.
    pub fn lookup_token(&self, token: &str) -> Vec<&TaxonomyEntry> {
        let normalized = normalize::tokenize(token);
        let Some(key) = normalized.first() else {
            return Vec::new();
        };
        self.ids_to_entries(self.tokens.get(key))
    }

    /// Entries whose label or body contains the given phrase.
    pub fn lookup_phrase(&self, phrase: &str) -> Vec<&TaxonomyEntry> {
        let tokens = normalize::tokenize(phrase);
        match tokens.len() {
            0 => Vec::new(),
            1 => self.lookup_token(&tokens[0]),
            _ => self.ids_to_entries(self.phrases.get(&normalize::phrase(&tokens))),
        }
    }

    pub(crate) fn indexed_entries(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.entries.values()
    }

    fn ids_to_entries(&self, ids: Option<&BTreeSet<i64>>) -> Vec<&TaxonomyEntry> {
        ids.map(|set| {
            set.iter()
                .filter_map(|id| self.entries.get(id))
                .map(|e| &e.entry)
                .collect()
        })
        .unwrap_or_default()
    }
}
