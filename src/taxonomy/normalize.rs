//! Text normalization - the one tokenizer used everywhere
//!
//! Index construction and match extraction must agree on what a token is,
//! otherwise matching stops being reproducible. The rules:
//! - lower-case
//! - split on anything that is not a letter, digit or hyphen
//! - strip leading/trailing hyphens, keep inner ones ("e-learning")
//! - drop purely numeric tokens
//! - drop stop-words
//!
//! Same input text always yields the same token sequence.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Longest phrase (in tokens) the index and matcher consider.
///
/// ESCO labels are short; four tokens covers labels like
/// "manage quality control systems".
pub const MAX_PHRASE_LEN: usize = 4;

static TOKEN_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}-]+").expect("token split regex is valid"));

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

/// Common English function words, excluded from tokens.
///
/// Kept deliberately small: over-aggressive stop-word removal eats parts
/// of skill labels ("of" in "internet of things" is already gone here,
/// which is fine because it is gone on both sides of the match).
const STOPWORD_LIST: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "before", "but", "by", "can", "could", "do", "does", "during", "each", "for", "from", "had",
    "has", "have", "how", "if", "in", "into", "is", "it", "its", "may", "more", "most", "no",
    "not", "of", "on", "or", "other", "our", "out", "over", "per", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "under", "up", "use", "used", "using", "was", "we", "well", "were", "what",
    "when", "where", "which", "while", "who", "will", "with", "within", "would", "you", "your",
];

/// Normalize raw text into its token sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    TOKEN_SPLIT
        .split(&lowered)
        .map(|t| t.trim_matches('-'))
        .filter(|t| !t.is_empty())
        .filter(|t| !t.chars().all(|c| c.is_numeric()))
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Join a token window back into a phrase key.
pub fn phrase(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// All phrases (n-grams of length 2..=`max_len`) over a token sequence.
///
/// Single tokens are handled by the token index, so they are not repeated
/// here.
pub fn ngrams(tokens: &[String], max_len: usize) -> Vec<String> {
    let mut phrases = Vec::new();
    for n in 2..=max_len {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            phrases.push(phrase(window));
        }
    }
    phrases
}
