//! Match Engine - deterministic lexical-overlap competency matching

pub mod engine;

pub use engine::{MatchCandidate, MatchEngine};
