//! Relation type - an edge in the course↔competency bipartite graph
//!
//! The `(course_id, competency_id)` pair is the identity of the edge: the
//! relation set never holds duplicate pairs, and re-inserting an existing
//! pair returns the stored edge instead of failing.

use serde::{Deserialize, Serialize};

/// An edge linking a course to a competency it teaches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Storage-assigned row id
    pub id: i64,
    /// Source course
    pub course_id: i64,
    /// Target competency
    pub competency_id: i64,
}

impl Relation {
    pub fn new(id: i64, course_id: i64, competency_id: i64) -> Self {
        Self {
            id,
            course_id,
            competency_id,
        }
    }

    /// The pair that identifies this edge
    pub fn pair(&self) -> (i64, i64) {
        (self.course_id, self.competency_id)
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.course_id == other.course_id && self.competency_id == other.competency_id
    }
}

impl Eq for Relation {}

impl std::hash::Hash for Relation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.course_id.hash(state);
        self.competency_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_identity() {
        // Row ids differ, pair is the same: one logical edge.
        let a = Relation::new(1, 10, 20);
        let b = Relation::new(2, 10, 20);
        let c = Relation::new(3, 10, 21);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Relation> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
