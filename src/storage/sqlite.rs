//! SQLite relation store implementation

use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde::{Deserialize, Serialize};

use super::schema;
use crate::record::{Competency, Course};
use crate::relation::Relation;
use crate::taxonomy::TaxonomyEntry;
use crate::{Error, Result};

/// Duplicate-name policy for record creation.
///
/// One store operation, two call sites: the explicit API creates strictly,
/// extraction reuses an existing row with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Fail with [`Error::DuplicateName`] if the name exists
    Fail,
    /// Return the existing row if the name exists
    Reuse,
}

/// SQLite-backed store for the course↔competency relation graph.
///
/// The only mutable shared resource in the engine; every write runs inside
/// a transaction so readers never observe a course without its relations.
pub struct RelationStore {
    conn: Connection,
}

impl RelationStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Course Operations ==========

    /// Create a course with a unique name.
    ///
    /// Fails with [`Error::DuplicateName`] if the name is taken; the
    /// uniqueness constraint decides, so concurrent duplicate creates
    /// cannot both win.
    pub fn add_course(&mut self, name: &str, body: &str) -> Result<Course> {
        let tx = self.conn.transaction()?;
        let course = Self::insert_course_tx(&tx, name, body, OnConflict::Fail)?;
        tx.commit()?;
        Ok(course)
    }

    /// Get a course by id
    pub fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.conn
            .query_row(
                "SELECT id, name, body FROM courses WHERE id = ?1",
                [id],
                Self::row_to_course,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a course by name
    pub fn course_by_name(&self, name: &str) -> Result<Option<Course>> {
        self.conn
            .query_row(
                "SELECT id, name, body FROM courses WHERE name = ?1",
                [name.trim()],
                Self::row_to_course,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All courses, ascending id
    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, body FROM courses ORDER BY id")?;

        let courses = stmt
            .query_map([], Self::row_to_course)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(courses)
    }

    /// Courses related to a competency, ascending id.
    ///
    /// Fails with [`Error::NotFound`] if the competency id is unknown;
    /// a known id with no relations returns an empty list.
    pub fn courses_by_competency(&self, competency_id: i64) -> Result<Vec<Course>> {
        if !self.competency_exists(competency_id)? {
            return Err(Error::NotFound(format!("competency id {competency_id}")));
        }

        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, c.body FROM courses c
             JOIN relations r ON r.course_id = c.id
             WHERE r.competency_id = ?1 ORDER BY c.id",
        )?;

        let courses = stmt
            .query_map([competency_id], Self::row_to_course)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(courses)
    }

    /// Count all courses
    pub fn count_courses(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Competency Operations ==========

    /// Create a competency, with the duplicate policy made explicit.
    pub fn add_competency(
        &mut self,
        name: &str,
        body: &str,
        on_conflict: OnConflict,
    ) -> Result<Competency> {
        let tx = self.conn.transaction()?;
        let competency = Self::insert_competency_tx(&tx, name, body, on_conflict)?;
        tx.commit()?;
        Ok(competency)
    }

    /// Get a competency by id
    pub fn get_competency(&self, id: i64) -> Result<Option<Competency>> {
        self.conn
            .query_row(
                "SELECT id, name, body FROM competencies WHERE id = ?1",
                [id],
                Self::row_to_competency,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a competency by name
    pub fn competency_by_name(&self, name: &str) -> Result<Option<Competency>> {
        self.conn
            .query_row(
                "SELECT id, name, body FROM competencies WHERE name = ?1",
                [name.trim()],
                Self::row_to_competency,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All competencies, ascending id
    pub fn list_competencies(&self) -> Result<Vec<Competency>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, body FROM competencies ORDER BY id")?;

        let competencies = stmt
            .query_map([], Self::row_to_competency)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(competencies)
    }

    /// Competencies related to a course, ascending id (reverse lookup)
    pub fn competencies_by_course(&self, course_id: i64) -> Result<Vec<Competency>> {
        if !self.course_exists(course_id)? {
            return Err(Error::NotFound(format!("course id {course_id}")));
        }

        let mut stmt = self.conn.prepare(
            "SELECT k.id, k.name, k.body FROM competencies k
             JOIN relations r ON r.competency_id = k.id
             WHERE r.course_id = ?1 ORDER BY k.id",
        )?;

        let competencies = stmt
            .query_map([course_id], Self::row_to_competency)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(competencies)
    }

    /// Count all competencies
    pub fn count_competencies(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM competencies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Bulk-load taxonomy entries as competency rows with their
    /// pre-assigned ESCO ids.
    ///
    /// Get-or-create per entry: existing names are kept, except that an
    /// empty body is enriched from the catalog. Returns the number of rows
    /// created. Safe to re-run after a catalog refresh.
    pub fn import_taxonomy(&mut self, entries: &[TaxonomyEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut created = 0;

        for entry in entries {
            let existing: Option<(i64, String)> = tx
                .query_row(
                    "SELECT id, body FROM competencies WHERE name = ?1",
                    [entry.label.trim()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match existing {
                None => {
                    tx.execute(
                        "INSERT INTO competencies (id, name, body) VALUES (?1, ?2, ?3)",
                        params![entry.id, entry.label.trim(), entry.body],
                    )?;
                    created += 1;
                }
                Some((id, body)) if body.is_empty() && !entry.body.is_empty() => {
                    tx.execute(
                        "UPDATE competencies SET body = ?1 WHERE id = ?2",
                        params![entry.body, id],
                    )?;
                }
                Some(_) => {}
            }
        }

        tx.commit()?;
        tracing::info!("Imported taxonomy: {} competencies created", created);
        Ok(created)
    }

    // ========== Relation Operations ==========

    /// Insert a relation edge; idempotent on the pair.
    ///
    /// Fails with [`Error::MissingReference`] if either endpoint does not
    /// exist. Re-adding an existing pair returns the stored relation.
    pub fn add_relation(&mut self, course_id: i64, competency_id: i64) -> Result<Relation> {
        let tx = self.conn.transaction()?;
        let relation = Self::insert_relation_tx(&tx, course_id, competency_id)?;
        tx.commit()?;
        Ok(relation)
    }

    /// All relations, ascending id
    pub fn list_relations(&self) -> Result<Vec<Relation>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, course_id, competency_id FROM relations ORDER BY id")?;

        let relations = stmt
            .query_map([], Self::row_to_relation)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(relations)
    }

    /// Count all relations
    pub fn count_relations(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM relations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Composite Operations ==========

    /// Persist a course and its extracted competencies as one atomic unit.
    ///
    /// `competencies` are `(name, body)` pairs resolved from the taxonomy;
    /// missing rows are created, existing ones reused, and every relation
    /// insert is idempotent. Either all effects commit or none are visible
    /// to readers.
    pub fn persist_extraction(
        &mut self,
        course_name: &str,
        course_body: &str,
        competencies: &[(String, String)],
    ) -> Result<(Course, Vec<Relation>)> {
        let tx = self.conn.transaction()?;

        let course = Self::insert_course_tx(&tx, course_name, course_body, OnConflict::Fail)?;

        let mut relations = Vec::new();
        let mut seen = HashSet::new();
        for (name, body) in competencies {
            let competency = Self::insert_competency_tx(&tx, name, body, OnConflict::Reuse)?;
            let relation = Self::insert_relation_tx(&tx, course.id, competency.id)?;
            // Distinct taxonomy entries can share a label and land on the
            // same row; report each edge once.
            if seen.insert(relation.pair()) {
                relations.push(relation);
            }
        }

        tx.commit()?;
        Ok((course, relations))
    }

    /// Explicit relation add, creating course and competency if absent.
    pub fn link_by_name(
        &mut self,
        course_name: &str,
        course_body: &str,
        competency_name: &str,
        competency_body: &str,
    ) -> Result<Relation> {
        let tx = self.conn.transaction()?;

        let course = Self::insert_course_tx(&tx, course_name, course_body, OnConflict::Reuse)?;
        let competency =
            Self::insert_competency_tx(&tx, competency_name, competency_body, OnConflict::Reuse)?;
        let relation = Self::insert_relation_tx(&tx, course.id, competency.id)?;

        tx.commit()?;
        Ok(relation)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            courses: self.count_courses()?,
            competencies: self.count_competencies()?,
            relations: self.count_relations()?,
        })
    }

    // ========== Transaction Helpers ==========

    fn insert_course_tx(
        tx: &Transaction,
        name: &str,
        body: &str,
        on_conflict: OnConflict,
    ) -> Result<Course> {
        let name = valid_name(name, "course")?;

        if on_conflict == OnConflict::Reuse {
            let existing = tx
                .query_row(
                    "SELECT id, name, body FROM courses WHERE name = ?1",
                    [name],
                    Self::row_to_course,
                )
                .optional()?;
            if let Some(course) = existing {
                return Ok(course);
            }
        }

        tx.execute(
            "INSERT INTO courses (name, body) VALUES (?1, ?2)",
            params![name, body],
        )
        .map_err(|e| map_unique_violation(e, "course", name))?;

        Ok(Course::new(tx.last_insert_rowid(), name, body))
    }

    fn insert_competency_tx(
        tx: &Transaction,
        name: &str,
        body: &str,
        on_conflict: OnConflict,
    ) -> Result<Competency> {
        let name = valid_name(name, "competency")?;

        if on_conflict == OnConflict::Reuse {
            let existing = tx
                .query_row(
                    "SELECT id, name, body FROM competencies WHERE name = ?1",
                    [name],
                    Self::row_to_competency,
                )
                .optional()?;
            if let Some(competency) = existing {
                return Ok(competency);
            }
        }

        tx.execute(
            "INSERT INTO competencies (name, body) VALUES (?1, ?2)",
            params![name, body],
        )
        .map_err(|e| map_unique_violation(e, "competency", name))?;

        Ok(Competency::new(tx.last_insert_rowid(), name, body))
    }

    fn insert_relation_tx(tx: &Transaction, course_id: i64, competency_id: i64) -> Result<Relation> {
        let course_known: Option<i64> = tx
            .query_row("SELECT id FROM courses WHERE id = ?1", [course_id], |row| {
                row.get(0)
            })
            .optional()?;
        if course_known.is_none() {
            return Err(Error::MissingReference(format!("course id {course_id}")));
        }

        let competency_known: Option<i64> = tx
            .query_row(
                "SELECT id FROM competencies WHERE id = ?1",
                [competency_id],
                |row| row.get(0),
            )
            .optional()?;
        if competency_known.is_none() {
            return Err(Error::MissingReference(format!(
                "competency id {competency_id}"
            )));
        }

        tx.execute(
            "INSERT OR IGNORE INTO relations (course_id, competency_id) VALUES (?1, ?2)",
            params![course_id, competency_id],
        )?;

        tx.query_row(
            "SELECT id, course_id, competency_id FROM relations
             WHERE course_id = ?1 AND competency_id = ?2",
            params![course_id, competency_id],
            Self::row_to_relation,
        )
        .map_err(Into::into)
    }

    fn course_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM courses WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn competency_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM competencies WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    // ========== Row Mappers ==========

    fn row_to_course(row: &rusqlite::Row) -> rusqlite::Result<Course> {
        Ok(Course {
            id: row.get(0)?,
            name: row.get(1)?,
            body: row.get(2)?,
        })
    }

    fn row_to_competency(row: &rusqlite::Row) -> rusqlite::Result<Competency> {
        Ok(Competency {
            id: row.get(0)?,
            name: row.get(1)?,
            body: row.get(2)?,
        })
    }

    fn row_to_relation(row: &rusqlite::Row) -> rusqlite::Result<Relation> {
        Ok(Relation {
            id: row.get(0)?,
            course_id: row.get(1)?,
            competency_id: row.get(2)?,
        })
    }
}

/// Trimmed, non-empty record name
fn valid_name<'a>(name: &'a str, what: &str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(format!("{what} name is empty")));
    }
    if name.contains('\0') {
        return Err(Error::InvalidInput(format!("{what} name contains a NUL byte")));
    }
    Ok(name)
}

fn map_unique_violation(err: rusqlite::Error, what: &str, name: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::DuplicateName(format!("{what} '{name}' already exists"))
        }
        _ => Error::Storage(err),
    }
}

/// Failures worth one retry: another writer held the database.
pub(crate) fn is_transient(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.code == rusqlite::ErrorCode::DatabaseBusy
            || e.code == rusqlite::ErrorCode::DatabaseLocked)
}

/// Table counts
#[derive(Debug, Serialize, Deserialize)]
pub struct DbStats {
    pub courses: usize,
    pub competencies: usize,
    pub relations: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Courses: {}\nCompetencies: {}\nRelations: {}",
            self.courses, self.competencies, self.relations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_course_rejects_duplicate_name() {
        let mut store = RelationStore::open_in_memory().unwrap();

        store.add_course("intro-cs", "Introduction to computer science.").unwrap();
        let err = store.add_course("intro-cs", "Different body.").unwrap_err();

        assert!(matches!(err, Error::DuplicateName(_)));
        assert_eq!(store.list_courses().unwrap().len(), 1);
    }

    #[test]
    fn test_add_course_rejects_empty_name() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let err = store.add_course("   ", "body").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_add_competency_conflict_policies() {
        let mut store = RelationStore::open_in_memory().unwrap();

        let first = store
            .add_competency("project management", "steer projects", OnConflict::Fail)
            .unwrap();

        // Strict create fails on the taken name
        let err = store
            .add_competency("project management", "", OnConflict::Fail)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));

        // Get-or-create returns the existing row untouched
        let reused = store
            .add_competency("project management", "other body", OnConflict::Reuse)
            .unwrap();
        assert_eq!(reused.id, first.id);
        assert_eq!(reused.body, "steer projects");
        assert_eq!(store.count_competencies().unwrap(), 1);
    }

    #[test]
    fn test_add_relation_is_idempotent() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let course = store.add_course("data101", "data course").unwrap();
        let competency = store
            .add_competency("data analysis", "", OnConflict::Fail)
            .unwrap();

        let first = store.add_relation(course.id, competency.id).unwrap();
        let second = store.add_relation(course.id, competency.id).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.count_relations().unwrap(), 1);
    }

    #[test]
    fn test_add_relation_requires_both_endpoints() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let course = store.add_course("data101", "").unwrap();
        let competency = store.add_competency("sql", "", OnConflict::Fail).unwrap();

        let err = store.add_relation(999, competency.id).unwrap_err();
        assert!(matches!(err, Error::MissingReference(_)));

        let err = store.add_relation(course.id, 999).unwrap_err();
        assert!(matches!(err, Error::MissingReference(_)));

        assert_eq!(store.count_relations().unwrap(), 0);
    }

    #[test]
    fn test_bidirectional_lookups() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let a = store.add_course("data101", "").unwrap();
        let b = store.add_course("stats201", "").unwrap();
        let k = store.add_competency("statistics", "", OnConflict::Fail).unwrap();

        store.add_relation(b.id, k.id).unwrap();
        store.add_relation(a.id, k.id).unwrap();

        // Visible from both directions, ascending id regardless of insert order
        let courses = store.courses_by_competency(k.id).unwrap();
        assert_eq!(courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        let competencies = store.competencies_by_course(a.id).unwrap();
        assert_eq!(competencies.len(), 1);
        assert_eq!(competencies[0].id, k.id);
    }

    #[test]
    fn test_lookup_with_unknown_filter_id() {
        let mut store = RelationStore::open_in_memory().unwrap();
        store.add_course("data101", "").unwrap();

        let err = store.competencies_by_course(424242).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = store.courses_by_competency(424242).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_known_id_with_no_relations_is_empty_not_error() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let course = store.add_course("data101", "").unwrap();

        assert!(store.competencies_by_course(course.id).unwrap().is_empty());
    }

    #[test]
    fn test_referential_integrity_after_mutations() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let course = store.add_course("data101", "").unwrap();
        let k1 = store.add_competency("sql", "", OnConflict::Fail).unwrap();
        let k2 = store.add_competency("statistics", "", OnConflict::Fail).unwrap();
        store.add_relation(course.id, k1.id).unwrap();
        store.add_relation(course.id, k2.id).unwrap();

        for relation in store.list_relations().unwrap() {
            assert!(store.get_course(relation.course_id).unwrap().is_some());
            assert!(store.get_competency(relation.competency_id).unwrap().is_some());
        }
    }

    #[test]
    fn test_import_taxonomy_with_preassigned_ids() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let entries = vec![
            TaxonomyEntry::new(101, "project management", "steer projects"),
            TaxonomyEntry::new(102, "data analysis", "analyse datasets"),
        ];

        let created = store.import_taxonomy(&entries).unwrap();
        assert_eq!(created, 2);
        assert_eq!(store.get_competency(101).unwrap().unwrap().name, "project management");

        // Re-import is a no-op
        let created = store.import_taxonomy(&entries).unwrap();
        assert_eq!(created, 0);
        assert_eq!(store.count_competencies().unwrap(), 2);
    }

    #[test]
    fn test_import_taxonomy_enriches_empty_body() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let lazy = store
            .add_competency("project management", "", OnConflict::Reuse)
            .unwrap();

        let created = store
            .import_taxonomy(&[TaxonomyEntry::new(101, "project management", "steer projects")])
            .unwrap();

        assert_eq!(created, 0);
        let enriched = store.get_competency(lazy.id).unwrap().unwrap();
        assert_eq!(enriched.body, "steer projects");
    }

    #[test]
    fn test_persist_extraction_atomic_success() {
        let mut store = RelationStore::open_in_memory().unwrap();
        let existing = store
            .add_competency("sql", "query databases", OnConflict::Fail)
            .unwrap();

        let resolved = vec![
            ("sql".to_string(), "query databases".to_string()),
            ("data analysis".to_string(), "analyse datasets".to_string()),
        ];
        let (course, relations) = store
            .persist_extraction("data101", "sql and data analysis", &resolved)
            .unwrap();

        assert_eq!(relations.len(), 2);
        assert_eq!(store.count_competencies().unwrap(), 2);
        // The pre-existing competency row was reused, not duplicated
        assert!(relations.iter().any(|r| r.competency_id == existing.id));
        assert_eq!(store.competencies_by_course(course.id).unwrap().len(), 2);
    }

    #[test]
    fn test_persist_extraction_rolls_back_on_duplicate_course() {
        let mut store = RelationStore::open_in_memory().unwrap();
        store.add_course("data101", "").unwrap();

        let resolved = vec![("brand new skill".to_string(), String::new())];
        let err = store.persist_extraction("data101", "body", &resolved).unwrap_err();

        assert!(matches!(err, Error::DuplicateName(_)));
        // Nothing from the failed attempt is visible
        assert_eq!(store.count_competencies().unwrap(), 0);
        assert_eq!(store.count_relations().unwrap(), 0);
    }

    #[test]
    fn test_persist_extraction_dedupes_shared_labels() {
        let mut store = RelationStore::open_in_memory().unwrap();

        // Two taxonomy entries resolving to the same label produce one edge
        let resolved = vec![
            ("sql".to_string(), String::new()),
            ("sql".to_string(), String::new()),
        ];
        let (_, relations) = store.persist_extraction("data101", "", &resolved).unwrap();

        assert_eq!(relations.len(), 1);
        assert_eq!(store.count_relations().unwrap(), 1);
    }

    #[test]
    fn test_link_by_name_creates_missing_records() {
        let mut store = RelationStore::open_in_memory().unwrap();

        let relation = store
            .link_by_name("data101", "a data course", "statistics", "describe data")
            .unwrap();

        let course = store.get_course(relation.course_id).unwrap().unwrap();
        let competency = store.get_competency(relation.competency_id).unwrap().unwrap();
        assert_eq!(course.name, "data101");
        assert_eq!(competency.name, "statistics");

        // Linking again reuses everything
        let again = store
            .link_by_name("data101", "ignored", "statistics", "ignored")
            .unwrap();
        assert_eq!(again.id, relation.id);
        assert_eq!(store.stats().unwrap().relations, 1);
    }

    #[test]
    fn test_uniqueness_holds_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("shared.db");

        // Two writers on the same database: the constraint, not any
        // in-process check, decides who wins.
        let mut first = RelationStore::open(&db_path).unwrap();
        let mut second = RelationStore::open(&db_path).unwrap();

        first.add_course("intro-cs", "").unwrap();
        let err = second.add_course("intro-cs", "").unwrap_err();

        assert!(matches!(err, Error::DuplicateName(_)));
        assert_eq!(second.list_courses().unwrap().len(), 1);
    }

    #[test]
    fn test_reopen_preserves_data() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("skillgraph.db");

        {
            let mut store = RelationStore::open(&db_path).unwrap();
            store.add_course("data101", "persisted").unwrap();
        }

        let store = RelationStore::open(&db_path).unwrap();
        let courses = store.list_courses().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "data101");
    }
}
