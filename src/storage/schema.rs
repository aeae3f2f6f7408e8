//! Database schema definitions

/// SQL to create the courses table
pub const CREATE_COURSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL
)
"#;

/// SQL to create the competencies table
pub const CREATE_COMPETENCIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS competencies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL
)
"#;

/// SQL to create the relations table
///
/// The UNIQUE pair constraint is what makes relation-insert idempotent;
/// the edge set cannot hold duplicate pairs.
pub const CREATE_RELATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS relations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_id INTEGER NOT NULL REFERENCES courses(id),
    competency_id INTEGER NOT NULL REFERENCES competencies(id),
    UNIQUE(course_id, competency_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_relations_course ON relations(course_id)",
    "CREATE INDEX IF NOT EXISTS idx_relations_competency ON relations(competency_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_COURSES_TABLE,
        CREATE_COMPETENCIES_TABLE,
        CREATE_RELATIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
