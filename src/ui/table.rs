use tabled::{Table, Tabled, settings::Style};

use crate::storage::DbStats;

/// Longest body preview shown in a table cell
const BODY_PREVIEW_LEN: usize = 60;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Body")]
    body: String,
}

/// Render `(id, name, body)` records as a table, bodies truncated to a
/// preview.
pub fn record_table<'a>(records: impl IntoIterator<Item = (i64, &'a str, &'a str)>) -> String {
    let rows: Vec<RecordRow> = records
        .into_iter()
        .map(|(id, name, body)| RecordRow {
            id,
            name: name.to_string(),
            body: preview(body),
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }

    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &DbStats) -> String {
    #[derive(Tabled)]
    struct StatRow {
        #[tabled(rename = "Table")]
        table: &'static str,
        #[tabled(rename = "Rows")]
        rows: usize,
    }

    let rows = vec![
        StatRow { table: "courses", rows: stats.courses },
        StatRow { table: "competencies", rows: stats.competencies },
        StatRow { table: "relations", rows: stats.relations },
    ];

    Table::new(&rows).with(Style::rounded()).to_string()
}

fn preview(body: &str) -> String {
    let flat = body.replace('\n', " ");
    if flat.chars().count() <= BODY_PREVIEW_LEN {
        return flat;
    }
    let truncated: String = flat.chars().take(BODY_PREVIEW_LEN).collect();
    format!("{truncated}...")
}
