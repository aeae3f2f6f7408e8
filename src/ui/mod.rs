//! Terminal output for the CLI list and stat commands

pub mod table;

pub use table::{record_table, stats_table};
