//! Persisting result rows.
//!
//! A sink is an append-only table. Its columns are fixed by the first row
//! ever written; every later row is fitted to those columns, dropping
//! unknown keys and leaving absent columns empty.

mod error;
mod file;
mod memory;
mod schema;

pub use error::SinkError;
pub use file::{CsvSink, DEFAULT_OUTPUT_PATH};
pub use memory::MemorySink;
pub use schema::{PersistedSchema, Reconciled};

use crate::row::ResultRow;

/// What an append did to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The row was the first one and fixed the schema.
    Created { columns: usize },
    /// The row was fitted to the existing schema.
    Appended {
        dropped: Vec<String>,
        missing: Vec<String>,
    },
}

/// An append-only table of result rows.
pub trait TabularSink {
    /// The persisted schema, once the first row has been written.
    fn schema(&self) -> Option<&PersistedSchema>;

    /// Append one row, establishing the schema if there is none yet.
    fn append(&mut self, row: &ResultRow) -> Result<AppendOutcome, SinkError>;
}
