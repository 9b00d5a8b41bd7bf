//! The column schema fixed by the first row written to a sink.

use tracing::info;

use crate::row::ResultRow;

/// Ordered column names of a sink.
///
/// Set once by the first row written and never widened: later rows are
/// fitted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSchema {
    columns: Vec<String>,
}

/// A row fitted to a [`PersistedSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// One value per schema column, in schema order.
    pub values: Vec<String>,
    /// Row keys that are not schema columns, in row order.
    pub dropped: Vec<String>,
    /// Schema columns the row had no value for.
    pub missing: Vec<String>,
}

impl PersistedSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// The schema a row establishes when it is the first one written.
    pub fn from_row(row: &ResultRow) -> Self {
        Self::new(row.keys().map(String::from).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fit a row to this schema.
    ///
    /// Keys the schema does not know are dropped; schema columns absent
    /// from the row are written as empty text.
    pub fn reconcile(&self, row: &ResultRow) -> Reconciled {
        let mut missing = Vec::new();
        let values = self
            .columns
            .iter()
            .map(|column| match row.get(column) {
                Some(value) => value.to_string(),
                None => {
                    missing.push(column.clone());
                    String::new()
                }
            })
            .collect();

        let dropped: Vec<String> = row
            .keys()
            .filter(|key| !self.columns.iter().any(|c| c == *key))
            .map(String::from)
            .collect();

        if !dropped.is_empty() {
            info!(columns = ?dropped, "dropping columns not in persisted schema");
        }

        Reconciled {
            values,
            dropped,
            missing,
        }
    }
}
