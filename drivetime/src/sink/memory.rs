//! In-memory sink, for tests and dry runs.

use crate::row::ResultRow;

use super::error::SinkError;
use super::schema::PersistedSchema;
use super::{AppendOutcome, TabularSink};

/// Keeps appended rows in memory, fitted to the schema like a file would.
#[derive(Debug, Default)]
pub struct MemorySink {
    schema: Option<PersistedSchema>,
    rows: Vec<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows written so far, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The value of `column` in every row written so far.
    pub fn column(&self, column: &str) -> Vec<&str> {
        let Some(idx) = self
            .schema
            .as_ref()
            .and_then(|s| s.columns().iter().position(|c| c == column))
        else {
            return Vec::new();
        };
        self.rows.iter().map(|row| row[idx].as_str()).collect()
    }
}

impl TabularSink for MemorySink {
    fn schema(&self) -> Option<&PersistedSchema> {
        self.schema.as_ref()
    }

    fn append(&mut self, row: &ResultRow) -> Result<AppendOutcome, SinkError> {
        match &self.schema {
            Some(schema) => {
                let fitted = schema.reconcile(row);
                self.rows.push(fitted.values);
                Ok(AppendOutcome::Appended {
                    dropped: fitted.dropped,
                    missing: fitted.missing,
                })
            }
            None => {
                if row.is_empty() {
                    return Err(SinkError::EmptyRow);
                }
                let schema = PersistedSchema::from_row(row);
                let columns = schema.len();
                self.rows.push(row.iter().map(|(_, v)| v.to_string()).collect());
                self.schema = Some(schema);
                Ok(AppendOutcome::Created { columns })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::FieldValue;

    #[test]
    fn memory_sink_reconciles_like_a_file() {
        let mut sink = MemorySink::new();
        sink.append(
            &ResultRow::new()
                .with("route", FieldValue::Text("A_to_B".into()))
                .with("date", FieldValue::Text("2024-01-01".into())),
        )
        .unwrap();
        sink.append(
            &ResultRow::new()
                .with("route", FieldValue::Text("B_to_A".into()))
                .with("extra", FieldValue::Minutes(3)),
        )
        .unwrap();

        assert_eq!(sink.rows().len(), 2);
        assert_eq!(sink.column("route"), vec!["A_to_B", "B_to_A"]);
        assert_eq!(sink.column("date"), vec!["2024-01-01", ""]);
        assert!(sink.column("extra").is_empty());
    }
}
