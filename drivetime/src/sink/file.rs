//! CSV file sink.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::row::ResultRow;

use super::error::SinkError;
use super::schema::PersistedSchema;
use super::{AppendOutcome, TabularSink};

/// Default output file, in the current directory.
pub const DEFAULT_OUTPUT_PATH: &str = "traffic_table_results.csv";

/// Appends result rows to a CSV file with a header row.
///
/// The header of an existing file is the persisted schema. A missing or
/// empty file gets its header from the first row appended.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    schema: Option<PersistedSchema>,
}

impl CsvSink {
    /// Open a sink at `path`, reading the header if the file has one.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let schema = read_header(&path)?;
        if let Some(schema) = &schema {
            debug!(path = %path.display(), columns = schema.len(), "opened existing sink");
        }
        Ok(Self { path, schema })
    }

    fn create(&self, schema: &PersistedSchema, values: &[String]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(schema.columns())?;
        writer.write_record(values)?;
        writer.flush()?;
        Ok(())
    }

    fn append_record(&self, values: &[String]) -> Result<(), SinkError> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(values)?;
        writer.flush()?;
        Ok(())
    }
}

impl TabularSink for CsvSink {
    fn schema(&self) -> Option<&PersistedSchema> {
        self.schema.as_ref()
    }

    fn append(&mut self, row: &ResultRow) -> Result<AppendOutcome, SinkError> {
        match &self.schema {
            Some(schema) => {
                let fitted = schema.reconcile(row);
                self.append_record(&fitted.values)?;
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
                let values: Vec<String> = row.iter().map(|(_, v)| v.to_string()).collect();
                self.create(&schema, &values)?;
                debug!(path = %self.path.display(), columns = schema.len(), "created sink");
                let columns = schema.len();
                self.schema = Some(schema);
                Ok(AppendOutcome::Created { columns })
            }
        }
    }
}

/// Whether the file is empty or its last byte ends a line.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// The header row of an existing, non-empty file.
fn read_header(path: &Path) -> Result<Option<PersistedSchema>, SinkError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.iter().all(String::is_empty) {
        return Ok(None);
    }
    Ok(Some(PersistedSchema::new(columns)))
}
