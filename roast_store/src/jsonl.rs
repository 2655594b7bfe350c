//! File-backed store: one JSON row per line, append-only.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use roast_traits::{BoxError, LogStore, RoastRecord, RoastSummary, StoredRoast};

use crate::error::StoreError;
use crate::row::Row;

/// Append-only roast log in a JSONL file. Every call reopens the file, so
/// several short-lived commands can share one log without coordination.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Open (or lazily create on first append) the log at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed rows in file order. Lines that fail to parse are skipped with
    /// a warning; a missing file reads as empty.
    fn read_rows(&self) -> Result<Vec<Row>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut rows = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Row>(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(lineno, error = %e, "skipping unreadable log line");
                }
            }
        }
        Ok(rows)
    }
}

impl LogStore for JsonlStore {
    fn append(&mut self, record: &RoastRecord) -> Result<(), BoxError> {
        let row = Row::from_record(record).map_err(StoreError::from)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StoreError::from)?;
        let line = serde_json::to_string(&row).map_err(StoreError::from)?;
        writeln!(file, "{line}").map_err(StoreError::from)?;
        tracing::debug!(path = %self.path.display(), title = %record.title, "row appended");
        Ok(())
    }

    fn list(&self) -> Result<Vec<RoastSummary>, BoxError> {
        let rows = self.read_rows()?;
        Ok(rows
            .iter()
            .enumerate()
            .map(|(id, row)| row.summary(id))
            .collect())
    }

    fn get(&self, id: usize) -> Result<Option<StoredRoast>, BoxError> {
        let rows = self.read_rows()?;
        Ok(rows.get(id).map(|row| row.stored(id)))
    }
}
