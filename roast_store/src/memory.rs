//! In-process store backend, used by tests and replays.

use roast_traits::{BoxError, LogStore, RoastRecord, RoastSummary, StoredRoast};

use crate::row::Row;

/// Volatile `LogStore` holding rows in a `Vec`. Ids are row positions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Row>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a raw row, payload column included. Test hook for exercising
    /// the corrupt-payload path.
    pub fn push_raw(&mut self, date: &str, title: &str, data: &str) {
        self.rows.push(Row {
            date: date.to_owned(),
            title: title.to_owned(),
            weight: 0.0,
            duration: 0,
            dtr: 0.0,
            data: data.to_owned(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl LogStore for MemoryStore {
    fn append(&mut self, record: &RoastRecord) -> Result<(), BoxError> {
        let row = Row::from_record(record)?;
        self.rows.push(row);
        Ok(())
    }

    fn list(&self) -> Result<Vec<RoastSummary>, BoxError> {
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(id, row)| row.summary(id))
            .collect())
    }

    fn get(&self, id: usize) -> Result<Option<StoredRoast>, BoxError> {
        Ok(self.rows.get(id).map(|row| row.stored(id)))
    }
}
