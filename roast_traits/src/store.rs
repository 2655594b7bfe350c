use serde::{Deserialize, Serialize};

use crate::types::{DataPoint, RoastEvent};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One finished session as handed to the log store for persistence.
///
/// The layout mirrors the backend row: scalar columns plus the full
/// point/event payload, which backends typically flatten to a single
/// JSON-string column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRecord {
    /// ISO-8601 date string of the session start.
    pub date: String,
    pub title: String,
    /// Green bean weight in grams.
    pub weight: f64,
    /// Total roast duration in seconds.
    pub duration: u32,
    /// Development time ratio at save, percent.
    pub dtr: f64,
    pub data_points: Vec<DataPoint>,
    pub events: Vec<RoastEvent>,
}

/// Row summary returned by `LogStore::list`. `id` is the 0-based position
/// among data rows and is the key accepted by `LogStore::get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastSummary {
    pub id: usize,
    pub date: String,
    pub title: String,
    pub weight: f64,
    pub duration: u32,
    pub dtr: f64,
}

/// Full row fetched by id. A backend that fails to parse the embedded
/// payload returns empty `data_points`/`events` instead of an error; callers
/// treat that as "no reference available".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRoast {
    pub id: usize,
    pub date: String,
    pub title: String,
    pub data_points: Vec<DataPoint>,
    pub events: Vec<RoastEvent>,
}

/// Spreadsheet-like append-only roast log backend.
pub trait LogStore {
    /// Persist one finished session as a single row.
    fn append(&mut self, record: &RoastRecord) -> Result<(), BoxError>;
    /// Ordered summaries of all stored rows.
    fn list(&self) -> Result<Vec<RoastSummary>, BoxError>;
    /// Fetch one row by 0-based id; `None` when out of range.
    fn get(&self, id: usize) -> Result<Option<StoredRoast>, BoxError>;
}

/// Bean stock deduction service, invoked once at session end.
pub trait Inventory {
    /// Deduct `kilograms` from the stock of the identified bean.
    fn deduct(&mut self, bean_id: &str, kilograms: f64) -> Result<(), BoxError>;
}
