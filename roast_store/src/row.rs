//! Flat row layout shared by the store backends.

use serde::{Deserialize, Serialize};

use roast_traits::{DataPoint, RoastEvent, RoastRecord, RoastSummary, StoredRoast};

/// One persisted row: scalar columns plus the point/event payload flattened
/// to a JSON string, mirroring a spreadsheet cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub date: String,
    pub title: String,
    pub weight: f64,
    pub duration: u32,
    pub dtr: f64,
    /// JSON-encoded [`Payload`].
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub data_points: Vec<DataPoint>,
    pub events: Vec<RoastEvent>,
}

impl Row {
    pub fn from_record(record: &RoastRecord) -> Result<Self, serde_json::Error> {
        let payload = Payload {
            data_points: record.data_points.clone(),
            events: record.events.clone(),
        };
        Ok(Self {
            date: record.date.clone(),
            title: record.title.clone(),
            weight: record.weight,
            duration: record.duration,
            dtr: record.dtr,
            data: serde_json::to_string(&payload)?,
        })
    }

    pub fn summary(&self, id: usize) -> RoastSummary {
        RoastSummary {
            id,
            date: self.date.clone(),
            title: self.title.clone(),
            weight: self.weight,
            duration: self.duration,
            dtr: self.dtr,
        }
    }

    /// Expand the row to a full `StoredRoast`. A payload that fails to
    /// parse yields empty point/event arrays rather than an error; callers
    /// treat that as "no data".
    pub fn stored(&self, id: usize) -> StoredRoast {
        let payload: Payload = serde_json::from_str(&self.data).unwrap_or_else(|e| {
            tracing::warn!(id, error = %e, "corrupt row payload, returning empty data");
            Payload::default()
        });
        StoredRoast {
            id,
            date: self.date.clone(),
            title: self.title.clone(),
            data_points: payload.data_points,
            events: payload.events,
        }
    }
}
