//! Shared seams for the roast telemetry workspace.
//!
//! This crate carries everything both the engine (`roast_core`) and the
//! collaborators (`roast_store`) need to agree on: the `Clock` abstraction,
//! the point/event vocabulary, and the store/inventory contracts.

pub mod clock;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use store::{BoxError, Inventory, LogStore, RoastRecord, RoastSummary, StoredRoast};
pub use types::{DataPoint, EventType, RoastEvent};
