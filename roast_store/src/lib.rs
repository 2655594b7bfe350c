//! Storage backends for the roast log and bean inventory contracts.
//!
//! Two `LogStore` implementations share one flat row layout: scalar columns
//! plus the point/event payload serialized to a single JSON string column.
//! `MemoryStore` keeps rows in process; `JsonlStore` appends them to a file,
//! one JSON object per line.

#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod inventory;
pub mod jsonl;
pub mod memory;
pub mod row;

pub use error::StoreError;
pub use inventory::MemoryInventory;
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use row::{Payload, Row};
