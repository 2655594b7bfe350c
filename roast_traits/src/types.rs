use serde::{Deserialize, Serialize};

/// One bean-temperature reading, either entered manually or synthesized by
/// the interpolation engine for display.
///
/// Timestamps are whole seconds from session start. Within the authoritative
/// log they are non-decreasing in insertion order; the log is never reordered
/// or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub timestamp: u32,
    /// Bean temperature in °C.
    pub temperature: f64,
    /// Rate of rise in °C/min, derived at insertion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ror: Option<f64>,
    /// Gas pressure at the time of the reading (unit is burner-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<f64>,
    /// Damper opening, 0..=100 percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damper: Option<u8>,
    /// True only for synthetic points produced by the interpolation engine.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub is_interpolated: bool,
}

impl DataPoint {
    /// A manual reading with no derived or setting fields attached.
    pub fn manual(timestamp: u32, temperature: f64) -> Self {
        Self {
            timestamp,
            temperature,
            ror: None,
            gas: None,
            damper: None,
            is_interpolated: false,
        }
    }
}

/// Classification of a logged milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Start,
    PhaseChange,
    UserNote,
    End,
}

/// A named milestone pinned to a moment of the roast.
///
/// Names are free text, but `"1st Crack"`/`"First Crack"` and
/// `"Yellow"`/`"Dry End"` carry phase semantics in the derivation engine.
/// At most one `End`-typed event should exist per session; once present the
/// session is terminal for phase purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastEvent {
    pub name: String,
    pub timestamp: u32,
    pub temperature: f64,
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl RoastEvent {
    /// Whether this event marks first crack (start of development).
    pub fn is_first_crack(&self) -> bool {
        self.name == "1st Crack" || self.name == "First Crack"
    }

    /// Whether this event marks the yellow point (end of drying).
    pub fn is_yellow(&self) -> bool {
        self.name == "Yellow" || self.name == "Dry End"
    }
}
