//! Append-only reading/event log with current burner settings and a bounded
//! undo stack.

use roast_traits::{DataPoint, EventType, RoastEvent};

use crate::math;

/// Tag describing what the most recent mutation appended, so one undo can
/// roll it back as a unit.
///
/// A milestone is always logged against the reading entered with it, so the
/// two are removed together. The tag is pushed atomically by
/// [`ReadingLog::record_milestone`]; the split `add_reading` + `log_event`
/// path upgrades a bare `Reading` tag in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    Reading,
    ReadingWithEvent { event_name: String },
}

/// Ordered store of manual readings and milestone events.
///
/// Points are appended in call order and never reordered or deduplicated;
/// callers feed non-decreasing timestamps from the session clock.
#[derive(Debug, Default)]
pub struct ReadingLog {
    points: Vec<DataPoint>,
    events: Vec<RoastEvent>,
    current_gas: Option<f64>,
    current_damper: Option<u8>,
    undo_stack: Vec<UndoEntry>,
    ror_window_secs: u32,
}

impl ReadingLog {
    pub fn new() -> Self {
        Self {
            ror_window_secs: math::ROR_WINDOW_SECS,
            ..Self::default()
        }
    }

    /// A log computing RoR over a non-default lookback window.
    pub fn with_ror_window(window_secs: u32) -> Self {
        Self {
            ror_window_secs: window_secs,
            ..Self::default()
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn events(&self) -> &[RoastEvent] {
        &self.events
    }

    pub fn current_gas(&self) -> Option<f64> {
        self.current_gas
    }

    pub fn current_damper(&self) -> Option<u8> {
        self.current_damper
    }

    /// Append a manual reading. RoR is derived against the existing points
    /// before the append; current gas/damper settings are stamped onto the
    /// point.
    pub fn add_reading(&mut self, timestamp: u32, temperature: f64) {
        let ror = math::calculate_ror(temperature, timestamp, &self.points, self.ror_window_secs);
        self.points.push(DataPoint {
            timestamp,
            temperature,
            ror: Some(ror),
            gas: self.current_gas,
            damper: self.current_damper,
            is_interpolated: false,
        });
        self.undo_stack.push(UndoEntry::Reading);
        tracing::info!(timestamp, temperature, ror, "reading added");
    }

    /// Append a milestone event.
    ///
    /// When the top of the undo stack is a bare reading (the usual case:
    /// callers add the reading first, then annotate it), the tag is upgraded
    /// so one undo removes reading and event together. With an empty stack
    /// the event stands alone and undo will not remove it.
    pub fn log_event(&mut self, name: &str, timestamp: u32, temperature: f64, kind: EventType) {
        self.events.push(RoastEvent {
            name: name.to_owned(),
            timestamp,
            temperature,
            event_type: kind,
        });
        if let Some(top @ UndoEntry::Reading) = self.undo_stack.last_mut() {
            *top = UndoEntry::ReadingWithEvent {
                event_name: name.to_owned(),
            };
        }
        tracing::info!(name, timestamp, temperature, ?kind, "event logged");
    }

    /// Record a reading and its milestone as one atomic mutation.
    ///
    /// Preferred over calling `add_reading` then `log_event`: the combined
    /// undo tag is pushed once, so no interleaving caller can observe (or
    /// race) the intermediate bare-reading state.
    pub fn record_milestone(
        &mut self,
        name: &str,
        timestamp: u32,
        temperature: f64,
        kind: EventType,
    ) {
        let ror = math::calculate_ror(temperature, timestamp, &self.points, self.ror_window_secs);
        self.points.push(DataPoint {
            timestamp,
            temperature,
            ror: Some(ror),
            gas: self.current_gas,
            damper: self.current_damper,
            is_interpolated: false,
        });
        self.events.push(RoastEvent {
            name: name.to_owned(),
            timestamp,
            temperature,
            event_type: kind,
        });
        self.undo_stack.push(UndoEntry::ReadingWithEvent {
            event_name: name.to_owned(),
        });
        tracing::info!(name, timestamp, temperature, "milestone recorded");
    }

    /// Overwrite the current gas setting (no enforced bound).
    pub fn set_gas(&mut self, value: f64) {
        self.current_gas = Some(value);
    }

    /// Overwrite the current damper setting, clamped to 0..=100.
    pub fn set_damper(&mut self, value: u8) {
        self.current_damper = Some(value.min(100));
    }

    /// Whether `undo_last` would change anything. The first reading (the
    /// charge) is never removable.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() && self.points.len() > 1
    }

    /// Roll back the most recent mutation. A no-op (returning false) on an
    /// empty stack or when only the charge reading remains.
    pub fn undo_last(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        match self.undo_stack.pop() {
            Some(UndoEntry::Reading) => {
                self.points.pop();
                tracing::info!("reading undone");
            }
            Some(UndoEntry::ReadingWithEvent { event_name }) => {
                self.events.pop();
                self.points.pop();
                tracing::info!(event_name, "reading and event undone");
            }
            None => return false,
        }
        true
    }

    /// Clear points, events, settings, and the undo stack.
    pub fn reset(&mut self) {
        self.points.clear();
        self.events.clear();
        self.current_gas = None;
        self.current_damper = None;
        self.undo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damper_is_clamped() {
        let mut log = ReadingLog::new();
        log.set_damper(250);
        assert_eq!(log.current_damper(), Some(100));
        log.set_damper(40);
        assert_eq!(log.current_damper(), Some(40));
    }

    #[test]
    fn readings_capture_current_settings() {
        let mut log = ReadingLog::new();
        log.set_gas(1.2);
        log.set_damper(60);
        log.add_reading(0, 180.0);
        let p = &log.points()[0];
        assert_eq!(p.gas, Some(1.2));
        assert_eq!(p.damper, Some(60));
        assert!(!p.is_interpolated);
    }

    #[test]
    fn standalone_event_is_not_undoable() {
        let mut log = ReadingLog::new();
        log.log_event("Note", 10, 150.0, EventType::UserNote);
        assert!(!log.can_undo());
        assert!(!log.undo_last());
        assert_eq!(log.events().len(), 1);
    }
}
