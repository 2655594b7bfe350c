//! Phase and ratio derivation over the event log.
//!
//! Everything here is a stateless read: the phase, DTR, and ratio split are
//! recomputed from the current event/point sequences on demand, so they are
//! always consistent with the log after any mutation.

use roast_traits::{DataPoint, EventType, RoastEvent};

use crate::math;

/// Categorical roast phase.
///
/// `Cooling` is declared for completeness but never derived from event data;
/// no transition rule produces it. It would require a cooldown timer after
/// the end event, which the event log alone cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoastPhase {
    Drying,
    Maillard,
    Development,
    Cooling,
    Ended,
}

/// Percentage split of elapsed time across the three active phases.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseRatios {
    pub drying: f64,
    pub maillard: f64,
    pub development: f64,
}

fn first_crack(events: &[RoastEvent]) -> Option<&RoastEvent> {
    events.iter().find(|e| e.is_first_crack())
}

fn yellow(events: &[RoastEvent]) -> Option<&RoastEvent> {
    events.iter().find(|e| e.is_yellow())
}

/// Derive the current phase. Priority order, highest wins: an `End`-typed
/// event ends the session; first crack puts it in development; a yellow
/// marker in maillard; otherwise drying.
pub fn current_phase(events: &[RoastEvent]) -> RoastPhase {
    if events.iter().any(|e| e.event_type == EventType::End) {
        return RoastPhase::Ended;
    }
    if first_crack(events).is_some() {
        return RoastPhase::Development;
    }
    if yellow(events).is_some() {
        return RoastPhase::Maillard;
    }
    RoastPhase::Drying
}

/// Development time ratio in percent at `current_time`; 0 until after first
/// crack.
pub fn dtr(events: &[RoastEvent], current_time: u32) -> f64 {
    match first_crack(events) {
        Some(fc) if current_time > fc.timestamp => {
            math::calculate_dtr(current_time - fc.timestamp, current_time)
        }
        _ => 0.0,
    }
}

/// End of the drying phase in seconds: the logged yellow event if present,
/// else the `yellow_temp_c` crossing estimate over the authoritative points,
/// else 0.
pub fn effective_yellow_time(
    events: &[RoastEvent],
    points: &[DataPoint],
    yellow_temp_c: f64,
) -> f64 {
    match yellow(events) {
        Some(e) => f64::from(e.timestamp),
        None => math::estimate_yellow_time(points, yellow_temp_c).unwrap_or(0.0),
    }
}

/// Phase percentage split of `current_time`, each component floored at 0.
/// All zero until first crack is logged and time has elapsed.
pub fn phase_ratios(
    events: &[RoastEvent],
    points: &[DataPoint],
    current_time: u32,
    yellow_temp_c: f64,
) -> PhaseRatios {
    if current_time == 0 {
        return PhaseRatios::default();
    }
    let Some(fc) = first_crack(events) else {
        return PhaseRatios::default();
    };

    let now = f64::from(current_time);
    let fc_time = f64::from(fc.timestamp);
    let yellow_time = effective_yellow_time(events, points, yellow_temp_c);

    PhaseRatios {
        drying: (yellow_time / now * 100.0).max(0.0),
        maillard: ((fc_time - yellow_time) / now * 100.0).max(0.0),
        development: ((now - fc_time) / now * 100.0).max(0.0),
    }
}

/// Projected total roast time landing on `target_dtr_pct`, anchored at the
/// first-crack timestamp. `None` before first crack or for singular targets.
pub fn estimated_end_time(events: &[RoastEvent], target_dtr_pct: f64) -> Option<f64> {
    let fc = first_crack(events)?;
    math::estimate_finish_time(fc.timestamp, target_dtr_pct)
}
