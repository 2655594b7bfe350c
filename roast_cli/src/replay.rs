//! Deterministic profile replay on a manual clock.
//!
//! Every profile row advances the clock to its timestamp and feeds the
//! session exactly as a live operator would, so the resulting metrics match
//! what the live path would have produced second for second.

use std::sync::Arc;

use eyre::Result;
use serde::Serialize;

use roast_config::ProfileRow;
use roast_core::{RoastSession, SessionCfg, format_time};
use roast_traits::EventType;
use roast_traits::clock::ManualClock;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub title: String,
    pub date: String,
    pub duration_secs: u64,
    /// MM:SS rendering of `duration_secs`.
    pub duration: String,
    pub dtr: f64,
    pub phase: String,
    pub points: usize,
    pub events: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_end_secs: Option<f64>,
}

/// Drive a fresh session through the profile rows.
pub fn replay_profile(rows: &[ProfileRow], cfg: SessionCfg) -> Result<RoastSession> {
    let clock = ManualClock::new();
    let mut session = RoastSession::builder()
        .with_clock(Arc::new(clock.clone()))
        .with_cfg(cfg)
        .build()?;
    session.start();

    let mut elapsed = 0u64;
    for row in rows {
        let ts = u64::from(row.timestamp);
        if ts > elapsed {
            clock.advance_secs(ts - elapsed);
            elapsed = ts;
        }
        if let Some(gas) = row.gas {
            session.set_gas(gas);
        }
        if let Some(damper) = row.damper {
            session.set_damper(damper);
        }
        match (row.event.as_deref(), row.parsed_event_type()?) {
            (Some(name), Some(EventType::End)) => {
                session.record_milestone(name, row.temperature, EventType::End);
                session.stop();
            }
            (Some(name), Some(kind)) => {
                session.record_milestone(name, row.temperature, kind);
            }
            _ => session.add_reading(row.temperature),
        }
    }
    Ok(session)
}

pub fn summarize(session: &RoastSession, title: &str, date: &str) -> ReplaySummary {
    let m = session.metrics();
    ReplaySummary {
        title: title.to_owned(),
        date: date.to_owned(),
        duration_secs: m.elapsed_secs,
        duration: format_time(m.elapsed_secs),
        dtr: m.dtr,
        phase: format!("{:?}", m.phase),
        points: session.data_points().len(),
        events: session.events().len(),
        estimated_end_secs: m.estimated_end_secs,
    }
}
