//! The session aggregate: one roast, explicitly constructed and owning its
//! clock, log, and interpolation state.

use std::sync::Arc;
use std::time::Duration;

use roast_traits::clock::{Clock, MonotonicClock};
use roast_traits::{DataPoint, EventType, Inventory, LogStore, RoastRecord};

use crate::error::{BuildError, Result, map_inventory_error, map_store_error};
use crate::interpolate::Interpolator;
use crate::log::ReadingLog;
use crate::phase::{self, PhaseRatios, RoastPhase};
use crate::timer::RoastTimer;
use crate::{math, ticker::Ticker};

/// Tunables for one session.
#[derive(Debug, Clone)]
pub struct SessionCfg {
    /// RoR lookback window for manual readings, seconds.
    pub ror_window_secs: u32,
    /// DTR target used for the projected finish time, percent.
    pub target_dtr_pct: f64,
    /// Temperature threshold for the automatic yellow-point estimate, °C.
    pub yellow_temp_c: f64,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            ror_window_secs: math::ROR_WINDOW_SECS,
            target_dtr_pct: 20.0,
            yellow_temp_c: math::YELLOW_TEMP_C,
        }
    }
}

/// Point-in-time derived view of the session, recomputed on request.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub elapsed_secs: u64,
    pub phase: RoastPhase,
    pub dtr: f64,
    pub ratios: PhaseRatios,
    /// Extrapolation rate from the last two manual readings, °C/s.
    pub ror_per_second: Option<f64>,
    /// Projected total time for the configured DTR target, seconds.
    pub estimated_end_secs: Option<f64>,
}

/// One active roast session.
///
/// All mutation goes through these methods; the phase/ratio values are
/// derived on read, and the interpolation engine only ever produces
/// display-side points. The reference dataset is loaded from the log store
/// and has its own lifecycle: neither `reset` nor undo touches it.
pub struct RoastSession {
    timer: RoastTimer,
    log: ReadingLog,
    interp: Interpolator,
    reference: Vec<DataPoint>,
    cfg: SessionCfg,
}

impl core::fmt::Debug for RoastSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoastSession")
            .field("elapsed_secs", &self.timer.time())
            .field("points", &self.log.points().len())
            .field("events", &self.log.events().len())
            .field("running", &self.timer.is_running())
            .finish()
    }
}

impl RoastSession {
    /// Start building a session.
    pub fn builder() -> RoastSessionBuilder {
        RoastSessionBuilder::default()
    }

    /// A session on the real-time clock with default tunables.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            timer: RoastTimer::new(clock),
            log: ReadingLog::new(),
            interp: Interpolator::new(),
            reference: Vec::new(),
            cfg: SessionCfg::default(),
        }
    }

    // ---- clock ----

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Elapsed whole seconds of roasting time.
    pub fn time(&self) -> u64 {
        self.timer.time()
    }

    /// Tear the session back to empty: clock zeroed, log and synthetic
    /// points cleared. The reference dataset is deliberately preserved.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.log.reset();
        self.interp = Interpolator::new();
        tracing::info!("session reset");
    }

    /// Advance one logical second: refresh the interpolation basis and,
    /// while running, grow the synthetic stream by one point.
    ///
    /// Live callers pump this from a [`Ticker`]; tests call it directly.
    pub fn tick(&mut self) {
        self.interp.sync(self.log.points());
        self.interp.on_tick(self.log.points(), self.timer.is_running());
    }

    /// Spawn a 1 Hz wall-clock tick source for this session. The caller
    /// pumps it: `while ticker.wait() { session.tick() }`. Dropping the
    /// ticker cancels the thread.
    pub fn spawn_ticker(&self) -> Ticker {
        Ticker::spawn(Duration::from_secs(1), MonotonicClock::new())
    }

    // ---- log mutations ----

    /// Record a manual temperature reading at the current session time.
    /// Callers validate numeric input at the boundary; NaN never reaches
    /// the log.
    pub fn add_reading(&mut self, temperature: f64) {
        let t = self.time() as u32;
        self.add_reading_at(t, temperature);
    }

    /// Record a manual reading at an explicit timestamp (replay path).
    pub fn add_reading_at(&mut self, timestamp: u32, temperature: f64) {
        self.log.add_reading(timestamp, temperature);
        self.interp.sync(self.log.points());
    }

    /// Record a milestone (reading + event) atomically at the current time.
    pub fn record_milestone(&mut self, name: &str, temperature: f64, kind: EventType) {
        let t = self.time() as u32;
        self.log.record_milestone(name, t, temperature, kind);
        self.interp.sync(self.log.points());
    }

    /// Append an event without a new reading; couples with the most recent
    /// bare reading for undo when one is on top of the stack.
    pub fn log_event(&mut self, name: &str, timestamp: u32, temperature: f64, kind: EventType) {
        self.log.log_event(name, timestamp, temperature, kind);
    }

    pub fn set_gas(&mut self, value: f64) {
        self.log.set_gas(value);
    }

    pub fn set_damper(&mut self, value: u8) {
        self.log.set_damper(value);
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Roll back the last reading (and its coupled event, if any).
    pub fn undo_last(&mut self) -> bool {
        let undone = self.log.undo_last();
        if undone {
            self.interp.sync(self.log.points());
        }
        undone
    }

    /// Mark the roast ended: logs the drop event at the current time and
    /// stops the clock. Ignored if an end event already exists; a session
    /// carries at most one.
    pub fn finish(&mut self, temperature: f64) {
        if phase::current_phase(self.log.events()) == RoastPhase::Ended {
            tracing::warn!("finish called on an already-ended session");
            return;
        }
        let t = self.time() as u32;
        self.log.record_milestone("Drop", t, temperature, EventType::End);
        self.interp.sync(self.log.points());
        self.timer.stop();
        tracing::info!(duration = t, "roast finished");
    }

    // ---- reads ----

    pub fn data_points(&self) -> &[DataPoint] {
        self.log.points()
    }

    pub fn events(&self) -> &[roast_traits::RoastEvent] {
        self.log.events()
    }

    pub fn current_gas(&self) -> Option<f64> {
        self.log.current_gas()
    }

    pub fn current_damper(&self) -> Option<u8> {
        self.log.current_damper()
    }

    pub fn reference(&self) -> &[DataPoint] {
        &self.reference
    }

    /// Authoritative points followed by the synthetic display stream.
    pub fn chart_points(&self) -> Vec<DataPoint> {
        self.interp.chart_points(self.log.points())
    }

    /// Derived metrics snapshot at the current clock value.
    pub fn metrics(&self) -> Metrics {
        let now = self.time() as u32;
        let events = self.log.events();
        Metrics {
            elapsed_secs: self.time(),
            phase: phase::current_phase(events),
            dtr: phase::dtr(events, now),
            ratios: phase::phase_ratios(events, self.log.points(), now, self.cfg.yellow_temp_c),
            ror_per_second: self.interp.rate_per_second(),
            estimated_end_secs: phase::estimated_end_time(events, self.cfg.target_dtr_pct),
        }
    }

    // ---- collaborators ----

    /// Persist this session as one store row. Write failures surface to the
    /// caller; the in-memory session is untouched either way.
    pub fn save(&self, store: &mut dyn LogStore, date: &str, title: &str, weight_g: f64) -> Result<()> {
        let now = self.time() as u32;
        let record = RoastRecord {
            date: date.to_owned(),
            title: title.to_owned(),
            weight: weight_g,
            duration: now,
            dtr: phase::dtr(self.log.events(), now),
            data_points: self.log.points().to_vec(),
            events: self.log.events().to_vec(),
        };
        store
            .append(&record)
            .map_err(|e| eyre::Report::new(map_store_error(e)))?;
        tracing::info!(title, duration = now, "roast saved");
        Ok(())
    }

    /// Load a past session's points as the comparison overlay.
    ///
    /// Read failures degrade: an unreachable store, a missing row, or a row
    /// whose payload came back empty all leave the current reference
    /// untouched and return false. They are reported, not raised.
    pub fn load_reference(&mut self, store: &dyn LogStore, id: usize) -> bool {
        match store.get(id) {
            Ok(Some(row)) if !row.data_points.is_empty() => {
                tracing::info!(id, points = row.data_points.len(), "reference loaded");
                self.reference = row.data_points;
                true
            }
            Ok(Some(_)) => {
                tracing::warn!(id, "stored roast has no readable data, reference unchanged");
                false
            }
            Ok(None) => {
                tracing::warn!(id, "no such roast log");
                false
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "reference load failed");
                false
            }
        }
    }

    pub fn clear_reference(&mut self) {
        self.reference.clear();
    }

    /// Deduct the roasted batch from green-bean stock, converting grams to
    /// kilograms. Invoked at session end; roast math never depends on the
    /// outcome, so failures only surface to the caller.
    pub fn deduct_green_stock(
        &self,
        inventory: &mut dyn Inventory,
        bean_id: &str,
        weight_g: f64,
    ) -> Result<()> {
        inventory
            .deduct(bean_id, weight_g / 1000.0)
            .map_err(|e| eyre::Report::new(map_inventory_error(e)))?;
        tracing::info!(bean_id, weight_g, "green stock deducted");
        Ok(())
    }
}

impl Default for RoastSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RoastSession`; validates tunables on `build()`.
#[derive(Default)]
pub struct RoastSessionBuilder {
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    cfg: Option<SessionCfg>,
}

impl RoastSessionBuilder {
    /// Provide a custom clock; defaults to `MonotonicClock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_cfg(mut self, cfg: SessionCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }

    pub fn build(self) -> Result<RoastSession> {
        let cfg = self.cfg.unwrap_or_default();
        if cfg.ror_window_secs == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "ror_window_secs must be > 0",
            )));
        }
        if cfg.target_dtr_pct <= 0.0 || cfg.target_dtr_pct >= 100.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "target_dtr_pct must be within (0, 100)",
            )));
        }
        if !cfg.yellow_temp_c.is_finite() || cfg.yellow_temp_c <= 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "yellow_temp_c must be a positive temperature",
            )));
        }
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        Ok(RoastSession {
            timer: RoastTimer::new(clock),
            log: ReadingLog::with_ror_window(cfg.ror_window_secs),
            interp: Interpolator::new(),
            reference: Vec::new(),
            cfg,
        })
    }
}
