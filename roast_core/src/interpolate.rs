//! Display-only interpolation between sparse manual readings.
//!
//! The engine never touches the authoritative log: it keeps its own vector
//! of synthetic points, re-anchored whenever the manual point count changes,
//! and grows it by exactly one point per tick while the session clock runs.

use roast_traits::DataPoint;

use crate::math;

/// Round to one decimal place, the display resolution of predicted
/// temperatures.
fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Synthesizes a once-per-second predicted point stream ahead of the last
/// manual reading, extrapolating with the most recently observed °C/s rate.
#[derive(Debug, Default)]
pub struct Interpolator {
    synthetic: Vec<DataPoint>,
    rate_c_per_s: Option<f64>,
    /// Manual point count the current synthetic run is anchored to.
    basis_len: usize,
}

impl Interpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current extrapolation rate in °C/s, if at least two manual readings
    /// exist.
    pub fn rate_per_second(&self) -> Option<f64> {
        self.rate_c_per_s
    }

    pub fn synthetic_points(&self) -> &[DataPoint] {
        &self.synthetic
    }

    /// Re-anchor to the authoritative point sequence.
    ///
    /// Any change in manual point count (a reading added or undone)
    /// invalidates the synthetic run: the prediction basis must always be
    /// the latest manual reading. The rate is recomputed from the last two
    /// manual points either way.
    pub fn sync(&mut self, manual: &[DataPoint]) {
        if manual.len() != self.basis_len {
            self.basis_len = manual.len();
            if !self.synthetic.is_empty() {
                tracing::debug!(
                    discarded = self.synthetic.len(),
                    "interpolation basis changed, synthetic points cleared"
                );
            }
            self.synthetic.clear();
        }
        self.rate_c_per_s = match manual {
            [.., prev, curr] => Some(math::ror_per_second(
                prev.temperature,
                prev.timestamp,
                curr.temperature,
                curr.timestamp,
            )),
            _ => None,
        };
    }

    /// Generate the next synthetic point, one second past the previous one.
    ///
    /// Produces nothing unless the clock is running, a rate is available,
    /// and at least one manual point exists — so generation halts
    /// deterministically the moment any of those preconditions lapses.
    pub fn on_tick(&mut self, manual: &[DataPoint], is_running: bool) {
        if !is_running {
            return;
        }
        let (Some(rate), Some(last_manual)) = (self.rate_c_per_s, manual.last()) else {
            return;
        };

        let last_ts = self
            .synthetic
            .last()
            .map_or(last_manual.timestamp, |p| p.timestamp);
        let next_ts = last_ts + 1;
        let elapsed = i64::from(next_ts) - i64::from(last_manual.timestamp);
        if elapsed <= 0 {
            return;
        }

        let predicted =
            math::interpolate_temperature(last_manual.temperature, rate, elapsed as f64);
        self.synthetic.push(DataPoint {
            timestamp: next_ts,
            temperature: round_tenth(predicted),
            ror: Some(rate * 60.0),
            gas: last_manual.gas,
            damper: last_manual.damper,
            is_interpolated: true,
        });
        tracing::trace!(timestamp = next_ts, temperature = predicted, "synthetic point");
    }

    /// Display sequence: authoritative points followed by synthetic ones.
    /// Synthetic timestamps start after the last manual point by
    /// construction, so a plain concatenation is already ordered.
    pub fn chart_points(&self, manual: &[DataPoint]) -> Vec<DataPoint> {
        if self.synthetic.is_empty() {
            return manual.to_vec();
        }
        let mut out = Vec::with_capacity(manual.len() + self.synthetic.len());
        out.extend_from_slice(manual);
        out.extend_from_slice(&self.synthetic);
        out
    }
}
