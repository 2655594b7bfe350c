//! Pure roast math: rate of rise, development-time ratio, finish-time and
//! yellow-point estimation, linear temperature extrapolation.
//!
//! Every function is total over its documented domain: degenerate inputs
//! (empty history, zero time deltas, singular DTR targets) resolve to a
//! well-defined fallback value instead of an error.

use roast_traits::DataPoint;

/// Default RoR lookback window in seconds.
pub const ROR_WINDOW_SECS: u32 = 60;

/// Temperature threshold for the automatic yellow-point estimate, °C.
pub const YELLOW_TEMP_C: f64 = 140.0;

/// Rate of rise in °C/min at (`current_time`, `current_temp`) against prior
/// readings, looking back `window_seconds`.
///
/// The reference point is the earliest history point inside the window. When
/// manual readings are sparser than the window there is no such point; in
/// that case the most recent reading is used instead. Falling through to 0
/// here would silently flatline the RoR whenever the operator samples slower
/// than the window, so the fallback is load-bearing.
///
/// Returns 0 on empty history, a reference timestamp equal to
/// `current_time`, or a non-positive time delta.
pub fn calculate_ror(
    current_temp: f64,
    current_time: u32,
    history: &[DataPoint],
    window_seconds: u32,
) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let target_time = current_time.saturating_sub(window_seconds);
    let past = history
        .iter()
        .find(|p| p.timestamp >= target_time)
        .or_else(|| history.last());

    let Some(past) = past else {
        return 0.0;
    };
    if past.timestamp == current_time {
        return 0.0;
    }

    let time_diff = i64::from(current_time) - i64::from(past.timestamp);
    if time_diff <= 0 {
        return 0.0;
    }

    let temp_diff = current_temp - past.temperature;
    temp_diff / time_diff as f64 * 60.0
}

/// Instantaneous slope in °C/s between two readings; 0 when the time delta
/// is non-positive.
pub fn ror_per_second(prev_temp: f64, prev_time: u32, curr_temp: f64, curr_time: u32) -> f64 {
    let dt = i64::from(curr_time) - i64::from(prev_time);
    if dt <= 0 {
        return 0.0;
    }
    (curr_temp - prev_temp) / dt as f64
}

/// Development time ratio in percent; 0 when `total_time` is 0.
pub fn calculate_dtr(dev_time: u32, total_time: u32) -> f64 {
    if total_time == 0 {
        return 0.0;
    }
    f64::from(dev_time) / f64::from(total_time) * 100.0
}

/// Projected total roast time (seconds) that would land on `target_dtr_pct`
/// given first crack at `fc_start_time`.
///
/// Solves total = fc / (1 - pct/100). Targets at or outside (0, 100) have no
/// meaningful solution and yield `None`.
pub fn estimate_finish_time(fc_start_time: u32, target_dtr_pct: f64) -> Option<f64> {
    if target_dtr_pct <= 0.0 || target_dtr_pct >= 100.0 {
        return None;
    }
    Some(f64::from(fc_start_time) / (1.0 - target_dtr_pct / 100.0))
}

/// Estimated timestamp (seconds) at which the bean temperature first crossed
/// `target_temp`, linearly interpolated between the two straddling readings.
///
/// `None` when the temperature never crosses the threshold upward.
pub fn estimate_yellow_time(points: &[DataPoint], target_temp: f64) -> Option<f64> {
    points.windows(2).find_map(|w| {
        let (prev, curr) = (&w[0], &w[1]);
        if prev.temperature < target_temp && target_temp <= curr.temperature {
            let frac = (target_temp - prev.temperature) / (curr.temperature - prev.temperature);
            let span = f64::from(curr.timestamp) - f64::from(prev.timestamp);
            Some(f64::from(prev.timestamp) + frac * span)
        } else {
            None
        }
    })
}

/// Linear temperature extrapolation from a base reading.
pub fn interpolate_temperature(base_temp: f64, ror_per_second: f64, elapsed_seconds: f64) -> f64 {
    base_temp + ror_per_second * elapsed_seconds
}

/// Rate of change of RoR over the last three readings, in °C/min per second.
///
/// The two segment RoRs are attributed to the segment midpoints; their
/// difference is divided by the midpoint-to-midpoint span
/// `(p3.timestamp - p1.timestamp) / 2`. Returns 0 with fewer than three
/// points or a non-positive span. Reserved for curvature-aware prediction;
/// the display path does not consume it.
pub fn ror_change_rate(points: &[DataPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let p1 = &points[points.len() - 3];
    let p2 = &points[points.len() - 2];
    let p3 = &points[points.len() - 1];

    let ror_a = ror_per_second(p1.temperature, p1.timestamp, p2.temperature, p2.timestamp) * 60.0;
    let ror_b = ror_per_second(p2.temperature, p2.timestamp, p3.temperature, p3.timestamp) * 60.0;

    let mid_span = (f64::from(p3.timestamp) - f64::from(p1.timestamp)) / 2.0;
    if mid_span <= 0.0 {
        return 0.0;
    }
    (ror_b - ror_a) / mid_span
}
