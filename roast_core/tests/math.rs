use roast_core::math::{
    ROR_WINDOW_SECS, calculate_dtr, calculate_ror, estimate_finish_time, estimate_yellow_time,
    interpolate_temperature, ror_per_second,
};
use roast_traits::DataPoint;
use rstest::rstest;

fn pt(timestamp: u32, temperature: f64) -> DataPoint {
    DataPoint::manual(timestamp, temperature)
}

#[test]
fn ror_dense_case() {
    // Point exactly at the window edge qualifies.
    let history = [pt(0, 100.0)];
    let ror = calculate_ror(110.0, 60, &history, 60);
    assert!((ror - 10.0).abs() < 1e-9);
}

#[test]
fn ror_sparse_history_falls_back_to_last_point() {
    // At t=61 with a 60 s window, no point satisfies timestamp >= 1. The
    // most recent reading must be used instead of zeroing the RoR.
    let history = [pt(0, 100.0)];
    let ror = calculate_ror(110.0, 61, &history, 60);
    let expected = (110.0 - 100.0) / 61.0 * 60.0; // ~9.836
    assert!((ror - expected).abs() < 1e-9);
    assert!(ror > 9.8, "sparse fallback regressed to {ror}");
}

#[test]
fn ror_very_sparse_history() {
    let history = [pt(0, 100.0)];
    let ror = calculate_ror(120.0, 120, &history, 60);
    assert!((ror - 10.0).abs() < 1e-9);
}

#[test]
fn ror_picks_earliest_point_inside_window() {
    let history = [pt(0, 100.0), pt(30, 110.0), pt(60, 118.0)];
    // Window reaches back to t=30; the point at 30 is the reference.
    let ror = calculate_ror(126.0, 90, &history, ROR_WINDOW_SECS);
    let expected = (126.0 - 110.0) / 60.0 * 60.0;
    assert!((ror - expected).abs() < 1e-9);
}

#[test]
fn ror_duplicate_timestamp_yields_zero() {
    let history = [pt(60, 110.0)];
    assert_eq!(calculate_ror(115.0, 60, &history, 60), 0.0);
}

#[test]
fn ror_empty_history_yields_zero() {
    assert_eq!(calculate_ror(100.0, 0, &[], 60), 0.0);
}

#[rstest]
#[case(100.0, 0, 110.0, 10, 1.0)]
#[case(110.0, 10, 110.0, 20, 0.0)]
#[case(100.0, 10, 110.0, 10, 0.0)] // zero delta
#[case(100.0, 20, 110.0, 10, 0.0)] // negative delta
fn ror_per_second_cases(
    #[case] prev_temp: f64,
    #[case] prev_time: u32,
    #[case] curr_temp: f64,
    #[case] curr_time: u32,
    #[case] expected: f64,
) {
    let v = ror_per_second(prev_temp, prev_time, curr_temp, curr_time);
    assert!((v - expected).abs() < 1e-9);
}

#[test]
fn dtr_zero_total_is_zero_regardless_of_dev_time() {
    assert_eq!(calculate_dtr(0, 0), 0.0);
    assert_eq!(calculate_dtr(120, 0), 0.0);
}

#[test]
fn dtr_percentage() {
    assert!((calculate_dtr(120, 600) - 20.0).abs() < 1e-9);
}

#[test]
fn finish_time_solves_for_target() {
    assert_eq!(estimate_finish_time(600, 20.0), Some(750.0));
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(100.0)]
#[case(130.0)]
fn finish_time_singular_targets_have_no_estimate(#[case] target: f64) {
    assert_eq!(estimate_finish_time(600, target), None);
    assert_eq!(estimate_finish_time(0, target), None);
}

#[test]
fn yellow_estimate_exact_hit_lands_on_reading() {
    let points = [pt(0, 100.0), pt(120, 140.0)];
    let t = estimate_yellow_time(&points, 140.0).unwrap();
    assert!((t - 120.0).abs() < 1e-9);
}

#[test]
fn yellow_estimate_uses_first_crossing() {
    // Crosses 140 twice (dip); only the first crossing counts.
    let points = [pt(0, 130.0), pt(60, 150.0), pt(120, 135.0), pt(180, 160.0)];
    let t = estimate_yellow_time(&points, 140.0).unwrap();
    assert!((t - 30.0).abs() < 1e-9);
}

#[test]
fn interpolation_is_linear() {
    let v = interpolate_temperature(180.0, 0.15, 10.0);
    assert!((v - 181.5).abs() < 1e-9);
}
