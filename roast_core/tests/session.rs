use std::sync::Arc;

use roast_core::{RoastPhase, RoastSession, SessionCfg};
use roast_store::{MemoryInventory, MemoryStore};
use roast_traits::clock::ManualClock;
use roast_traits::{EventType, LogStore};

fn session_on(clock: &ManualClock) -> RoastSession {
    RoastSession::with_clock(Arc::new(clock.clone()))
}

#[test]
fn full_roast_flow_saves_one_row() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);
    let mut store = MemoryStore::new();

    session.start();
    session.set_gas(1.5);
    session.add_reading(180.0); // charge at t=0

    clock.advance_secs(300);
    session.record_milestone("Yellow", 152.0, EventType::PhaseChange);

    clock.advance_secs(180);
    session.record_milestone("1st Crack", 196.0, EventType::PhaseChange);
    assert_eq!(session.metrics().phase, RoastPhase::Development);

    clock.advance_secs(120);
    session.finish(205.0);
    assert_eq!(session.metrics().phase, RoastPhase::Ended);
    assert!(!session.is_running());

    session
        .save(&mut store, "2026-08-23", "Ethiopia Natural", 250.0)
        .unwrap();

    let row = store.get(0).unwrap().unwrap();
    assert_eq!(row.title, "Ethiopia Natural");
    assert_eq!(row.data_points.len(), 4);
    assert_eq!(row.events.len(), 3);
    assert_eq!(row.events[2].name, "Drop");
    assert_eq!(row.events[2].event_type, EventType::End);

    let summary = &store.list().unwrap()[0];
    assert_eq!(summary.duration, 600);
    // 120 s of development over 600 s total.
    assert!((summary.dtr - 20.0).abs() < 1e-9);
}

#[test]
fn finish_is_one_shot() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);
    session.start();
    session.add_reading(180.0);
    clock.advance_secs(500);
    session.finish(204.0);

    let events_before = session.events().len();
    clock.advance_secs(30);
    session.finish(210.0);
    assert_eq!(session.events().len(), events_before);
}

#[test]
fn clock_freezes_while_paused_and_resumes() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);

    session.start();
    clock.advance_secs(90);
    session.stop();
    clock.advance_secs(1000);
    assert_eq!(session.time(), 90);

    session.start();
    clock.advance_secs(15);
    assert_eq!(session.time(), 105);
}

#[test]
fn ticks_grow_the_chart_past_manual_points() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);
    session.start();
    session.add_reading(100.0);
    clock.advance_secs(60);
    session.add_reading(112.0);

    for _ in 0..3 {
        session.tick();
    }
    let chart = session.chart_points();
    assert_eq!(chart.len(), 5);
    assert_eq!(chart[2].timestamp, 61);
    assert!(chart[2].is_interpolated);
    assert_eq!(chart[4].timestamp, 63);

    // A new authoritative reading re-anchors the synthetic run.
    clock.advance_secs(30);
    session.add_reading(118.0);
    assert_eq!(session.chart_points().len(), 3);
}

#[test]
fn reset_clears_the_log_but_keeps_the_reference() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);
    let mut store = MemoryStore::new();

    // Persist one roast and reload it as the overlay.
    session.start();
    session.add_reading(180.0);
    clock.advance_secs(60);
    session.add_reading(150.0);
    session.save(&mut store, "2026-08-22", "yesterday", 200.0).unwrap();
    assert!(session.load_reference(&store, 0));
    assert_eq!(session.reference().len(), 2);

    session.reset();
    assert_eq!(session.time(), 0);
    assert!(session.data_points().is_empty());
    assert!(session.events().is_empty());
    assert_eq!(session.reference().len(), 2);

    session.clear_reference();
    assert!(session.reference().is_empty());
}

#[test]
fn load_reference_degrades_instead_of_erroring() {
    let mut session = RoastSession::new();
    let mut store = MemoryStore::new();

    // Missing row.
    assert!(!session.load_reference(&store, 7));

    // Row whose payload cannot be parsed reads as empty and is rejected.
    store.push_raw("2026-08-20", "broken", "{not json");
    assert!(!session.load_reference(&store, 0));
    assert!(session.reference().is_empty());
}

#[test]
fn undo_rolls_back_through_the_session() {
    let clock = ManualClock::new();
    let mut session = session_on(&clock);
    session.start();
    session.add_reading(180.0);
    assert!(!session.can_undo()); // charge is not removable

    clock.advance_secs(300);
    session.record_milestone("Yellow", 152.0, EventType::PhaseChange);
    assert!(session.can_undo());
    assert_eq!(session.metrics().phase, RoastPhase::Maillard);

    assert!(session.undo_last());
    assert_eq!(session.data_points().len(), 1);
    assert!(session.events().is_empty());
    assert_eq!(session.metrics().phase, RoastPhase::Drying);
    assert!(!session.undo_last());
}

#[test]
fn deduct_converts_grams_to_kilograms() {
    let session = RoastSession::new();
    let mut inventory = MemoryInventory::new();
    inventory.set_stock("eth-74158", 5.0);

    session
        .deduct_green_stock(&mut inventory, "eth-74158", 250.0)
        .unwrap();
    assert!((inventory.stock("eth-74158").unwrap() - 4.75).abs() < 1e-9);

    assert!(
        session
            .deduct_green_stock(&mut inventory, "unknown", 250.0)
            .is_err()
    );
}

#[test]
fn builder_rejects_bad_tunables() {
    assert!(
        RoastSession::builder()
            .with_cfg(SessionCfg {
                ror_window_secs: 0,
                ..SessionCfg::default()
            })
            .build()
            .is_err()
    );
    assert!(
        RoastSession::builder()
            .with_cfg(SessionCfg {
                target_dtr_pct: 100.0,
                ..SessionCfg::default()
            })
            .build()
            .is_err()
    );
    assert!(
        RoastSession::builder()
            .with_cfg(SessionCfg {
                yellow_temp_c: f64::NAN,
                ..SessionCfg::default()
            })
            .build()
            .is_err()
    );
    assert!(
        RoastSession::builder()
            .with_cfg(SessionCfg {
                ror_window_secs: 30,
                target_dtr_pct: 15.0,
                yellow_temp_c: 150.0,
            })
            .build()
            .is_ok()
    );
}

#[test]
fn yellow_threshold_flows_into_the_ratio_split() {
    let clock = ManualClock::new();
    let mut session = RoastSession::builder()
        .with_clock(Arc::new(clock.clone()))
        .with_cfg(SessionCfg {
            yellow_temp_c: 150.0,
            ..SessionCfg::default()
        })
        .build()
        .unwrap();

    session.start();
    session.add_reading(120.0);
    clock.advance_secs(100);
    session.add_reading(160.0); // crosses 140 at t=50, 150 at t=75
    clock.advance_secs(300);
    session.record_milestone("1st Crack", 196.0, EventType::PhaseChange);
    clock.advance_secs(100);

    // With the 150 °C threshold the drying phase ends at the 75 s estimate,
    // not the default 140 °C crossing at 50 s.
    let r = session.metrics().ratios;
    assert!((r.drying - 15.0).abs() < 1e-9);
    assert!((r.maillard - 65.0).abs() < 1e-9);
    assert!((r.development - 20.0).abs() < 1e-9);
}

#[test]
fn estimated_end_follows_the_configured_target() {
    let clock = ManualClock::new();
    let mut session = RoastSession::builder()
        .with_clock(Arc::new(clock.clone()))
        .with_cfg(SessionCfg {
            target_dtr_pct: 25.0,
            ..SessionCfg::default()
        })
        .build()
        .unwrap();

    session.start();
    session.add_reading(180.0);
    assert_eq!(session.metrics().estimated_end_secs, None);

    clock.advance_secs(600);
    session.record_milestone("1st Crack", 196.0, EventType::PhaseChange);
    // 600 / (1 - 0.25)
    assert!((session.metrics().estimated_end_secs.unwrap() - 800.0).abs() < 1e-9);
}
