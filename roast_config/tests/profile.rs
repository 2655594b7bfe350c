use std::io::Write;

use roast_config::load_profile_csv;
use roast_traits::EventType;

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

const HEADER: &str = "timestamp,temperature,gas,damper,event,event_type\n";

#[test]
fn parses_a_full_profile() {
    let f = write_csv(&format!(
        "{HEADER}0,180.0,1.5,70,Charge,start\n60,120.5,,,,\n480,196.0,,,1st Crack,phase_change\n612,205.0,,,Drop,end\n"
    ));
    let rows = load_profile_csv(f.path()).unwrap();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].timestamp, 0);
    assert_eq!(rows[0].gas, Some(1.5));
    assert_eq!(rows[0].damper, Some(70));
    assert_eq!(rows[0].parsed_event_type().unwrap(), Some(EventType::Start));

    assert!(rows[1].gas.is_none());
    assert!(rows[1].event.is_none());
    assert_eq!(rows[1].parsed_event_type().unwrap(), None);

    assert_eq!(rows[2].event.as_deref(), Some("1st Crack"));
    assert_eq!(
        rows[2].parsed_event_type().unwrap(),
        Some(EventType::PhaseChange)
    );
    assert_eq!(rows[3].parsed_event_type().unwrap(), Some(EventType::End));
}

#[test]
fn rejects_wrong_headers() {
    let f = write_csv("time,temp\n0,180.0\n");
    let err = load_profile_csv(f.path()).unwrap_err();
    assert!(err.to_string().contains("headers"));
}

#[test]
fn rejects_decreasing_timestamps() {
    let f = write_csv(&format!("{HEADER}60,120.0,,,,\n30,130.0,,,,\n"));
    let err = load_profile_csv(f.path()).unwrap_err();
    assert!(err.to_string().contains("non-decreasing"));
}

#[test]
fn rejects_event_without_type() {
    let f = write_csv(&format!("{HEADER}0,180.0,,,Charge,\n"));
    assert!(load_profile_csv(f.path()).is_err());
}

#[test]
fn rejects_unknown_event_type() {
    let f = write_csv(&format!("{HEADER}0,180.0,,,Charge,kickoff\n"));
    let err = load_profile_csv(f.path()).unwrap_err();
    assert!(err.to_string().contains("kickoff"));
}

#[test]
fn rejects_empty_profile() {
    let f = write_csv(HEADER);
    assert!(load_profile_csv(f.path()).is_err());
}

#[test]
fn rejects_unparseable_rows() {
    let f = write_csv(&format!("{HEADER}abc,180.0,,,,\n"));
    let err = load_profile_csv(f.path()).unwrap_err();
    assert!(err.to_string().contains("row 2"));
}
