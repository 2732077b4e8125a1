#![forbid(unsafe_code)]
mod common;

use chrono::Weekday;
use common::{d, shift, t};
use shiftguard::{parse_snapshot, JsonStorage, RosterError, ShiftId, Storage, WorkerId};
use std::fs;
use tempfile::tempdir;

const BACKEND_JSON: &str = r#"{
  "workers": [
    { "id": 7, "full_name": "Alice Martin", "max_hours": 38 },
    { "id": "8", "full_name": "Robert Brown (Bob)" }
  ],
  "availability": [
    { "worker_id": 7, "weekday": 1, "from_time": "08:00", "to_time": "18:00", "is_full_day": false, "sequence_number": 1 },
    { "worker_id": "8", "weekday": 0, "from_time": null, "to_time": null, "is_full_day": true }
  ],
  "unavailability": [
    { "worker_id": 8, "from_date": "2025-10-20", "to_date": "2025-10-24", "reason": "leave" }
  ],
  "roster": {
    "P1": {
      "2025-10-06": [
        { "id": 101, "date": "2025-10-06", "startTime": "09:00", "endTime": "17:00",
          "supportType": "Core", "ratio": "1:1", "workers": [7], "duration": 3, "shiftNumber": 1 }
      ]
    }
  }
}"#;

#[test]
fn ingestion_normalises_ids_and_weekdays() {
    let snap = parse_snapshot(BACKEND_JSON.as_bytes()).unwrap();
    assert_eq!(snap.workers[0].id, WorkerId::new("7"));
    assert_eq!(snap.workers[0].max_hours, Some(38.0));

    let avail = snap.availability.as_ref().unwrap();
    assert_eq!(avail.rules[0].weekday, Weekday::Mon);
    assert_eq!(avail.rules[1].weekday, Weekday::Sun);
    assert!(avail.rules[1].covers_whole_day());
    assert_eq!(avail.unavailability[0].worker_id, WorkerId::new("8"));

    let (participant, s) = snap.roster.find_shift(&ShiftId::new("101")).unwrap();
    assert_eq!(participant, "P1");
    assert_eq!(s.workers, vec![WorkerId::new("7")]);
    assert_eq!(s.duration_hours(), 8.0);
}

#[test]
fn missing_availability_stays_unloaded() {
    let snap = parse_snapshot(br#"{ "workers": [], "roster": {} }"#).unwrap();
    assert!(snap.availability.is_none());
}

#[test]
fn invalid_times_are_rejected_at_the_boundary() {
    let bad = BACKEND_JSON.replace("\"17:00\"", "\"25:00\"");
    assert!(parse_snapshot(bad.as_bytes()).is_err());
}

#[test]
fn save_and_merge_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, BACKEND_JSON).unwrap();
    let storage = JsonStorage::open(&path).unwrap();

    // édition : même id, date et horaires changés, durée persistée recalculée
    let mut edited = shift("101", "2025-10-07", "10:00", "12:00", &["7", "8"]);
    edited.duration = 42.0;
    storage.merge_shift("P1", edited).unwrap();
    storage
        .merge_shift("P2", shift("new", "2025-10-07", "13:00", "14:00", &["8"]))
        .unwrap();

    let snap = storage.load().unwrap();
    let days = &snap.roster.participants["P1"];
    assert!(!days.contains_key(&d("2025-10-06")));
    let moved = &days[&d("2025-10-07")][0];
    assert_eq!(moved.start_time, t("10:00"));
    assert_eq!(moved.duration, 2.0);
    assert!(snap.roster.find_shift(&ShiftId::new("new")).is_some());

    // les jours de semaine repartent au format backend
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"weekday\": 0"));
    assert!(snap.availability.is_some());
}

#[test]
fn merge_keeps_unavailability_when_rules_are_not_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{ "workers": [],
             "unavailability": [{ "worker_id": 8, "from_date": "2025-10-20", "to_date": "2025-10-24" }],
             "roster": {} }"#,
    )
    .unwrap();
    let storage = JsonStorage::open(&path).unwrap();
    storage
        .merge_shift("P", shift("x", "2025-10-07", "09:00", "12:00", &["8"]))
        .unwrap();

    let snap = storage.load().unwrap();
    assert!(snap.availability.is_none());
    let periods = snap.unavailability.unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].from_date, d("2025-10-20"));
    assert_eq!(periods[0].worker_id, WorkerId::new("8"));
}

#[test]
fn partial_rule_without_times_is_rejected() {
    let bad = BACKEND_JSON.replace("\"is_full_day\": true", "\"is_full_day\": false");
    let err = parse_snapshot(bad.as_bytes()).unwrap_err();
    assert!(matches!(err, RosterError::IncompleteRule { weekday: 0, .. }), "{err}");
}
