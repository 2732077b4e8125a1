#![allow(dead_code)]
use chrono::NaiveDate;
use shiftguard::{Roster, Shift, TimeOfDay, Worker};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

pub fn shift(id: &str, date: &str, start: &str, end: &str, workers: &[&str]) -> Shift {
    Shift::new(d(date), t(start), t(end))
        .with_id(id)
        .with_workers(workers.iter().copied())
}

pub fn roster(entries: Vec<(&str, Shift)>) -> Roster {
    let mut r = Roster::default();
    for (participant, s) in entries {
        r.upsert_shift(participant, s);
    }
    r
}

pub fn workers() -> Vec<Worker> {
    vec![
        Worker::new("w1", "Alice Martin"),
        Worker::new("w2", "Robert Brown (Bob)"),
        Worker::new("w3", "carla Diaz"),
    ]
}
