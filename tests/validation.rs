#![forbid(unsafe_code)]
mod common;

use common::{d, roster, shift, t, workers};
use shiftguard::{validate_shift, CandidateShift, IssueKind, Rules, Worker};

fn candidate(participant: &str, date: &str, start: &str, end: &str, ws: &[&str]) -> CandidateShift {
    CandidateShift::new(participant, d(date), t(start), t(end)).with_workers(ws.iter().copied())
}

#[test]
fn ratio_understaffing_is_a_single_warning() {
    let r = roster(vec![]);
    let c = candidate("P1", "2025-10-06", "09:00", "13:00", &["w1"]).with_ratio("2:1");
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.is_valid);
    assert_eq!(report.warnings.len(), 1);
    let msg = &report.warnings[0].message;
    assert!(msg.contains("2:1") && msg.contains('1'));
    insta::assert_snapshot!(msg, @"Ratio 2:1 requires 2 workers but only 1 assigned");

    let c = c.with_workers(["w1", "w2"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(!report.has_warning(IssueKind::Understaffed));
}

#[test]
fn back_to_back_same_participant_is_not_an_error() {
    let r = roster(vec![("P", shift("a", "2025-10-06", "09:00", "13:00", &["w1"]))]);
    let b = candidate("P", "2025-10-06", "13:00", "17:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &b, &Rules::default());
    assert!(report.is_valid, "{:?}", report.errors);
    assert!(report.has_warning(IssueKind::BackToBack));

    let quiet = Rules {
        warn_back_to_back: false,
        ..Rules::default()
    };
    let report = validate_shift(&r, &workers(), &b, &quiet);
    assert!(report.warnings.is_empty());
}

#[test]
fn cross_participant_overlap_names_the_other_participant() {
    let r = roster(vec![("P", shift("a", "2025-10-06", "09:00", "13:00", &["w1"]))]);
    let c = candidate("Q", "2025-10-06", "10:00", "11:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, IssueKind::DoubleBooking);
    insta::assert_snapshot!(
        report.errors[0].message.as_str(),
        @"Alice Martin is already working for P from 09:00 to 13:00 on 2025-10-06"
    );
}

#[test]
fn same_participant_overlap_is_an_error() {
    let r = roster(vec![("P", shift("a", "2025-10-06", "09:00", "13:00", &["w1"]))]);
    let c = candidate("P", "2025-10-06", "12:00", "15:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.has_error(IssueKind::DoubleBooking));
}

#[test]
fn rest_boundary_is_strict() {
    let r = roster(vec![("P", shift("late", "2025-10-06", "15:00", "23:00", &["w1"]))]);

    let early = candidate("Q", "2025-10-07", "06:00", "12:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &early, &Rules::default());
    assert!(report.has_error(IssueKind::RestViolation));
    insta::assert_snapshot!(
        report.errors[0].message.as_str(),
        @"Insufficient rest for Alice Martin: P 15:00-23:00 on 2025-10-06 then Q 06:00-12:00 on 2025-10-07 leaves 7h (minimum 8h)"
    );

    let on_time = candidate("Q", "2025-10-07", "07:00", "12:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &on_time, &Rules::default());
    assert!(!report.has_error(IssueKind::RestViolation));
}

#[test]
fn rest_is_checked_towards_the_next_day_too() {
    let r = roster(vec![("P", shift("next", "2025-10-07", "06:00", "10:00", &["w2"]))]);
    let c = candidate("Q", "2025-10-06", "16:00", "23:30", &["w2"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.has_error(IssueKind::RestViolation));
}

#[test]
fn same_day_shifts_need_no_break() {
    let r = roster(vec![("P", shift("a", "2025-10-06", "07:00", "09:00", &["w1"]))]);
    let c = candidate("Q", "2025-10-06", "09:30", "12:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn continuous_hours_warn_then_block() {
    let r = roster(vec![
        ("P", shift("a", "2025-10-06", "06:00", "12:00", &["w1"])),
        ("Q", shift("b", "2025-10-06", "12:00", "18:00", &["w1"])),
    ]);

    let twelve = candidate("R", "2025-10-06", "18:00", "19:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &twelve, &Rules::default());
    assert!(report.is_valid);
    assert!(report.has_warning(IssueKind::ContinuousHours));

    let sixteen = candidate("R", "2025-10-06", "18:00", "22:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &sixteen, &Rules::default());
    assert!(report.has_error(IssueKind::ContinuousHours));
    insta::assert_snapshot!(
        report.errors[0].message.as_str(),
        @"Alice Martin would work 16h continuously (limit 16h)"
    );
}

#[test]
fn weekly_cap_uses_edit_aware_projection() {
    let mut ws = workers();
    ws[0] = Worker::new("w1", "Alice Martin").with_max_hours(22.0);
    let r = roster(vec![
        ("P", shift("s1", "2025-10-06", "09:00", "17:00", &["w1"])),
        ("P", shift("s2", "2025-10-07", "09:00", "15:00", &["w1"])),
        ("Q", shift("s3", "2025-10-08", "09:00", "15:00", &["w1"])),
    ]);

    // 20h -> 22h : au plafond, pas au-delà
    let edit = candidate("P", "2025-10-06", "09:00", "19:00", &["w1"]).with_id("s1");
    let report = validate_shift(&r, &ws, &edit, &Rules::default());
    assert!(!report.has_error(IssueKind::WeeklyCap), "{:?}", report.errors);

    let longer = candidate("P", "2025-10-06", "09:00", "19:30", &["w1"]).with_id("s1");
    let report = validate_shift(&r, &ws, &longer, &Rules::default());
    assert!(report.has_error(IssueKind::WeeklyCap));
    insta::assert_snapshot!(
        report.errors[0].message.as_str(),
        @"Alice Martin would reach 22h 30m this week, over the 22h limit"
    );
}

#[test]
fn edited_shift_does_not_conflict_with_itself() {
    let r = roster(vec![("P", shift("s1", "2025-10-06", "09:00", "17:00", &["w1"]))]);
    let edit = candidate("P", "2025-10-06", "10:00", "18:00", &["w1"]).with_id("s1");
    let report = validate_shift(&r, &workers(), &edit, &Rules::default());
    assert!(report.is_valid, "{:?}", report.errors);
    assert!(report.warnings.is_empty());
}

#[test]
fn zero_length_and_duplicates_are_rejected() {
    let r = roster(vec![]);
    let c = candidate("P", "2025-10-06", "08:00", "08:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.has_error(IssueKind::ZeroLength));

    let c = candidate("P", "2025-10-06", "08:00", "10:00", &["w1", "w1"]).with_ratio("2:1");
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.has_error(IssueKind::DuplicateWorker));
    assert!(report.has_warning(IssueKind::Understaffed));
}

#[test]
fn unknown_workers_and_empty_lists_do_not_panic() {
    let r = roster(vec![("P", shift("a", "2025-10-06", "09:00", "13:00", &["ghost"]))]);
    let c = candidate("Q", "2025-10-06", "10:00", "11:00", &["ghost"]);
    let report = validate_shift(&r, &[], &c, &Rules::default());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.has_error(IssueKind::UnknownWorker));

    let empty = candidate("Q", "2025-10-06", "10:00", "11:00", &[]);
    let report = validate_shift(&r, &[], &empty, &Rules::default());
    assert!(report.is_valid);
    assert!(report.has_warning(IssueKind::Understaffed));
}

#[test]
fn unknown_worker_blocks_alongside_known_ones() {
    let r = roster(vec![]);
    let c = candidate("P", "2025-10-06", "09:00", "13:00", &["w1", "ghost"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].worker.as_ref().map(|w| w.as_str()), Some("ghost"));
    insta::assert_snapshot!(report.errors[0].message.as_str(), @"unknown worker: ghost");
}

#[test]
fn overnight_overlap_is_not_hidden_by_a_shared_boundary() {
    // 22:00-09:00 puis 09:00-23:00 : bornes communes, mais 22:00-23:00 se recouvre
    let r = roster(vec![("P", shift("night", "2025-10-06", "22:00", "09:00", &["w1"]))]);
    let c = candidate("P", "2025-10-06", "09:00", "23:00", &["w1"]);
    let report = validate_shift(&r, &workers(), &c, &Rules::default());
    assert!(report.has_error(IssueKind::DoubleBooking));
    assert!(!report.has_warning(IssueKind::BackToBack));
}

#[test]
fn validation_is_idempotent() {
    let r = roster(vec![
        ("P", shift("a", "2025-10-06", "15:00", "23:00", &["w1"])),
        ("Q", shift("b", "2025-10-07", "09:00", "12:00", &["w1"])),
    ]);
    let c = candidate("R", "2025-10-07", "06:00", "10:00", &["w1"]).with_ratio("2:1");
    let first = validate_shift(&r, &workers(), &c, &Rules::default());
    let second = validate_shift(&r, &workers(), &c, &Rules::default());
    assert_eq!(first, second);
    assert_eq!(first.errors.len(), 2);
}
