use super::types::{CandidateShift, Issue, IssueKind, Severity, ValidationReport};
use super::util;
use crate::config::Rules;
use crate::error::RosterError;
use crate::hours::{continuous_minutes, project_weekly_hours, ShiftEdit};
use crate::model::{required_workers, Roster, Shift, WorkerId};
use crate::time::{format_minutes, ranges_overlap, rest_gap_minutes, span_minutes};

/// Contexte commun aux vérifications d'un candidat.
pub(super) struct Ctx<'a> {
    pub roster: &'a Roster,
    pub candidate: &'a CandidateShift,
    pub rules: &'a Rules,
    /// Version actuellement enregistrée du créneau édité.
    pub editing: Option<&'a Shift>,
}

impl Ctx<'_> {
    fn is_candidate(&self, shift: &Shift) -> bool {
        self.candidate.id.as_ref() == Some(&shift.id)
    }
}

pub(super) fn check_zero_length(ctx: &Ctx<'_>, report: &mut ValidationReport) -> bool {
    let c = ctx.candidate;
    if c.start_time != c.end_time {
        return false;
    }
    report.push(
        Severity::Error,
        Issue {
            kind: IssueKind::ZeroLength,
            worker: None,
            message: format!(
                "Shift starts and ends at {}; zero-length shifts are not allowed",
                c.start_time
            ),
        },
    );
    true
}

/// Id absent de la liste des workers : refusé, jamais vérifié à l'aveugle.
pub(super) fn check_unknown_worker(worker: &WorkerId, report: &mut ValidationReport) {
    report.push(
        Severity::Error,
        Issue {
            kind: IssueKind::UnknownWorker,
            worker: Some(worker.clone()),
            message: RosterError::UnknownWorker(worker.as_str().to_string()).to_string(),
        },
    );
}

pub(super) fn check_duplicate(worker: &WorkerId, name: &str, report: &mut ValidationReport) {
    report.push(
        Severity::Error,
        Issue {
            kind: IssueKind::DuplicateWorker,
            worker: Some(worker.clone()),
            message: format!("{name} is assigned to this shift more than once"),
        },
    );
}

/// Sous-effectif : avertissement seulement.
pub(super) fn check_ratio(ctx: &Ctx<'_>, assigned: usize, report: &mut ValidationReport) {
    let ratio = ctx.candidate.ratio.trim();
    let Some(required) = required_workers(ratio) else {
        return;
    };
    if assigned < required {
        report.push(
            Severity::Warning,
            Issue {
                kind: IssueKind::Understaffed,
                worker: None,
                message: format!(
                    "Ratio {ratio} requires {required} workers but only {assigned} assigned"
                ),
            },
        );
    }
}

/// Double réservation le même jour.
///
/// Tout chevauchement est une erreur, quel que soit le participant. Sans
/// chevauchement, le bout à bout exact chez le même participant est un
/// créneau fractionné valide (avertissement).
pub(super) fn check_double_booking(
    ctx: &Ctx<'_>,
    worker: &WorkerId,
    name: &str,
    report: &mut ValidationReport,
) {
    let c = ctx.candidate;
    for (participant, shift) in ctx.roster.shifts_on(c.date) {
        if ctx.is_candidate(shift) || !shift.has_worker(worker) {
            continue;
        }
        let same_participant = participant == c.participant;

        if !ranges_overlap(shift.start_time, shift.end_time, c.start_time, c.end_time) {
            let back_to_back = shift.end_time == c.start_time || c.end_time == shift.start_time;
            if same_participant && back_to_back && ctx.rules.warn_back_to_back {
                report.push(
                    Severity::Warning,
                    Issue {
                        kind: IssueKind::BackToBack,
                        worker: Some(worker.clone()),
                        message: format!(
                            "{name} works back-to-back shifts for {participant}: {}-{} and {}-{}",
                            shift.start_time, shift.end_time, c.start_time, c.end_time
                        ),
                    },
                );
            }
            continue;
        }

        let message = if same_participant {
            format!(
                "{name} already has an overlapping shift for {participant} from {} to {} on {}",
                shift.start_time, shift.end_time, c.date
            )
        } else {
            format!(
                "{name} is already working for {participant} from {} to {} on {}",
                shift.start_time, shift.end_time, c.date
            )
        };
        report.push(
            Severity::Error,
            Issue {
                kind: IssueKind::DoubleBooking,
                worker: Some(worker.clone()),
                message,
            },
        );
    }
}

/// Repos minimal avec les créneaux de la veille et du lendemain.
/// Aucune pause minimale n'est exigée entre deux créneaux du même jour.
pub(super) fn check_rest(
    ctx: &Ctx<'_>,
    worker: &WorkerId,
    name: &str,
    report: &mut ValidationReport,
) {
    let c = ctx.candidate;
    let min_rest = i64::from(ctx.rules.min_rest_minutes);
    let here = format!("{} {}-{} on {}", c.participant, c.start_time, c.end_time, c.date);

    if let Some(prev) = c.date.pred_opt() {
        for (participant, shift) in ctx.roster.shifts_on(prev) {
            if ctx.is_candidate(shift) || !shift.has_worker(worker) {
                continue;
            }
            let gap = rest_gap_minutes(shift.start_time, shift.end_time, c.start_time);
            if gap < min_rest {
                let there = util::describe_shift(participant, prev, shift);
                push_rest(report, worker, name, &there, &here, gap, min_rest);
            }
        }
    }

    if let Some(next) = c.date.succ_opt() {
        for (participant, shift) in ctx.roster.shifts_on(next) {
            if ctx.is_candidate(shift) || !shift.has_worker(worker) {
                continue;
            }
            let gap = rest_gap_minutes(c.start_time, c.end_time, shift.start_time);
            if gap < min_rest {
                let there = util::describe_shift(participant, next, shift);
                push_rest(report, worker, name, &here, &there, gap, min_rest);
            }
        }
    }
}

fn push_rest(
    report: &mut ValidationReport,
    worker: &WorkerId,
    name: &str,
    earlier: &str,
    later: &str,
    gap: i64,
    min_rest: i64,
) {
    report.push(
        Severity::Error,
        Issue {
            kind: IssueKind::RestViolation,
            worker: Some(worker.clone()),
            message: format!(
                "Insufficient rest for {name}: {earlier} then {later} leaves {} (minimum {})",
                format_minutes(gap),
                format_minutes(min_rest)
            ),
        },
    );
}

/// Heures continues : erreur au-delà du seuil haut, avertissement entre les deux.
pub(super) fn check_continuous(
    ctx: &Ctx<'_>,
    worker: &WorkerId,
    name: &str,
    report: &mut ValidationReport,
) {
    let c = ctx.candidate;
    let total = continuous_minutes(
        ctx.roster,
        worker,
        c.date,
        c.start_time,
        c.end_time,
        c.id.as_ref(),
    );
    let (severity, limit_word, limit) = if total >= ctx.rules.continuous_error_minutes {
        (Severity::Error, "limit", ctx.rules.continuous_error_minutes)
    } else if total >= ctx.rules.continuous_warning_minutes {
        (Severity::Warning, "warning at", ctx.rules.continuous_warning_minutes)
    } else {
        return;
    };

    report.push(
        severity,
        Issue {
            kind: IssueKind::ContinuousHours,
            worker: Some(worker.clone()),
            message: format!(
                "{name} would work {} continuously ({limit_word} {})",
                format_minutes(i64::from(total)),
                format_minutes(i64::from(limit))
            ),
        },
    );
}

/// Plafond hebdomadaire, via la projection qui exclut le créneau édité.
pub(super) fn check_weekly_cap(
    ctx: &Ctx<'_>,
    worker: &WorkerId,
    name: &str,
    max_hours: Option<f64>,
    report: &mut ValidationReport,
) {
    let Some(max_hours) = max_hours else {
        return;
    };
    let c = ctx.candidate;
    let edit = ShiftEdit {
        editing: ctx.editing,
        date: c.date,
        workers: &c.workers,
        duration_minutes: span_minutes(c.start_time, c.end_time),
    };
    let projection = project_weekly_hours(ctx.roster, worker, &edit);
    if projection.projected_hours() > max_hours {
        report.push(
            Severity::Error,
            Issue {
                kind: IssueKind::WeeklyCap,
                worker: Some(worker.clone()),
                message: format!(
                    "{name} would reach {} this week, over the {} limit",
                    format_minutes(i64::from(projection.projected_minutes)),
                    util::format_cap(max_hours)
                ),
            },
        );
    }
}
