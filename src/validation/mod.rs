mod checks;
mod types;
mod util;

pub use types::{CandidateShift, Issue, IssueKind, Severity, ValidationReport};

use crate::config::Rules;
use crate::eligibility;
use crate::hours::{self, HoursProjection, ShiftEdit};
use crate::io::Snapshot;
use crate::model::{Roster, ShiftId, Worker, WorkerId};
use crate::time::{span_minutes, TimeOfDay};
use chrono::NaiveDate;
use checks::Ctx;
use tracing::debug;

/// Valide un candidat contre le roster complet.
///
/// Ne modifie rien : deux appels sur le même instantané donnent le même
/// rapport. Un worker absent de `workers` est une erreur bloquante et
/// n'est pas vérifié plus avant.
pub fn validate_shift(
    roster: &Roster,
    workers: &[Worker],
    candidate: &CandidateShift,
    rules: &Rules,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let ctx = Ctx {
        roster,
        candidate,
        rules,
        editing: candidate
            .id
            .as_ref()
            .and_then(|id| roster.find_shift(id))
            .map(|(_, shift)| shift),
    };

    let zero_length = checks::check_zero_length(&ctx, &mut report);

    let (unique, repeated) = util::split_duplicates(&candidate.workers);
    checks::check_ratio(&ctx, unique.len(), &mut report);

    for id in &unique {
        if !workers.iter().any(|w| &w.id == *id) {
            checks::check_unknown_worker(id, &mut report);
        }
    }

    for id in repeated {
        let worker = workers.iter().find(|w| &w.id == id);
        checks::check_duplicate(id, util::worker_label(worker, id), &mut report);
    }

    // les vérifications horaires n'ont pas de sens sur un créneau vide
    if !zero_length {
        for id in &unique {
            let Some(worker) = workers.iter().find(|w| &w.id == *id) else {
                continue;
            };
            let name = worker.full_name.as_str();
            checks::check_double_booking(&ctx, id, name, &mut report);
            checks::check_rest(&ctx, id, name, &mut report);
            checks::check_continuous(&ctx, id, name, &mut report);
            checks::check_weekly_cap(&ctx, id, name, worker.max_hours, &mut report);
        }
    }

    debug!(
        shift = candidate.id.as_ref().map(|id| id.as_str()),
        participant = candidate.participant.as_str(),
        date = %candidate.date,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "shift validated"
    );
    report
}

/// Vue du moteur sur un instantané : validation, filtre des workers et heures.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    snapshot: &'a Snapshot,
    rules: Rules,
}

impl<'a> Validator<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            rules: Rules::default(),
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn validate(&self, candidate: &CandidateShift) -> ValidationReport {
        validate_shift(
            &self.snapshot.roster,
            &self.snapshot.workers,
            candidate,
            &self.rules,
        )
    }

    pub fn eligible_workers(
        &self,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
        editing: Option<&ShiftId>,
    ) -> Vec<&'a Worker> {
        let slot = eligibility::Slot {
            date,
            start_time: start,
            end_time: end,
            editing,
        };
        eligibility::eligible_workers(
            &self.snapshot.workers,
            &self.snapshot.roster,
            self.snapshot.availability.as_ref(),
            &slot,
            &self.rules,
        )
    }

    pub fn weekly_hours(&self, worker: &WorkerId, date: NaiveDate) -> f64 {
        hours::weekly_hours(&self.snapshot.roster, worker, date, None)
    }

    /// Projection des heures de `worker` si `candidate` est accepté.
    pub fn project_hours(&self, worker: &WorkerId, candidate: &CandidateShift) -> HoursProjection {
        let roster = &self.snapshot.roster;
        let editing = candidate
            .id
            .as_ref()
            .and_then(|id| roster.find_shift(id))
            .map(|(_, s)| s);
        let edit = ShiftEdit {
            editing,
            date: candidate.date,
            workers: &candidate.workers,
            duration_minutes: span_minutes(candidate.start_time, candidate.end_time),
        };
        hours::project_weekly_hours(roster, worker, &edit)
    }
}
