//! Agrégation des heures d'un worker : semaine, delta d'édition, chaîne continue.
//!
//! Le roster est l'unique source des heures assignées. Le créneau en cours
//! d'édition est exclu du balayage dès qu'il existe déjà, sinon ses heures
//! seraient comptées deux fois (roster + projection).

use crate::model::{Roster, Shift, ShiftId, WorkerId};
use crate::time::{span_minutes, TimeOfDay};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

/// Semaine lundi → dimanche contenant `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

/// Minutes assignées à `worker` sur la semaine de `date`, hors `exclude`.
pub fn weekly_minutes(
    roster: &Roster,
    worker: &WorkerId,
    date: NaiveDate,
    exclude: Option<&ShiftId>,
) -> u32 {
    let (monday, sunday) = week_bounds(date);
    roster
        .shifts_between(monday, sunday)
        .filter(|(_, _, s)| s.has_worker(worker) && Some(&s.id) != exclude)
        .map(|(_, _, s)| s.duration_minutes())
        .sum()
}

pub fn weekly_hours(
    roster: &Roster,
    worker: &WorkerId,
    date: NaiveDate,
    exclude: Option<&ShiftId>,
) -> f64 {
    minutes_to_hours(weekly_minutes(roster, worker, date, exclude))
}

fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / 60.0
}

/// Situation d'un worker vis-à-vis d'une édition de créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentChange {
    /// Création : aucun créneau d'origine.
    NewShift,
    Stays,
    Added,
    Removed,
    Uninvolved,
}

/// Édition proposée : créneau d'origine (si existant) et nouvelle version.
#[derive(Debug, Clone, Copy)]
pub struct ShiftEdit<'a> {
    pub editing: Option<&'a Shift>,
    pub date: NaiveDate,
    pub workers: &'a [WorkerId],
    pub duration_minutes: u32,
}

/// Heures hebdomadaires avant/après une édition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoursProjection {
    pub change: AssignmentChange,
    /// Total actuel tel que le roster le montre.
    pub roster_minutes: u32,
    /// Base de calcul (créneau édité exclu le cas échéant).
    pub current_minutes: u32,
    pub projected_minutes: u32,
}

impl HoursProjection {
    pub fn current_hours(&self) -> f64 {
        minutes_to_hours(self.current_minutes)
    }

    pub fn projected_hours(&self) -> f64 {
        minutes_to_hours(self.projected_minutes)
    }

    /// Variation du total hebdomadaire induite par l'édition.
    pub fn delta_hours(&self) -> f64 {
        (f64::from(self.projected_minutes) - f64::from(self.roster_minutes)) / 60.0
    }
}

pub fn classify(worker: &WorkerId, edit: &ShiftEdit<'_>) -> AssignmentChange {
    let Some(original) = edit.editing else {
        return AssignmentChange::NewShift;
    };
    let before = original.has_worker(worker);
    let after = edit.workers.contains(worker);
    match (before, after) {
        (true, true) => AssignmentChange::Stays,
        (false, true) => AssignmentChange::Added,
        (true, false) => AssignmentChange::Removed,
        (false, false) => AssignmentChange::Uninvolved,
    }
}

/// Projette les heures hebdomadaires de `worker` si l'édition est acceptée.
pub fn project_weekly_hours(
    roster: &Roster,
    worker: &WorkerId,
    edit: &ShiftEdit<'_>,
) -> HoursProjection {
    let change = classify(worker, edit);
    let roster_minutes = weekly_minutes(roster, worker, edit.date, None);
    let excluded = edit.editing.map(|s| &s.id);

    let (current_minutes, projected_minutes) = match change {
        AssignmentChange::NewShift => (roster_minutes, roster_minutes + edit.duration_minutes),
        AssignmentChange::Stays | AssignmentChange::Added => {
            let current = weekly_minutes(roster, worker, edit.date, excluded);
            (current, current + edit.duration_minutes)
        }
        AssignmentChange::Removed => {
            let current = weekly_minutes(roster, worker, edit.date, excluded);
            (current, current)
        }
        AssignmentChange::Uninvolved => (roster_minutes, roster_minutes),
    };

    trace!(
        worker = worker.as_str(),
        ?change,
        roster_minutes,
        current_minutes,
        projected_minutes,
        "weekly hours projection"
    );

    HoursProjection {
        change,
        roster_minutes,
        current_minutes,
        projected_minutes,
    }
}

/// Durée (minutes) de la chaîne ininterrompue de créneaux du worker qui
/// contient `[start, end)` le `date`.
///
/// On remonte tant qu'un autre créneau du même jour finit pile au début de
/// la chaîne, et on avance tant qu'un créneau commence pile à sa fin. Chaque
/// créneau n'est visité qu'une fois, ce qui borne le parcours même sur des
/// données qui bouclent.
pub fn continuous_minutes(
    roster: &Roster,
    worker: &WorkerId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    exclude: Option<&ShiftId>,
) -> u32 {
    let same_day: Vec<&Shift> = roster
        .shifts_on(date)
        .map(|(_, s)| s)
        .filter(|s| s.has_worker(worker) && Some(&s.id) != exclude)
        .collect();

    let mut visited: HashSet<usize> = HashSet::new();
    let mut total = span_minutes(start, end);

    let mut chain_start = start;
    while let Some(idx) = (0..same_day.len())
        .find(|i| !visited.contains(i) && same_day[*i].end_time == chain_start)
    {
        visited.insert(idx);
        total += same_day[idx].duration_minutes();
        chain_start = same_day[idx].start_time;
    }

    let mut chain_end = end;
    while let Some(idx) = (0..same_day.len())
        .find(|i| !visited.contains(i) && same_day[*i].start_time == chain_end)
    {
        visited.insert(idx);
        total += same_day[idx].duration_minutes();
        chain_end = same_day[idx].end_time;
    }

    trace!(
        worker = worker.as_str(),
        %date,
        links = visited.len(),
        total,
        "continuous chain"
    );
    total
}

pub fn continuous_hours(
    roster: &Roster,
    worker: &WorkerId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    exclude: Option<&ShiftId>,
) -> f64 {
    minutes_to_hours(continuous_minutes(roster, worker, date, start, end, exclude))
}
