//! Filtre des workers sélectionnables pour un créneau, recalculé à chaque
//! modification des champs du formulaire.
//!
//! Plus strict que la validation finale : un worker déjà présent sur un
//! autre créneau du même jour est écarté, chevauchement ou non.

use crate::availability::Availability;
use crate::config::Rules;
use crate::model::{Roster, Shift, ShiftId, Worker, WorkerId};
use crate::time::{rest_gap_minutes, TimeOfDay};
use chrono::NaiveDate;
use tracing::{debug, trace};

/// Créneau visé par la sélection.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Créneau en cours d'édition, ignoré dans les balayages.
    pub editing: Option<&'a ShiftId>,
}

/// Workers sélectionnables, triés par nom d'usage.
///
/// Sans disponibilités chargées, personne n'est proposé.
pub fn eligible_workers<'w>(
    workers: &'w [Worker],
    roster: &Roster,
    availability: Option<&Availability>,
    slot: &Slot<'_>,
    rules: &Rules,
) -> Vec<&'w Worker> {
    let Some(availability) = availability else {
        debug!(date = %slot.date, "availability not loaded, no eligible worker");
        return Vec::new();
    };

    let mut eligible: Vec<&Worker> = workers
        .iter()
        .filter(|w| {
            if !availability.is_available(&w.id, slot.date, slot.start_time, slot.end_time) {
                trace!(worker = w.id.as_str(), "dropped: unavailable");
                return false;
            }
            if works_same_day(roster, &w.id, slot) {
                trace!(worker = w.id.as_str(), "dropped: already rostered that day");
                return false;
            }
            if lacks_rest(roster, &w.id, slot, rules) {
                trace!(worker = w.id.as_str(), "dropped: insufficient rest");
                return false;
            }
            true
        })
        .collect();

    eligible.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });

    debug!(
        date = %slot.date,
        candidates = workers.len(),
        eligible = eligible.len(),
        "eligible workers computed"
    );
    eligible
}

fn works_same_day(roster: &Roster, worker: &WorkerId, slot: &Slot<'_>) -> bool {
    roster
        .shifts_on(slot.date)
        .any(|(_, s)| Some(&s.id) != slot.editing && s.has_worker(worker))
}

fn lacks_rest(roster: &Roster, worker: &WorkerId, slot: &Slot<'_>, rules: &Rules) -> bool {
    let min_rest = i64::from(rules.min_rest_minutes);
    let mine = |s: &&Shift| Some(&s.id) != slot.editing && s.has_worker(worker);

    let before = slot.date.pred_opt().is_some_and(|prev| {
        roster
            .shifts_on(prev)
            .map(|(_, s)| s)
            .filter(mine)
            .any(|s| rest_gap_minutes(s.start_time, s.end_time, slot.start_time) < min_rest)
    });
    let after = slot.date.succ_opt().is_some_and(|next| {
        roster
            .shifts_on(next)
            .map(|(_, s)| s)
            .filter(mine)
            .any(|s| rest_gap_minutes(slot.start_time, slot.end_time, s.start_time) < min_rest)
    });
    before || after
}
