use crate::model::{AvailabilityRule, UnavailabilityPeriod, WorkerId};
use crate::time::{normalized_bounds, TimeOfDay};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Disponibilités chargées : règles hebdomadaires et périodes d'absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub rules: Vec<AvailabilityRule>,
    pub unavailability: Vec<UnavailabilityPeriod>,
}

impl Availability {
    pub fn new(rules: Vec<AvailabilityRule>, unavailability: Vec<UnavailabilityPeriod>) -> Self {
        Self {
            rules,
            unavailability,
        }
    }

    pub fn is_available(
        &self,
        worker: &WorkerId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> bool {
        is_available(worker, date, start, end, &self.rules, &self.unavailability)
    }
}

/// Le créneau `[start, end)` du `date` tient-il dans les disponibilités du
/// worker ?
///
/// Une absence couvrant la date l'emporte sur tout. Sans règle pour le jour
/// de semaine, le worker est indisponible : chaque jour doit être ouvert
/// explicitement. Le créneau doit tenir entièrement dans une seule plage ;
/// un chevauchement partiel ne suffit pas.
pub fn is_available(
    worker: &WorkerId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    rules: &[AvailabilityRule],
    unavailability: &[UnavailabilityPeriod],
) -> bool {
    if unavailability
        .iter()
        .any(|p| &p.worker_id == worker && p.covers(date))
    {
        return false;
    }

    let weekday = date.weekday();
    let mut day_rules = rules
        .iter()
        .filter(|r| &r.worker_id == worker && r.weekday == weekday)
        .peekable();

    if day_rules.peek().is_none() {
        return false;
    }

    day_rules.any(|rule| rule.covers_whole_day() || window_contains(rule, start, end))
}

fn window_contains(rule: &AvailabilityRule, start: TimeOfDay, end: TimeOfDay) -> bool {
    let (w_start, w_end) = normalized_bounds(rule.from_time, rule.to_time);
    let (c_start, c_end) = normalized_bounds(start, end);
    w_start <= c_start && c_end <= w_end
}
