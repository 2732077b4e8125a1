use crate::model::{Shift, Worker, WorkerId};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Nom affiché dans les messages ; l'id si le worker est inconnu.
pub(super) fn worker_label<'a>(worker: Option<&'a Worker>, id: &'a WorkerId) -> &'a str {
    worker.map_or(id.as_str(), |w| w.full_name.as_str())
}

/// Ids uniques dans l'ordre d'apparition, et ids répétés.
pub(super) fn split_duplicates(ids: &[WorkerId]) -> (Vec<&WorkerId>, Vec<&WorkerId>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut repeated = Vec::new();
    for id in ids {
        if seen.insert(id) {
            unique.push(id);
        } else if !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    (unique, repeated)
}

pub(super) fn describe_shift(participant: &str, date: NaiveDate, shift: &Shift) -> String {
    format!(
        "{participant} {}-{} on {date}",
        shift.start_time, shift.end_time
    )
}

pub(super) fn format_cap(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}h")
    } else {
        format!("{hours}h")
    }
}
