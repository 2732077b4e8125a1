//! Frontière d'ingestion : formes JSON du backend → modèle canonique.
//!
//! - ids numériques ou textuels → `WorkerId`/`ShiftId` textuels ;
//! - jour de semaine backend (0 = dimanche) → `chrono::Weekday` ;
//! - disponibilités absentes (`null`) → non chargées, le filtre refuse tout.

use crate::availability::Availability;
use crate::error::RosterError;
use crate::model::{AvailabilityRule, Roster, UnavailabilityPeriod, Worker, WorkerId};
use crate::time::TimeOfDay;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Id tel qu'il arrive du backend : nombre ou chaîne.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

/// Date `YYYY-MM-DD` saisie hors snapshot (ligne de commande).
pub fn parse_date(s: &str) -> Result<NaiveDate, RosterError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| RosterError::InvalidDate(s.to_string()))
}

/// Convention backend : 0 = dimanche .. 6 = samedi.
pub fn weekday_from_sunday_index(index: u8) -> Result<Weekday, RosterError> {
    Ok(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        other => return Err(RosterError::InvalidWeekday(other)),
    })
}

pub fn weekday_to_sunday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Convention ISO interne à l'UI : 0 = lundi .. 6 = dimanche.
pub fn weekday_from_monday_index(index: u8) -> Result<Weekday, RosterError> {
    const ISO: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    ISO.get(usize::from(index))
        .copied()
        .ok_or(RosterError::InvalidWeekday(index))
}

/// Règle de disponibilité au format backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendAvailabilityRule {
    pub worker_id: WorkerId,
    pub weekday: u8,
    #[serde(default)]
    pub from_time: Option<TimeOfDay>,
    #[serde(default)]
    pub to_time: Option<TimeOfDay>,
    #[serde(default)]
    pub is_full_day: bool,
    #[serde(default)]
    pub sequence_number: Option<u8>,
}

impl BackendAvailabilityRule {
    /// Les horaires ne sont facultatifs que pour une journée entière ; une
    /// plage partielle sans bornes est refusée plutôt qu'élargie à 24h.
    pub fn into_rule(self) -> Result<AvailabilityRule, RosterError> {
        let weekday = weekday_from_sunday_index(self.weekday)?;
        let (from_time, to_time) = match (self.from_time, self.to_time) {
            (Some(from), Some(to)) => (from, to),
            _ if self.is_full_day => (TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT),
            _ => {
                return Err(RosterError::IncompleteRule {
                    worker: self.worker_id.as_str().to_string(),
                    weekday: self.weekday,
                })
            }
        };
        Ok(AvailabilityRule {
            worker_id: self.worker_id,
            weekday,
            from_time,
            to_time,
            is_full_day: self.is_full_day,
            sequence_number: self.sequence_number.unwrap_or(1),
        })
    }
}

impl From<&AvailabilityRule> for BackendAvailabilityRule {
    fn from(rule: &AvailabilityRule) -> Self {
        Self {
            worker_id: rule.worker_id.clone(),
            weekday: weekday_to_sunday_index(rule.weekday),
            from_time: Some(rule.from_time),
            to_time: Some(rule.to_time),
            is_full_day: rule.is_full_day,
            sequence_number: Some(rule.sequence_number),
        }
    }
}

/// Fichier snapshot tel qu'échangé avec le stockage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    workers: Vec<Worker>,
    #[serde(default)]
    availability: Option<Vec<BackendAvailabilityRule>>,
    #[serde(default)]
    unavailability: Option<Vec<UnavailabilityPeriod>>,
    #[serde(default)]
    roster: Roster,
}

/// Instantané fourni au moteur pour un appel de validation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub workers: Vec<Worker>,
    /// `None` tant que les disponibilités ne sont pas chargées.
    pub availability: Option<Availability>,
    /// Absences telles que lues, réécrites à l'identique même quand les
    /// règles ne sont pas chargées.
    pub unavailability: Option<Vec<UnavailabilityPeriod>>,
    pub roster: Roster,
}

impl Snapshot {
    pub fn find_worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }
}

/// Parse un snapshot JSON (formes backend).
pub fn parse_snapshot(data: &[u8]) -> Result<Snapshot, RosterError> {
    let file: SnapshotFile = serde_json::from_slice(data)?;
    let availability = match file.availability {
        Some(rules) => {
            let rules = rules
                .into_iter()
                .map(BackendAvailabilityRule::into_rule)
                .collect::<Result<Vec<_>, _>>()?;
            Some(Availability::new(
                rules,
                file.unavailability.clone().unwrap_or_default(),
            ))
        }
        None => None,
    };
    Ok(Snapshot {
        workers: file.workers,
        availability,
        unavailability: file.unavailability,
        roster: file.roster,
    })
}

/// Sérialise un snapshot vers les formes backend (JSON indenté).
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<Vec<u8>, RosterError> {
    let file = SnapshotFile {
        workers: snapshot.workers.clone(),
        availability: snapshot
            .availability
            .as_ref()
            .map(|a| a.rules.iter().map(BackendAvailabilityRule::from).collect()),
        unavailability: snapshot.unavailability.clone(),
        roster: snapshot.roster.clone(),
    };
    Ok(serde_json::to_vec_pretty(&file)?)
}
