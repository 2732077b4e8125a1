use crate::io::RawId;
use crate::time::{span_minutes, TimeOfDay};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifiant fort pour Worker (les ids numériques sont convertis en texte)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawId> for WorkerId {
    fn from(raw: RawId) -> Self {
        Self::new(String::from(raw))
    }
}

impl From<WorkerId> for String {
    fn from(id: WorkerId) -> Self {
        id.0
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawId> for ShiftId {
    fn from(raw: RawId) -> Self {
        Self::new(String::from(raw))
    }
}

impl From<ShiftId> for String {
    fn from(id: ShiftId) -> Self {
        id.0
    }
}

/// Intervenant (support worker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub full_name: String,
    /// Plafond hebdomadaire en heures.
    #[serde(default)]
    pub max_hours: Option<f64>,
    #[serde(default)]
    pub has_car: bool,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl Worker {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, full_name: N) -> Self {
        Self {
            id: WorkerId::new(id),
            full_name: full_name.into(),
            max_hours: None,
            has_car: false,
            telegram: None,
            skills: Vec::new(),
        }
    }

    pub fn with_max_hours(mut self, hours: f64) -> Self {
        self.max_hours = Some(hours);
        self
    }

    /// Nom d'usage : le prénom entre parenthèses s'il existe
    /// (`"Jonathan Smith (Jon)"` → `"Jon"`), sinon le premier mot.
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if let Some(open) = name.find('(') {
            if let Some(len) = name[open + 1..].find(')') {
                let preferred = name[open + 1..open + 1 + len].trim();
                if !preferred.is_empty() {
                    return preferred;
                }
            }
        }
        name.split_whitespace().next().unwrap_or(name)
    }
}

/// Plage de disponibilité hebdomadaire. Au plus deux plages par jour
/// (`sequence_number` 1 ou 2) pour les disponibilités fractionnées.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub worker_id: WorkerId,
    pub weekday: Weekday,
    pub from_time: TimeOfDay,
    pub to_time: TimeOfDay,
    #[serde(default)]
    pub is_full_day: bool,
    #[serde(default = "default_sequence")]
    pub sequence_number: u8,
}

fn default_sequence() -> u8 {
    1
}

impl AvailabilityRule {
    pub fn window(worker_id: &WorkerId, weekday: Weekday, from: TimeOfDay, to: TimeOfDay) -> Self {
        Self {
            worker_id: worker_id.clone(),
            weekday,
            from_time: from,
            to_time: to,
            is_full_day: false,
            sequence_number: 1,
        }
    }

    pub fn full_day(worker_id: &WorkerId, weekday: Weekday) -> Self {
        Self {
            worker_id: worker_id.clone(),
            weekday,
            from_time: TimeOfDay::MIDNIGHT,
            to_time: TimeOfDay::MIDNIGHT,
            is_full_day: true,
            sequence_number: 1,
        }
    }

    /// Journée entière explicite, ou marqueur dégénéré `from == to`.
    pub fn covers_whole_day(&self) -> bool {
        self.is_full_day || self.from_time == self.to_time
    }
}

/// Période d'indisponibilité, dates incluses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityPeriod {
    pub worker_id: WorkerId,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl UnavailabilityPeriod {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}

/// Créneau d'accompagnement d'un participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub support_type: String,
    #[serde(default = "default_ratio")]
    pub ratio: String,
    #[serde(default)]
    pub workers: Vec<WorkerId>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    /// Copie persistée de la durée, recalculée à chaque écriture.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub is_split_shift: bool,
    #[serde(default)]
    pub shift_number: Option<u32>,
}

fn default_ratio() -> String {
    "1:1".to_string()
}

impl Shift {
    pub fn new(date: NaiveDate, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        let mut shift = Self {
            id: ShiftId::random(),
            date,
            start_time,
            end_time,
            support_type: String::new(),
            ratio: default_ratio(),
            workers: Vec::new(),
            location: String::new(),
            notes: String::new(),
            duration: 0.0,
            locked: false,
            is_split_shift: false,
            shift_number: None,
        };
        shift.refresh_duration();
        shift
    }

    pub fn with_id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.id = ShiftId::new(id);
        self
    }

    pub fn with_workers<I, S>(mut self, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.workers = workers.into_iter().map(WorkerId::new).collect();
        self
    }

    pub fn with_ratio<S: Into<String>>(mut self, ratio: S) -> Self {
        self.ratio = ratio.into();
        self
    }

    /// Durée en minutes, toujours recalculée depuis les horaires.
    pub fn duration_minutes(&self) -> u32 {
        span_minutes(self.start_time, self.end_time)
    }

    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }

    pub fn refresh_duration(&mut self) {
        self.duration = self.duration_hours();
    }

    pub fn has_worker(&self, worker: &WorkerId) -> bool {
        self.workers.iter().any(|w| w == worker)
    }
}

/// Nombre d'intervenants requis : entier en tête du ratio (`"2:1"` → 2).
pub fn required_workers(ratio: &str) -> Option<usize> {
    let head = ratio.trim().split(':').next()?.trim();
    head.parse().ok()
}

/// Roster complet : participant → date → créneaux.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Roster {
    pub participants: BTreeMap<String, BTreeMap<NaiveDate, Vec<Shift>>>,
}

impl Roster {
    /// Tous les créneaux d'une date, tous participants confondus.
    pub fn shifts_on(&self, date: NaiveDate) -> impl Iterator<Item = (&str, &Shift)> + '_ {
        self.participants.iter().flat_map(move |(participant, days)| {
            days.get(&date)
                .into_iter()
                .flatten()
                .map(move |shift| (participant.as_str(), shift))
        })
    }

    /// Créneaux entre deux dates incluses, avec la date du bucket.
    pub fn shifts_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = (&str, NaiveDate, &Shift)> + '_ {
        self.participants.iter().flat_map(move |(participant, days)| {
            days.range(from..=to).flat_map(move |(date, shifts)| {
                shifts.iter().map(move |shift| (participant.as_str(), *date, shift))
            })
        })
    }

    pub fn find_shift(&self, id: &ShiftId) -> Option<(&str, &Shift)> {
        self.participants.iter().find_map(|(participant, days)| {
            days.values()
                .flatten()
                .find(|s| &s.id == id)
                .map(|s| (participant.as_str(), s))
        })
    }

    /// Retire le créneau `id` de tous les buckets ; les buckets vides disparaissent.
    pub fn remove_shift(&mut self, id: &ShiftId) -> Option<Shift> {
        let mut removed = None;
        for days in self.participants.values_mut() {
            for shifts in days.values_mut() {
                if let Some(pos) = shifts.iter().position(|s| &s.id == id) {
                    removed = Some(shifts.remove(pos));
                }
            }
            days.retain(|_, shifts| !shifts.is_empty());
        }
        self.participants.retain(|_, days| !days.is_empty());
        removed
    }

    /// Insère ou remplace (même id) un créneau dans `participant/date`.
    /// Le dernier écrit gagne ; la durée est recalculée.
    pub fn upsert_shift<P: Into<String>>(&mut self, participant: P, mut shift: Shift) {
        self.remove_shift(&shift.id);
        shift.refresh_duration();
        self.participants
            .entry(participant.into())
            .or_default()
            .entry(shift.date)
            .or_default()
            .push(shift);
    }
}
