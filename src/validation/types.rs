use crate::model::{Shift, ShiftId, WorkerId};
use crate::time::TimeOfDay;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Créneau proposé par une édition (nouveau ou modification d'un existant).
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateShift {
    /// Id du créneau édité ; `None` pour une création.
    pub id: Option<ShiftId>,
    pub participant: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub workers: Vec<WorkerId>,
    pub ratio: String,
}

impl CandidateShift {
    pub fn new<P: Into<String>>(
        participant: P,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Self {
        Self {
            id: None,
            participant: participant.into(),
            date,
            start_time,
            end_time,
            workers: Vec::new(),
            ratio: "1:1".to_string(),
        }
    }

    pub fn with_id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.id = Some(ShiftId::new(id));
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

    /// Applique le candidat sur `base` (champs annexes conservés) ou crée un
    /// nouveau créneau.
    pub fn into_shift(self, base: Option<&Shift>) -> Shift {
        let mut shift = match base {
            Some(b) => b.clone(),
            None => Shift::new(self.date, self.start_time, self.end_time),
        };
        if let Some(id) = self.id {
            shift.id = id;
        }
        shift.date = self.date;
        shift.start_time = self.start_time;
        shift.end_time = self.end_time;
        shift.workers = self.workers;
        shift.ratio = self.ratio;
        shift.refresh_duration();
        shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    ZeroLength,
    UnknownWorker,
    DuplicateWorker,
    Understaffed,
    DoubleBooking,
    BackToBack,
    RestViolation,
    ContinuousHours,
    WeeklyCap,
}

/// Problème détecté sur un candidat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerId>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Résultat d'une validation. Toute erreur bloque l'enregistrement ; les
/// avertissements demandent une confirmation explicite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationReport {
    pub(crate) fn push(&mut self, severity: Severity, issue: Issue) {
        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
        self.is_valid = self.errors.is_empty();
    }

    pub fn needs_confirmation(&self) -> bool {
        self.is_valid && !self.warnings.is_empty()
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|i| i.message.as_str()).collect()
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|i| i.message.as_str()).collect()
    }

    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|i| i.kind == kind)
    }

    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|i| i.kind == kind)
    }
}
