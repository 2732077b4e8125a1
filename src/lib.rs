#![forbid(unsafe_code)]
//! Shiftguard — moteur de validation de rosters d'accompagnement.
//!
//! - Disponibilités hebdomadaires et absences datées.
//! - Heures hebdomadaires sans double comptage du créneau édité.
//! - Conflits : double réservation, repos, heures continues, plafond, ratio.
//! - Fonctions pures sur un instantané fourni par l'appelant ; stockage JSON
//!   fourni à part.

pub mod availability;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod hours;
pub mod io;
pub mod model;
pub mod storage;
pub mod time;
pub mod validation;

pub use availability::{is_available, Availability};
pub use config::Rules;
pub use eligibility::{eligible_workers, Slot};
pub use error::RosterError;
pub use hours::{
    continuous_hours, project_weekly_hours, weekly_hours, AssignmentChange, HoursProjection,
    ShiftEdit,
};
pub use io::{parse_snapshot, Snapshot};
pub use model::{
    AvailabilityRule, Roster, Shift, ShiftId, UnavailabilityPeriod, Worker, WorkerId,
};
pub use storage::{JsonStorage, Storage};
pub use time::TimeOfDay;
pub use validation::{
    validate_shift, CandidateShift, Issue, IssueKind, Severity, ValidationReport, Validator,
};
