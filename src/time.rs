//! Arithmétique horaire à la minute, avec plages qui passent minuit.
//!
//! Une plage `start..end` où `end < start` se termine le lendemain.

use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Heure de la journée, en minutes depuis minuit (0..=1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(u16::from(hour) * 60 + u16::from(minute)))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = RosterError;

    /// Accepte `HH:MM` et `HH:MM:SS` (les secondes sont ignorées).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RosterError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');
        let hour: u8 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u8 = parts
            .next()
            .filter(|m| m.len() == 2)
            .and_then(|m| m.parse().ok())
            .ok_or_else(invalid)?;
        if let Some(sec) = parts.next() {
            if sec.parse::<u8>().map_or(true, |v| v >= 60) {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Minutes écoulées depuis minuit.
pub fn time_to_minutes(t: TimeOfDay) -> u32 {
    t.minutes()
}

/// Longueur de la plage en minutes, `(end - start) mod 1440`.
///
/// Une plage de longueur nulle vaut 0, pas 24h : les créneaux `start == end`
/// sont refusés à la validation au lieu d'être réinterprétés.
pub fn span_minutes(start: TimeOfDay, end: TimeOfDay) -> u32 {
    (end.minutes() + MINUTES_PER_DAY - start.minutes()) % MINUTES_PER_DAY
}

/// Durée en heures.
pub fn duration_hours(start: TimeOfDay, end: TimeOfDay) -> f64 {
    f64::from(span_minutes(start, end)) / 60.0
}

/// Bornes absolues `[start, end)` en minutes, `end` décalé d'un jour si la
/// plage passe minuit.
pub fn normalized_bounds(start: TimeOfDay, end: TimeOfDay) -> (u32, u32) {
    let s = start.minutes();
    let mut e = end.minutes();
    if e < s {
        e += MINUTES_PER_DAY;
    }
    (s, e)
}

/// Chevauchement semi-ouvert de deux plages du même jour.
pub fn ranges_overlap(s1: TimeOfDay, e1: TimeOfDay, s2: TimeOfDay, e2: TimeOfDay) -> bool {
    let (a_start, a_end) = normalized_bounds(s1, e1);
    let (b_start, b_end) = normalized_bounds(s2, e2);
    a_start < b_end && b_start < a_end
}

/// Repos entre la fin d'un créneau la veille et le début d'un créneau le
/// lendemain : `(later_start + 1440) - earlier_end`.
pub fn cross_day_gap(earlier_end: TimeOfDay, later_start: TimeOfDay) -> i64 {
    i64::from(later_start.minutes()) + i64::from(MINUTES_PER_DAY) - i64::from(earlier_end.minutes())
}

/// Repos réel entre un créneau du jour J et un créneau du jour J+1.
///
/// Identique à [`cross_day_gap`] sauf si le créneau de la veille passe
/// minuit : il finit alors le jour J+1 et le repos diminue d'autant. Peut
/// être négatif si les deux créneaux se recouvrent.
pub fn rest_gap_minutes(
    earlier_start: TimeOfDay,
    earlier_end: TimeOfDay,
    later_start: TimeOfDay,
) -> i64 {
    let (_, end_abs) = normalized_bounds(earlier_start, earlier_end);
    i64::from(later_start.minutes()) + i64::from(MINUTES_PER_DAY) - i64::from(end_abs)
}

/// Formate une durée en minutes en `7h` ou `7h 30m`.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let m = minutes.abs();
    match m % 60 {
        0 => format!("{sign}{}h", m / 60),
        rest => format!("{sign}{}h {rest}m", m / 60),
    }
}
