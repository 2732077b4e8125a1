use thiserror::Error;

/// Erreurs de la bibliothèque (parsing à la frontière, recherche d'entités).
///
/// Les conflits de planning ne sont pas des erreurs : ils remontent dans un
/// [`crate::ValidationReport`].
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid time of day: {0} (expected HH:MM)")]
    InvalidTime(String),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid weekday index: {0}")]
    InvalidWeekday(u8),
    #[error("availability rule for worker {worker} (weekday {weekday}) has no time window")]
    IncompleteRule { worker: String, weekday: u8 },
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
