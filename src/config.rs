use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seuils de validation. Tous les champs sont optionnels dans le fichier JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Repos minimal entre deux jours consécutifs.
    pub min_rest_minutes: u32,
    pub continuous_warning_minutes: u32,
    pub continuous_error_minutes: u32,
    /// Signale les créneaux bout à bout pour un même participant.
    pub warn_back_to_back: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_rest_minutes: 8 * 60,
            continuous_warning_minutes: 12 * 60,
            continuous_error_minutes: 16 * 60,
            warn_back_to_back: true,
        }
    }
}

impl Rules {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading rules {}", path.display()))?;
        let rules: Rules = serde_json::from_slice(&data)
            .with_context(|| format!("parsing rules {}", path.display()))?;
        if rules.continuous_warning_minutes > rules.continuous_error_minutes {
            anyhow::bail!("continuous_warning_minutes must not exceed continuous_error_minutes");
        }
        Ok(rules)
    }
}
