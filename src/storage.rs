use crate::io::{self, Snapshot};
use crate::model::Shift;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub trait Storage {
    /// Charge un instantané complet (workers, disponibilités, roster).
    fn load(&self) -> anyhow::Result<Snapshot>;
    /// Sauvegarde de manière atomique.
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;

    /// Fusionne un créneau accepté dans `participant/date` ; le dernier écrit gagne.
    fn merge_shift(&self, participant: &str, shift: Shift) -> anyhow::Result<()> {
        let mut snapshot = self.load()?;
        snapshot.roster.upsert_shift(participant, shift);
        self.save(&snapshot)
    }
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Snapshot> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot = io::parse_snapshot(&data)
            .with_context(|| format!("parsing snapshot {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            workers = snapshot.workers.len(),
            participants = snapshot.roster.participants.len(),
            availability_loaded = snapshot.availability.is_some(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let json = io::snapshot_to_json(snapshot)?;
        let mut tmp = NamedTempFile::new_in(
            self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}
