#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use shiftguard::{
    io::parse_date,
    storage::{JsonStorage, Storage},
    CandidateShift, RosterError, Rules, ShiftId, TimeOfDay, ValidationReport, Validator, WorkerId,
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Validation de rosters sur un instantané JSON
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'instantané (workers, disponibilités, roster)
    #[arg(long, global = true, default_value = "snapshot.json")]
    snapshot: String,

    /// Seuils de validation (JSON, optionnel)
    #[arg(long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct CandidateArgs {
    #[arg(long)]
    participant: String,
    /// YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
    /// HH:MM
    #[arg(long)]
    start: TimeOfDay,
    /// HH:MM (antérieur au début = passe minuit)
    #[arg(long)]
    end: TimeOfDay,
    /// liste "id1,id2,..."
    #[arg(long, default_value = "")]
    workers: String,
    #[arg(long, default_value = "1:1")]
    ratio: String,
    /// Id du créneau édité (absent pour une création)
    #[arg(long)]
    shift_id: Option<String>,
}

impl CandidateArgs {
    fn into_candidate(self) -> CandidateShift {
        let workers: Vec<String> = self
            .workers
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let mut candidate = CandidateShift::new(self.participant, self.date, self.start, self.end)
            .with_workers(workers)
            .with_ratio(self.ratio);
        if let Some(id) = self.shift_id {
            candidate = candidate.with_id(id);
        }
        candidate
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Valider un créneau proposé
    Validate {
        #[command(flatten)]
        candidate: CandidateArgs,
        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Lister les workers sélectionnables pour un créneau
    Eligible {
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeOfDay,
        #[arg(long)]
        end: TimeOfDay,
        #[arg(long)]
        shift_id: Option<String>,
    },

    /// Heures hebdomadaires d'un worker (semaine lundi-dimanche)
    Hours {
        #[arg(long)]
        worker: String,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Valider puis enregistrer un créneau dans l'instantané
    Commit {
        #[command(flatten)]
        candidate: CandidateArgs,
        /// Accepter malgré les avertissements
        #[arg(long)]
        confirm: bool,
    },
}

fn print_report(report: &ValidationReport) {
    for e in report.error_messages() {
        eprintln!("error: {e}");
    }
    for w in report.warning_messages() {
        eprintln!("warning: {w}");
    }
}

/// 0 = OK, 1 = erreurs bloquantes, 2 = avertissements à confirmer
fn exit_code(report: &ValidationReport) -> i32 {
    if !report.is_valid {
        1
    } else if report.needs_confirmation() {
        2
    } else {
        0
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let rules = match &cli.rules {
        Some(path) => Rules::from_json_file(path)?,
        None => Rules::default(),
    };

    let storage = JsonStorage::open(&cli.snapshot)?;
    let snapshot = storage.load()?;
    let validator = Validator::new(&snapshot).with_rules(rules);

    let code = match cli.cmd {
        Commands::Validate { candidate, json } => {
            let candidate = candidate.into_candidate();
            let report = validator.validate(&candidate);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
                if report.is_valid && report.warnings.is_empty() {
                    println!("OK: no conflicts");
                }
            }
            exit_code(&report)
        }
        Commands::Eligible {
            date,
            start,
            end,
            shift_id,
        } => {
            let editing = shift_id.map(ShiftId::new);
            let eligible = validator.eligible_workers(date, start, end, editing.as_ref());
            if snapshot.availability.is_none() {
                eprintln!("availability not loaded: no worker can be offered");
            }
            for w in eligible {
                println!("{} | {}", w.id.as_str(), w.display_name());
            }
            0
        }
        Commands::Hours { worker, date } => {
            let id = WorkerId::new(&worker);
            if snapshot.find_worker(&id).is_none() {
                return Err(RosterError::UnknownWorker(worker).into());
            }
            println!("{}", validator.weekly_hours(&id, date));
            0
        }
        Commands::Commit { candidate, confirm } => {
            let candidate = candidate.into_candidate();
            let report = validator.validate(&candidate);
            print_report(&report);
            if !report.is_valid {
                bail!("shift rejected: {} error(s)", report.errors.len());
            }
            if report.needs_confirmation() && !confirm {
                eprintln!("re-run with --confirm to accept the warnings");
                2
            } else {
                let participant = candidate.participant.clone();
                let existing = candidate
                    .id
                    .as_ref()
                    .and_then(|id| snapshot.roster.find_shift(id))
                    .map(|(_, s)| s);
                let shift = candidate.into_shift(existing);
                let id = shift.id.clone();
                storage.merge_shift(&participant, shift)?;
                println!("saved {} to {}", id.as_str(), storage.path().display());
                0
            }
        }
    };

    std::process::exit(code);
}
