use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillError {
    #[error("Config directory not found at {0}. Run 'bills init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize ledger: {0}")]
    LedgerSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Bill #{id} ('{description}') is marked recurring but has no recurrence type")]
    MissingRecurrenceType { id: u64, description: String },

    #[error("Unknown recurrence type '{0}'. Set unknown_recurrence = \"fallback\" in config.toml to advance it by 30 days.")]
    UnknownRecurrence(String),

    #[error("Cannot advance {date} by {step}: result is out of range")]
    DateComputation { date: NaiveDate, step: String },

    #[error("Template bill #{0} not found in ledger")]
    TemplateNotFound(u64),

    #[error("Bill #{id} cursor changed during the run (expected {expected:?}, found {found:?})")]
    CursorConflict {
        id: u64,
        expected: Option<NaiveDate>,
        found: Option<NaiveDate>,
    },

    #[error("Another run holds the ledger lock at {0}")]
    RunInProgress(PathBuf),

    #[error("Ledger at {0} was opened read-only")]
    ReadOnlyStore(PathBuf),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("{0} template(s) failed; cursors were left in place, re-run once the cause is fixed")]
    RunIncomplete(usize),
}

pub type Result<T> = std::result::Result<T, BillError>;
