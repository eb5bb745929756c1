pub mod config;
pub mod error;
pub mod ledger;
pub mod recurrence;
pub mod store;

pub use config::{Config, DisplaySettings, EngineSettings};
pub use error::{BillError, Result};
pub use ledger::{Bill, BillStatus, Ledger};
pub use recurrence::{
    advance, CatchUp, EngineOptions, Frequency, Recurrence, RecurrenceEngine, RunReport,
    UnknownRecurrence,
};
pub use store::{BillStore, FileStore, OccurrenceCommit};
