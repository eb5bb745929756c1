mod file;

pub use file::{FileStore, RunLock, LOCK_FILE};

use chrono::NaiveDate;

use crate::error::Result;
use crate::ledger::Bill;

/// One unit of work: insert `occurrence` and move the template's cursor from
/// `expected_cursor` to `next_cursor`. Stores apply both or neither.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceCommit {
    pub template_id: u64,
    pub expected_cursor: Option<NaiveDate>,
    pub occurrence: Bill,
    pub next_cursor: NaiveDate,
}

/// Persistence the recurrence engine runs against.
pub trait BillStore {
    /// Recurring templates whose generation cursor is on or before `today`.
    fn due_templates(&self, today: NaiveDate) -> Result<Vec<Bill>>;

    /// Apply a commit atomically, returning the stored occurrence. Fails with
    /// `CursorConflict` if the template's cursor no longer matches.
    fn commit(&mut self, commit: OccurrenceCommit) -> Result<Bill>;
}
