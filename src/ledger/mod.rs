mod bill;

#[cfg(test)]
pub(crate) use bill::fixtures;
pub use bill::{Bill, BillStatus};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BillError, Result};
use crate::store::{BillStore, OccurrenceCommit};

pub const LEDGER_FILE: &str = "ledger.toml";

/// All bills known to the back office, as persisted in `ledger.toml`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Ledger {
    #[serde(default = "first_id")]
    pub next_id: u64,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

fn first_id() -> u64 {
    1
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            bills: Vec::new(),
        }
    }
}

impl Ledger {
    pub fn get(&self, id: u64) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    /// Add a bill, assigning it the next free id.
    pub fn insert(&mut self, mut bill: Bill) -> Bill {
        let max_seen = self.bills.iter().map(|b| b.id).max().unwrap_or(0);
        let id = self.next_id.max(max_seen + 1);
        bill.id = id;
        self.next_id = id + 1;
        self.bills.push(bill.clone());
        bill
    }

    pub fn templates(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter().filter(|b| b.recurring)
    }

    pub fn occurrences_of(&self, template_id: u64) -> impl Iterator<Item = &Bill> {
        self.bills
            .iter()
            .filter(move |b| b.template_id == Some(template_id))
    }

    /// Recurring bills whose generation cursor has been reached.
    pub fn due_templates(&self, today: NaiveDate) -> Vec<Bill> {
        let mut due: Vec<Bill> = self
            .templates()
            .filter(|b| b.generation_cursor() <= today)
            .cloned()
            .collect();
        due.sort_by_key(|b| (b.generation_cursor(), b.id));
        due
    }

    /// Insert an occurrence and advance its template's cursor, but only if
    /// the cursor still holds the value the commit was planned from. Nothing
    /// changes when the check fails.
    pub fn apply(&mut self, commit: OccurrenceCommit) -> Result<Bill> {
        let idx = self
            .bills
            .iter()
            .position(|b| b.id == commit.template_id)
            .ok_or(BillError::TemplateNotFound(commit.template_id))?;

        let found = self.bills[idx].next_generation_date;
        if found != commit.expected_cursor {
            return Err(BillError::CursorConflict {
                id: commit.template_id,
                expected: commit.expected_cursor,
                found,
            });
        }

        let created = self.insert(commit.occurrence);
        self.bills[idx].next_generation_date = Some(commit.next_cursor);
        Ok(created)
    }
}

impl BillStore for Ledger {
    fn due_templates(&self, today: NaiveDate) -> Result<Vec<Bill>> {
        Ok(Ledger::due_templates(self, today))
    }

    fn commit(&mut self, commit: OccurrenceCommit) -> Result<Bill> {
        self.apply(commit)
    }
}

/// Load ledger.toml (empty ledger if missing)
pub fn load_ledger(config_dir: &Path) -> Result<Ledger> {
    let path = config_dir.join(LEDGER_FILE);
    if !path.exists() {
        return Ok(Ledger::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BillError::ConfigParse { path, source: e })
}

/// Save ledger.toml. Writes a sibling temp file and renames it over the
/// original so readers never observe a half-written ledger.
pub fn save_ledger(config_dir: &Path, ledger: &Ledger) -> Result<()> {
    let path = config_dir.join(LEDGER_FILE);
    let tmp = config_dir.join(format!("{LEDGER_FILE}.tmp"));
    let content = toml::to_string_pretty(ledger)?;
    fs::write(&tmp, content)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}
