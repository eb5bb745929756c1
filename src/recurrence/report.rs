use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::BillError;

/// An occurrence created (or, in a dry run, that would be created).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOccurrence {
    pub template_id: u64,
    /// Id assigned by the store; `None` in a dry run.
    pub bill_id: Option<u64>,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub next_cursor: NaiveDate,
}

/// A template the run could not process.
#[derive(Debug)]
pub struct TemplateIssue {
    pub template_id: u64,
    pub description: String,
    pub error: BillError,
}

/// Outcome of one engine invocation.
#[derive(Debug)]
pub struct RunReport {
    pub today: NaiveDate,
    pub dry_run: bool,
    pub generated: Vec<GeneratedOccurrence>,
    /// Templates with bad recurrence data. Nothing was attempted for them.
    pub skipped: Vec<TemplateIssue>,
    /// Templates whose date arithmetic or persistence failed.
    pub failures: Vec<TemplateIssue>,
}

impl RunReport {
    pub fn new(today: NaiveDate, dry_run: bool) -> Self {
        Self {
            today,
            dry_run,
            generated: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.generated.len()
    }

    pub fn summary(&self) -> String {
        if self.dry_run {
            format!("DRY RUN: {} bills would be generated", self.count())
        } else {
            format!("{} recurring bills generated", self.count())
        }
    }
}
