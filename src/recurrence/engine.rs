use chrono::NaiveDate;

use super::advance::advance_recurrence;
use super::policy::{CatchUp, UnknownRecurrence};
use super::report::{GeneratedOccurrence, RunReport, TemplateIssue};
use crate::error::{BillError, Result};
use crate::ledger::Bill;
use crate::store::{BillStore, OccurrenceCommit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub dry_run: bool,
    pub catch_up: CatchUp,
    pub unknown_recurrence: UnknownRecurrence,
}

/// One occurrence the engine intends to create, with the cursor transition
/// that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedOccurrence {
    pub due_date: NaiveDate,
    pub expected_cursor: Option<NaiveDate>,
    pub next_cursor: NaiveDate,
}

/// Materializes occurrences of recurring bills.
///
/// A template's cursor (`next_generation_date`) holds the due date of its next
/// occurrence. Before the first occurrence the cursor is unset: generation
/// opens on the template's own due date and the first occurrence falls one
/// period after it. Each occurrence moves the cursor one period further.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceEngine {
    options: EngineOptions,
}

impl RecurrenceEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Work out which occurrences `template` owes as of `today`. Pure: reads
    /// nothing but the template.
    pub fn plan(&self, template: &Bill, today: NaiveDate) -> Result<Vec<PlannedOccurrence>> {
        let recurrence =
            template
                .recurrence_type
                .as_ref()
                .ok_or_else(|| BillError::MissingRecurrenceType {
                    id: template.id,
                    description: template.description.clone(),
                })?;

        let mut planned = Vec::new();
        if !template.recurrence_active(today) {
            return Ok(planned);
        }

        let policy = self.options.unknown_recurrence;
        let mut cursor = template.next_generation_date;
        while cursor.unwrap_or(template.due_date) <= today {
            let due_date = match cursor {
                Some(date) => date,
                None => advance_recurrence(template.due_date, recurrence, policy)?,
            };
            let next_cursor = advance_recurrence(due_date, recurrence, policy)?;
            planned.push(PlannedOccurrence {
                due_date,
                expected_cursor: cursor,
                next_cursor,
            });
            cursor = Some(next_cursor);

            if self.options.catch_up == CatchUp::Single {
                break;
            }
        }
        Ok(planned)
    }

    /// Run one generation pass against `store`.
    ///
    /// Problems with individual templates are collected in the report and do
    /// not stop the pass; only failing to read the store does.
    pub fn run<S: BillStore>(&self, store: &mut S, today: NaiveDate) -> Result<RunReport> {
        let mut report = RunReport::new(today, self.options.dry_run);
        let templates = store.due_templates(today)?;
        tracing::info!(
            %today,
            candidates = templates.len(),
            dry_run = self.options.dry_run,
            "starting recurring bill run"
        );

        for template in templates.iter().filter(|t| t.recurring) {
            let plan = match self.plan(template, today) {
                Ok(plan) => plan,
                Err(error) => {
                    record_issue(&mut report, template, error);
                    continue;
                }
            };

            if plan.is_empty() {
                tracing::debug!(
                    id = template.id,
                    end = ?template.recurrence_end_date,
                    "recurrence ended; skipping"
                );
                continue;
            }

            for step in plan {
                if self.options.dry_run {
                    report.generated.push(generated(template, None, step));
                    continue;
                }

                let commit = OccurrenceCommit {
                    template_id: template.id,
                    expected_cursor: step.expected_cursor,
                    occurrence: template.occurrence(step.due_date),
                    next_cursor: step.next_cursor,
                };
                match store.commit(commit) {
                    Ok(bill) => {
                        tracing::info!(
                            template = template.id,
                            bill = bill.id,
                            due = %step.due_date,
                            next = %step.next_cursor,
                            "generated occurrence"
                        );
                        report.generated.push(generated(template, Some(bill.id), step));
                    }
                    Err(error) => {
                        record_issue(&mut report, template, error);
                        break;
                    }
                }
            }
        }

        tracing::info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "recurring bill run finished"
        );
        Ok(report)
    }
}

fn generated(template: &Bill, bill_id: Option<u64>, step: PlannedOccurrence) -> GeneratedOccurrence {
    GeneratedOccurrence {
        template_id: template.id,
        bill_id,
        description: template.description.clone(),
        amount: template.amount,
        due_date: step.due_date,
        next_cursor: step.next_cursor,
    }
}

fn record_issue(report: &mut RunReport, template: &Bill, error: BillError) {
    let malformed = matches!(
        error,
        BillError::MissingRecurrenceType { .. } | BillError::UnknownRecurrence(_)
    );
    let issue = TemplateIssue {
        template_id: template.id,
        description: template.description.clone(),
        error,
    };
    if malformed {
        tracing::warn!(id = issue.template_id, error = %issue.error, "skipping malformed template");
        report.skipped.push(issue);
    } else {
        tracing::error!(id = issue.template_id, error = %issue.error, "template failed");
        report.failures.push(issue);
    }
}
