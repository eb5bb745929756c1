use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recurrence::Recurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "pago")]
    Paid,
    #[serde(alias = "vencido")]
    Overdue,
    #[serde(alias = "cancelado")]
    Canceled,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Paid => "PAID",
            BillStatus::Overdue => "OVERDUE",
            BillStatus::Canceled => "CANCELED",
        };
        f.write_str(s)
    }
}

/// A payable. Recurring bills double as templates for their occurrences.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Bill {
    pub id: u64,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: BillStatus,
    pub category: String,
    #[serde(default)]
    pub supplier: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurrence_type: Option<Recurrence>,
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,
    /// Date the next occurrence is generated on; unset until the first one.
    #[serde(default)]
    pub next_generation_date: Option<NaiveDate>,
    /// Set on occurrences: the template they were generated from.
    #[serde(default)]
    pub template_id: Option<u64>,
}

impl Bill {
    /// Effective generation cursor: the stored cursor, or the due date for a
    /// template that has never produced an occurrence.
    pub fn generation_cursor(&self) -> NaiveDate {
        self.next_generation_date.unwrap_or(self.due_date)
    }

    /// Whether the recurrence window is still open on `today`.
    pub fn recurrence_active(&self, today: NaiveDate) -> bool {
        self.recurrence_end_date.map_or(true, |end| end >= today)
    }

    /// A template may generate only while it has a recurrence type and its
    /// end date has not passed.
    pub fn is_eligible(&self, today: NaiveDate) -> bool {
        self.recurring && self.recurrence_type.is_some() && self.recurrence_active(today)
    }

    /// Build the non-recurring occurrence of this template falling due on
    /// `due_date`. The id is assigned by the store.
    pub fn occurrence(&self, due_date: NaiveDate) -> Bill {
        Bill {
            id: 0,
            description: self.description.clone(),
            amount: self.amount,
            due_date,
            status: BillStatus::Pending,
            category: self.category.clone(),
            supplier: self.supplier.clone(),
            owner: self.owner.clone(),
            notes: self.notes.clone(),
            recurring: false,
            recurrence_type: None,
            recurrence_end_date: None,
            next_generation_date: None,
            template_id: Some(self.id),
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == BillStatus::Pending && self.due_date < today
    }

    /// Signed day count until the due date; negative once it has passed.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Status for display, promoting stale pending bills to overdue.
    pub fn display_status(&self, today: NaiveDate) -> BillStatus {
        if self.is_overdue(today) {
            BillStatus::Overdue
        } else {
            self.status
        }
    }
}
