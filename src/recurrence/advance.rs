use chrono::{Days, Months, NaiveDate};

use super::frequency::{Frequency, Recurrence, Step};
use super::policy::{UnknownRecurrence, FALLBACK_DAYS};
use crate::error::{BillError, Result};

/// Advance `date` by one period of `frequency`.
pub fn advance(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    apply_step(date, frequency.step())
}

/// Advance `date` by one period of a stored recurrence, applying `policy`
/// to values the engine does not recognize.
pub fn advance_recurrence(
    date: NaiveDate,
    recurrence: &Recurrence,
    policy: UnknownRecurrence,
) -> Result<NaiveDate> {
    match (recurrence, policy) {
        (Recurrence::Known(freq), _) => advance(date, *freq),
        (Recurrence::Unrecognized(_), UnknownRecurrence::Fallback) => {
            apply_step(date, Step::Days(FALLBACK_DAYS))
        }
        (Recurrence::Unrecognized(raw), UnknownRecurrence::Reject) => {
            Err(BillError::UnknownRecurrence(raw.clone()))
        }
    }
}

pub fn apply_step(date: NaiveDate, step: Step) -> Result<NaiveDate> {
    let out_of_range = || BillError::DateComputation {
        date,
        step: step.to_string(),
    };
    match step {
        Step::Days(n) => date.checked_add_days(Days::new(n)).ok_or_else(out_of_range),
        Step::Months(n) => add_months(date, n).ok_or_else(out_of_range),
    }
}

/// Shift `date` forward by whole calendar months, keeping the day of month
/// unless the target month is shorter, in which case it lands on that
/// month's last day.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
