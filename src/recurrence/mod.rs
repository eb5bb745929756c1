mod advance;
mod engine;
mod frequency;
mod policy;
mod report;

pub use advance::{add_months, advance, advance_recurrence};
pub use engine::{EngineOptions, PlannedOccurrence, RecurrenceEngine};
pub use frequency::{Frequency, Recurrence, Step};
pub use policy::{CatchUp, UnknownRecurrence, FALLBACK_DAYS};
pub use report::{GeneratedOccurrence, RunReport, TemplateIssue};
