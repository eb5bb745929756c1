use serde::{Deserialize, Serialize};

/// How many occurrences a template may produce in one run when several
/// periods have elapsed since the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatchUp {
    /// At most one occurrence per template per run.
    #[default]
    Single,
    /// One occurrence per elapsed period, until the cursor passes today.
    All,
}

/// What to do with a recurrence type the engine does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRecurrence {
    /// Skip the template and report it as a configuration error.
    #[default]
    Reject,
    /// Advance by a flat 30 days.
    Fallback,
}

/// Day count used by [`UnknownRecurrence::Fallback`].
pub const FALLBACK_DAYS: u64 = 30;
