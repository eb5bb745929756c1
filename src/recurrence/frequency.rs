use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far apart consecutive occurrences of a recurring bill fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Semiannual,
    Annual,
}

/// A single advance step: either a fixed day count or a calendar month shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Days(u64),
    Months(u32),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Days(n) => write!(f, "{n} day(s)"),
            Step::Months(n) => write!(f, "{n} month(s)"),
        }
    }
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    pub fn step(self) -> Step {
        match self {
            Frequency::Weekly => Step::Days(7),
            // Matches the legacy "quinzenal" rule, not 14 days.
            Frequency::Biweekly => Step::Days(15),
            Frequency::Monthly => Step::Months(1),
            Frequency::Bimonthly => Step::Months(2),
            Frequency::Quarterly => Step::Months(3),
            Frequency::Semiannual => Step::Months(6),
            Frequency::Annual => Step::Months(12),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Semiannual => "semiannual",
            Frequency::Annual => "annual",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "semanal" => Ok(Frequency::Weekly),
            "biweekly" | "quinzenal" => Ok(Frequency::Biweekly),
            "monthly" | "mensal" => Ok(Frequency::Monthly),
            "bimonthly" | "bimestral" => Ok(Frequency::Bimonthly),
            "quarterly" | "trimestral" => Ok(Frequency::Quarterly),
            "semiannual" | "semestral" => Ok(Frequency::Semiannual),
            "annual" | "anual" => Ok(Frequency::Annual),
            other => Err(other.to_string()),
        }
    }
}

/// The recurrence type as stored on a bill.
///
/// Ledgers written by other tools may carry values this crate does not know;
/// those are kept verbatim so the engine can report them instead of refusing
/// to load the whole ledger. Names are matched the same way as
/// `Frequency::from_str`: trimmed, any case, English or legacy Portuguese.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    Known(Frequency),
    Unrecognized(String),
}

impl Recurrence {
    pub fn parse(s: &str) -> Self {
        Recurrence::from(s.to_string())
    }
}

impl From<String> for Recurrence {
    fn from(raw: String) -> Self {
        match raw.parse::<Frequency>() {
            Ok(freq) => Recurrence::Known(freq),
            Err(_) => Recurrence::Unrecognized(raw),
        }
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> Self {
        match recurrence {
            Recurrence::Known(freq) => freq.as_str().to_string(),
            Recurrence::Unrecognized(raw) => raw,
        }
    }
}

impl From<Frequency> for Recurrence {
    fn from(freq: Frequency) -> Self {
        Recurrence::Known(freq)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Known(freq) => write!(f, "{freq}"),
            Recurrence::Unrecognized(raw) => write!(f, "{raw}?"),
        }
    }
}
