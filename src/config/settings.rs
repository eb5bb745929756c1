use serde::{Deserialize, Serialize};

use crate::recurrence::{CatchUp, EngineOptions, UnknownRecurrence};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy)]
pub struct EngineSettings {
    #[serde(default)]
    pub catch_up: CatchUp,
    #[serde(default)]
    pub unknown_recurrence: UnknownRecurrence,
}

impl EngineSettings {
    pub fn options(&self, dry_run: bool) -> EngineOptions {
        EngineOptions {
            dry_run,
            catch_up: self.catch_up,
            unknown_recurrence: self.unknown_recurrence,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}
