mod settings;

pub use settings::{Config, DisplaySettings, EngineSettings};

use crate::error::{BillError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.bills/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "bills") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        BillError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".bills"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(BillError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BillError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[engine]
# How many occurrences a template may produce per run when several periods
# have passed since the last run:
#   "single" - at most one (re-run to catch up)
#   "all"    - one per elapsed period
catch_up = "single"

# Recurrence types other than weekly, biweekly, monthly, bimonthly,
# quarterly, semiannual and annual:
#   "reject"   - skip the bill and report it
#   "fallback" - advance by 30 days
unknown_recurrence = "reject"

[display]
currency_symbol = "$"
"#;

/// Template content for ledger.toml
pub const LEDGER_TEMPLATE: &str = r#"# Bills live here. A bill with recurring = true is a template: each
# `bills run` issues its next occurrence once the cursor is reached.
#
# Example:
#
# [[bills]]
# id = 1
# description = "Office rent"
# amount = "2500.00"
# due_date = "2026-01-10"
# status = "pending"             # pending, paid, overdue, canceled
# category = "rent"
# supplier = "Main St Properties" # optional
# owner = "admin"
# notes = ""
# recurring = true
# recurrence_type = "monthly"     # weekly, biweekly, monthly, bimonthly,
#                                 # quarterly, semiannual, annual
# recurrence_end_date = "2026-12-31"  # optional

next_id = 1
"#;
