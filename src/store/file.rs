use chrono::NaiveDate;
use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{BillStore, OccurrenceCommit};
use crate::error::{BillError, Result};
use crate::ledger::{load_ledger, save_ledger, Bill};

pub const LOCK_FILE: &str = "ledger.lock";

/// Advisory lock on `ledger.lock`, held for the duration of a run.
///
/// The lock belongs to the open file, so the OS drops it when the holder
/// exits, however it exits. The file itself stays behind and only records
/// the pid of the last holder.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(LOCK_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Err(BillError::RunInProgress(path)),
            Err(TryLockError::Error(e)) => return Err(e.into()),
        }
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        tracing::debug!(path = %path.display(), "acquired ledger lock");
        Ok(Self { file, path })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release ledger lock");
        }
    }
}

/// Bill store backed by `ledger.toml` in the config directory.
///
/// Every commit re-reads the ledger from disk and checks the template cursor
/// against it, so a commit never overwrites changes it did not see.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    lock: Option<RunLock>,
}

impl FileStore {
    /// Open for reading only (dry runs, listings). Takes no lock, and
    /// commits are refused.
    pub fn read_only(config_dir: &Path) -> Self {
        Self {
            dir: config_dir.to_path_buf(),
            lock: None,
        }
    }

    /// Open for a generating run, holding the run lock until dropped.
    pub fn locked(config_dir: &Path) -> Result<Self> {
        let lock = RunLock::acquire(config_dir)?;
        Ok(Self {
            dir: config_dir.to_path_buf(),
            lock: Some(lock),
        })
    }
}

impl BillStore for FileStore {
    fn due_templates(&self, today: NaiveDate) -> Result<Vec<Bill>> {
        Ok(load_ledger(&self.dir)?.due_templates(today))
    }

    fn commit(&mut self, commit: OccurrenceCommit) -> Result<Bill> {
        if self.lock.is_none() {
            return Err(BillError::ReadOnlyStore(self.dir.clone()));
        }
        let mut ledger = load_ledger(&self.dir)?;
        let created = ledger.apply(commit)?;
        save_ledger(&self.dir, &ledger)?;
        Ok(created)
    }
}
