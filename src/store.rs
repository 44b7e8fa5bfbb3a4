use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;

use crate::error::{Error, Result};
use crate::models::{NewRun, StoredRun};

/// Append-only history log backed by a JSON-lines file.
///
/// One `StoredRun` per line. Ids are assigned from the last record on
/// append, so file order is id order. Records are never updated or
/// deleted. Appends hold an exclusive advisory lock on the log file
/// across the last-id read and the write, so concurrent handles (or
/// processes) sharing one file still get a strictly increasing id
/// sequence without losing records.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, run: NewRun) -> Result<StoredRun> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    Error::Storage(format!(
                        "failed to create '{}': {}",
                        parent.display(),
                        err
                    ))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| {
                Error::Storage(format!("failed to open '{}': {}", self.path.display(), err))
            })?;
        file.lock_exclusive().map_err(|err| {
            Error::Storage(format!("failed to lock '{}': {}", self.path.display(), err))
        })?;

        // Lock held until `file` drops; the id read and the write are one
        // critical section.
        let next_id = self.last_id_locked(&mut file)? + 1;
        let stored = StoredRun {
            id: next_id,
            pedestrians: run.pedestrians,
            vehicles: run.vehicles,
            is_peak_hour: run.is_peak_hour,
            calculated_green_time: run.calculated_green_time,
            risk_level: run.risk_level,
            explanation: run.explanation,
            created_at: Utc::now().to_rfc3339(),
        };

        let mut line = serde_json::to_string(&stored)
            .map_err(|err| Error::Storage(format!("failed to encode run: {}", err)))?;
        line.push('\n');
        file.write_all(line.as_bytes()).map_err(|err| {
            Error::Storage(format!(
                "failed to write '{}': {}",
                self.path.display(),
                err
            ))
        })?;

        log::debug!("appended run #{} to {}", stored.id, self.path.display());
        Ok(stored)
    }

    /// All recorded runs in ascending id order. A missing file is an
    /// empty history, not an error.
    pub fn list_all(&self) -> Result<Vec<StoredRun>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(Error::Storage(format!(
                    "failed to open '{}': {}",
                    self.path.display(),
                    err
                )))
            }
        };
        file.lock_shared().map_err(|err| {
            Error::Storage(format!("failed to lock '{}': {}", self.path.display(), err))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|err| {
            Error::Storage(format!(
                "failed to read '{}': {}",
                self.path.display(),
                err
            ))
        })?;

        let mut runs = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let run = serde_json::from_str(line).map_err(|err| {
                Error::Storage(format!("corrupt record at line {}: {}", idx + 1, err))
            })?;
            runs.push(run);
        }
        Ok(runs)
    }

    /// Last assigned id, taken from the final record only. The caller
    /// holds the exclusive lock, so reading to EOF and appending after
    /// it cannot race another writer.
    fn last_id_locked(&self, file: &mut File) -> Result<u64> {
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|err| {
            Error::Storage(format!(
                "failed to read '{}': {}",
                self.path.display(),
                err
            ))
        })?;
        match contents.lines().rev().find(|line| !line.trim().is_empty()) {
            None => Ok(0),
            Some(line) => {
                let run: StoredRun = serde_json::from_str(line).map_err(|err| {
                    Error::Storage(format!("corrupt final record: {}", err))
                })?;
                Ok(run.id)
            }
        }
    }
}
