//! Append-only audit journal
//!
//! Entries are stored one JSON object per line (JSONL) and flushed after
//! each write. A line torn by a crash is skipped on read instead of making
//! the whole journal unreadable.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ForklyError, ForklyResult};

use super::entry::AuditEntry;

/// Writes and reads the audit journal
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> ForklyResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ForklyError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| ForklyError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| ForklyError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Append an entry, downgrading failure to a warning
    ///
    /// The remote write already happened; a local journaling problem must
    /// not turn it into a reported failure.
    pub fn record(&self, entry: AuditEntry) {
        if let Err(err) = self.log(&entry) {
            tracing::warn!(error = %err, entity = %entry.entity_type, "Failed to journal remote write");
        }
    }

    /// Read every readable entry, oldest first
    pub fn read_all(&self) -> ForklyResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ForklyError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                ForklyError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!(line = line_num + 1, error = %err, "Skipping unreadable audit entry");
                }
            }
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ForklyResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
