//! Append-only job progress log.
//!
//! Each run appends timestamped phase markers to the job's log file, so the
//! file accumulates a history across runs. This log is a job artifact with a
//! fixed line format, separate from the diagnostic `tracing` output.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// Timestamp layout for progress lines, e.g. `2026-Aug-30-14:05:09`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Writes `<timestamp>: <message>` lines to a log file, append-only.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line. The file and its parent directory are
    /// created on first use; existing content is never truncated.
    pub fn append(&self, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create log directory {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open progress log {}", self.path.display()))?;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(file, "{timestamp}: {message}")
            .with_context(|| format!("write progress log {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_parent_and_file() {
        let dir = TempDir::new().unwrap();
        let log = ProgressLog::new(dir.path().join("log/etl.log"));
        log.append("ETL job started").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.ends_with(": ETL job started\n"));
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = TempDir::new().unwrap();
        let log = ProgressLog::new(dir.path().join("etl.log"));
        log.append("first").unwrap();
        log.append("second").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second"));
    }

    #[test]
    fn test_timestamp_layout() {
        let dir = TempDir::new().unwrap();
        let log = ProgressLog::new(dir.path().join("etl.log"));
        log.append("marker").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let (stamp, _) = content.split_once(": ").unwrap();
        // e.g. 2026-Aug-30-14:05:09
        chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).unwrap();
    }
}
