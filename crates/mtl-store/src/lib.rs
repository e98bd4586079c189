//! Storage layer for the work time log.
//!
//! The log is a single UTF-8 text file with one action per line. This crate
//! only reads it whole and appends to it; it never rewrites existing lines.
//!
//! # Locking
//!
//! Appends take an exclusive advisory lock on the log file for the duration
//! of the write, so two processes recording at the same moment cannot
//! interleave partial lines. Reads do not lock: a reader may observe a
//! half-written final line, which the decoder skips.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use mtl_core::ActionLog;

/// Log file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the log failed for a reason other than it being absent.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Creating the parent directory failed.
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Opening, locking or writing the log failed.
    #[error("failed to append to {path}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The action log stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    /// Refers to a log at `path`. Nothing is created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the log file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ActionLog for LogFile {
    type Error = StoreError;

    fn read_all(&self) -> Result<Option<String>, Self::Error> {
        match fs::read(&self.path) {
            // Invalid UTF-8 only damages the affected lines, which then fail to decode.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn append_line(&self, line: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let append_err = |source: io::Error| StoreError::Append {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append_err)?;

        file.lock_exclusive().map_err(append_err)?;
        let written = file.write_all(line.as_bytes()).and_then(|()| file.flush());
        // Called through the trait so std's inherent `File::unlock` is not picked instead.
        let unlocked = FileExt::unlock(&file);
        written.map_err(append_err)?;
        unlocked.map_err(append_err)?;

        tracing::debug!(path = %self.path.display(), "appended log line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use mtl_core::{ActionKind, Tracker, TrackerStatus, encode};

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp = tempfile::tempdir().unwrap();
        let log = LogFile::new(temp.path().join("work_log.txt"));

        assert!(!log.exists());
        assert_eq!(log.read_all().unwrap(), None);
    }

    #[test]
    fn test_append_creates_file_and_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let log = LogFile::new(temp.path().join("nested/dir/work_log.txt"));

        log.append_line(&encode(at(9, 0), ActionKind::Start)).unwrap();

        assert!(log.exists());
        assert_eq!(log.read_all().unwrap().unwrap(), "20250312T090000,1\n");
    }

    #[test]
    fn test_appends_preserve_existing_lines() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("work_log.txt");
        fs::write(&path, "20250312T080000,1\n").unwrap();

        let log = LogFile::new(&path);
        log.append_line(&encode(at(8, 30), ActionKind::Stop)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "20250312T080000,1\n20250312T083000,0\n");
    }

    #[test]
    fn test_invalid_utf8_does_not_hide_other_lines() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("work_log.txt");
        let mut bytes = b"20250312T090000,1\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"20250312T091500,0\n");
        fs::write(&path, bytes).unwrap();

        let tracker = Tracker::new(LogFile::new(&path), 5);
        assert_eq!(tracker.today_total_minutes(at(12, 0)), 15);
    }

    #[test]
    fn test_read_of_directory_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let log = LogFile::new(temp.path());

        let err = log.read_all().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_tracker_round_trips_through_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("work_log.txt");

        let mut tracker = Tracker::new(LogFile::new(&path), 5);
        tracker.record_action(ActionKind::Start, at(9, 0)).unwrap();
        tracker.record_action(ActionKind::Stop, at(9, 45)).unwrap();
        tracker.record_action(ActionKind::Start, at(10, 0)).unwrap();

        let restored = Tracker::restore(LogFile::new(&path), 5);
        assert_eq!(restored.current_state(), TrackerStatus::Running);
        assert_eq!(restored.today_total_minutes(at(10, 10)), 55);
    }
}
