//! Tracing setup: console output plus a size-rotated log file.
//!
//! The console shows `info` and up for the woo-listing crates (`debug` when
//! verbose), overridable with `RUST_LOG`. The log file always records
//! `debug`, including request payloads and response bodies, as text or as
//! JSON lines.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LogConfig;

// `woo_listing` prefixes every workspace target, including the binary.
const CONSOLE_DIRECTIVES: &str = "warn,woo_listing=info";
const VERBOSE_DIRECTIVES: &str = "warn,woo_listing=debug";
const FILE_DIRECTIVES: &str = "info,woo_listing=debug";

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    Io(#[from] io::Error),

    /// A global subscriber is already installed.
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already set.
pub fn init(config: &LogConfig, verbose: bool) -> Result<(), LoggingError> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_DIRECTIVES
        } else {
            CONSOLE_DIRECTIVES
        })
    });

    let file = Mutex::new(RotatingFile::open(&config.file, config.rotation_bytes)?);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // JSON lines for log shippers, text otherwise
    let file_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(file)
            .with_filter(EnvFilter::new(FILE_DIRECTIVES))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(EnvFilter::new(FILE_DIRECTIVES))
            .boxed()
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

/// A log file that is renamed aside once it reaches a size limit.
///
/// Before a write that would take the file past `max_bytes`, the current
/// file is renamed to `<stem>.<UTC timestamp>.<ext>` and a new one is
/// started. Rotated files are never deleted. A single write larger than the
/// limit still goes into one file.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Open (or create) the active log file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            file,
            written,
        })
    }

    /// Path of the active log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, rotated_path(&self.path, Utc::now()))?;
        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = u64::try_from(buf.len()).unwrap_or(u64::MAX);
        if self.written > 0 && self.written.saturating_add(incoming) > self.max_bytes {
            self.rotate()?;
        }

        let n = self.file.write(buf)?;
        self.written += u64::try_from(n).unwrap_or(u64::MAX);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Name for a rotated file; adds a counter if the name is taken.
fn rotated_path(path: &Path, at: DateTime<Utc>) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(|| "log".to_string(), |s| s.to_string_lossy().into_owned());
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = at.format("%Y-%m-%d_%H-%M-%S_%6f");

    let mut candidate = path.with_file_name(format!("{stem}.{stamp}{extension}"));
    let mut counter = 1;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{stem}.{stamp}.{counter}{extension}"));
        counter += 1;
    }
    candidate
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotated_path_format() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let rotated = rotated_path(&dir.path().join("app.log"), at);
        assert_eq!(
            rotated.file_name().unwrap(),
            "app.2024-05-01_12-30-00_000000.log"
        );
    }

    #[test]
    fn test_rotated_path_avoids_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        fs::write(dir.path().join("app.2024-05-01_12-30-00_000000.log"), "old").unwrap();

        let rotated = rotated_path(&dir.path().join("app.log"), at);
        assert_eq!(
            rotated.file_name().unwrap(),
            "app.2024-05-01_12-30-00_000000.1.log"
        );
    }

    #[test]
    fn test_no_rotation_under_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::open(dir.path().join("app.log"), 1024).unwrap();
        file.write_all(b"first line\n").unwrap();
        file.write_all(b"second line\n").unwrap();
        file.flush().unwrap();

        assert_eq!(log_files(dir.path()), vec!["app.log"]);
    }

    #[test]
    fn test_rotates_when_limit_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RotatingFile::open(&path, 16).unwrap();

        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();
        file.flush().unwrap();

        let names = log_files(dir.path());
        assert_eq!(names.len(), 2, "{names:?}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "abcdefghij\n");
        let rotated = names.iter().find(|n| n.as_str() != "app.log").unwrap();
        assert!(rotated.starts_with("app.") && rotated.ends_with(".log"));
        assert_eq!(
            fs::read_to_string(dir.path().join(rotated)).unwrap(),
            "0123456789\n"
        );
    }

    #[test]
    fn test_existing_size_counts_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "x".repeat(20)).unwrap();

        let mut file = RotatingFile::open(&path, 24).unwrap();
        file.write_all(b"more than four\n").unwrap();
        file.flush().unwrap();

        assert_eq!(log_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("app.log");
        let file = RotatingFile::open(&path, 1024).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert!(path.exists());
    }
}
