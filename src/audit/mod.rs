//! Audit log for administrative actions
//!
//! A single [`Auditor`] is created when the process starts and shared with
//! every subcommand. Entries are appended as JSON Lines. The file is opened
//! lazily on the first append, so commands that never audit anything leave no
//! file behind.

mod event;

pub use event::AuditEvent;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only audit logger bound to one file path.
///
/// Safe to share between threads; each append writes and flushes one whole
/// line while holding the writer lock.
pub struct Auditor {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    entries_written: AtomicU64,
}

impl Auditor {
    /// Bind a logger to `path`. Nothing is opened yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: Mutex::new(None),
            entries_written: AtomicU64::new(0),
        }
    }

    /// File this logger appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries appended by this process
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    /// Record `operation` performed by command `name` with a JSON payload.
    pub fn log(
        &self,
        name: &str,
        operation: &str,
        value: impl serde::Serialize,
    ) -> Result<()> {
        let value = serde_json::to_value(value).context("Failed to encode audit value")?;
        self.append(&AuditEvent::new(name, operation, value))
    }

    /// Append a prepared event.
    pub fn append(&self, event: &AuditEvent) -> Result<()> {
        let mut line = serde_json::to_vec(event).context("Failed to encode audit event")?;
        line.push(b'\n');

        let mut guard = self.writer.lock();
        if guard.is_none() {
            *guard = Some(BufWriter::new(self.open()?));
        }
        if let Some(writer) = guard.as_mut() {
            writer
                .write_all(&line)
                .and_then(|_| writer.flush())
                .with_context(|| format!("Failed to write audit log: {}", self.path.display()))?;
        }
        drop(guard);

        self.entries_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open audit log: {}", self.path.display()))
    }
}

impl std::fmt::Debug for Auditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auditor")
            .field("path", &self.path)
            .field("entries_written", &self.entries_written())
            .finish()
    }
}
