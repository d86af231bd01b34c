//! Append-only line writer with size-based rotation.
//!
//! When the file grows past the configured size it is renamed to
//! `<name>.<timestamp>` (local time, sortable) and a fresh file is started.
//! Only the newest backups are kept.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating file. The file is opened lazily on first write and
/// its parent directory created if needed.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.policy.max_bytes) {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(self.open()?);
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::other("trace file unavailable"));
        };
        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Local::now().format("%Y%m%dT%H%M%S%.6f").to_string();
        let mut backup = self.backup_path(&stamp);
        let mut n = 1;
        while backup.exists() {
            backup = self.backup_path(&format!("{stamp}-{n}"));
            n += 1;
        }
        fs::rename(&self.path, &backup)?;
        self.prune()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Backups of this file, oldest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let prefix = match self.path.file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("{name}."),
            None => return Ok(Vec::new()),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    fn prune(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(self.policy.max_backups);
        for old in &backups[..excess] {
            if let Err(e) = fs::remove_file(old) {
                tracing::trace!(path = %old.display(), error = %e, "could not remove old trace file");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
