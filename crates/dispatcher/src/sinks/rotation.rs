//! Size-triggered rotation of numbered log files
//!
//! Layout inside the log directory:
//!
//! ```text
//! <base>.log      active file (newest)
//! <base>_00.log   most recently rotated
//! <base>_01.log
//! ...
//! ```
//!
//! Recency is read from the names, not from file timestamps: the active file is
//! newest, then suffixes in ascending order. Files that do not match the
//! layout are never touched.
//!
//! A suffix is managed only in its canonical form (`{:02}`, no extra leading
//! zeros). Two-digit suffixes always belong to the layout; wider ones only
//! while they are below the retention count, so `app_2024.log` next to a
//! ten-file layout is left alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use contracts::SinkError;
use tracing::{debug, instrument};

/// Position of a managed file in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Active,
    Rotated(u32),
}

/// Naming scheme for one sink's files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    directory: PathBuf,
    base_name: String,
}

impl LogLayout {
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            base_name: base_name.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file currently written to
    pub fn active_path(&self) -> PathBuf {
        self.directory.join(format!("{}.log", self.base_name))
    }

    /// Path of the rotated file with the given suffix
    pub fn rotated_path(&self, index: usize) -> PathBuf {
        self.directory
            .join(format!("{}_{:02}.log", self.base_name, index))
    }

    fn classify(&self, file_name: &str, retention_count: usize) -> Option<Slot> {
        let stem = file_name.strip_suffix(".log")?;
        let rest = stem.strip_prefix(self.base_name.as_str())?;
        if rest.is_empty() {
            return Some(Slot::Active);
        }

        let digits = rest.strip_prefix('_')?;
        if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: u32 = digits.parse().ok()?;
        if format!("{index:02}") != digits {
            return None;
        }
        if digits.len() > 2 && index as usize >= retention_count {
            return None;
        }
        Some(Slot::Rotated(index))
    }

    /// Managed files, newest first
    pub fn list_by_recency(&self, retention_count: usize) -> io::Result<Vec<PathBuf>> {
        let mut files: Vec<(Slot, String, PathBuf)> = Vec::new();

        for dir_entry in fs::read_dir(&self.directory)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(slot) = self.classify(file_name, retention_count) {
                files.push((slot, file_name.to_string(), dir_entry.path()));
            }
        }

        files.sort();
        Ok(files.into_iter().map(|(_, _, path)| path).collect())
    }
}

/// What a rotation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationOutcome {
    pub deleted: usize,
    pub renamed: usize,
}

/// Rotate the files of `layout`, keeping `retention_count` files in total
///
/// Afterwards the active path is free and at most `retention_count - 1`
/// rotated files remain, numbered contiguously from `_00` (newest). Stops at
/// the first failing file operation; files already processed stay where they
/// are and the next pass picks up from there.
#[instrument(
    name = "file_rotation",
    skip(layout),
    fields(directory = %layout.directory.display())
)]
pub fn rotate(layout: &LogLayout, retention_count: usize) -> Result<RotationOutcome, SinkError> {
    let mut files = layout
        .list_by_recency(retention_count)
        .map_err(|e| SinkError::rotation(&layout.directory, e))?;

    let mut outcome = RotationOutcome::default();
    let keep = retention_count.saturating_sub(1);

    // Oldest first
    while files.len() > keep {
        if let Some(path) = files.pop() {
            remove_file(&path)?;
            outcome.deleted += 1;
        }
    }

    // Moves toward a larger suffix run oldest first, moves toward a smaller
    // suffix run newest first, so no rename lands on a file not yet moved.
    let moves: Vec<(PathBuf, PathBuf)> = files
        .into_iter()
        .enumerate()
        .map(|(index, path)| (path, layout.rotated_path(index)))
        .filter(|(from, to)| from != to)
        .collect();

    let (upward, downward): (Vec<_>, Vec<_>) = moves
        .into_iter()
        .partition(|(from, to)| {
            suffix_of(layout, from, retention_count) < suffix_of(layout, to, retention_count)
        });

    for (from, to) in upward.iter().rev().chain(downward.iter()) {
        fs::rename(from, to).map_err(|e| SinkError::rotation(from, e))?;
        outcome.renamed += 1;
    }

    debug!(
        deleted = outcome.deleted,
        renamed = outcome.renamed,
        "Rotation complete"
    );
    Ok(outcome)
}

/// Active file sorts before every suffix
fn suffix_of(layout: &LogLayout, path: &Path, retention_count: usize) -> Option<u32> {
    let slot = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| layout.classify(name, retention_count))?;
    match slot {
        Slot::Active => None,
        Slot::Rotated(n) => Some(n),
    }
}

fn remove_file(path: &Path) -> Result<(), SinkError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SinkError::rotation(path, e)),
    }
}
