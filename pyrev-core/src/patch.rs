//! The patch contract consumed by the review pipeline.
//!
//! The host that computes the diff owns the real patch representation; the
//! pipeline needs exactly three facts per changed file: its path, how many
//! lines were added, and the new-file line number of every added line.
//! [`Patch`] captures that surface, and [`FilePatch`] is the owned
//! implementation built by the git adapter and by tests.
//!
//! Patch data is immutable once built and never outlives a single run.

use std::path::{Path, PathBuf};

/// One line added by a patch, identified by its line number in the new file.
///
/// Line numbers are one-based, matching unified-diff convention. Within a
/// well-formed patch every added line of a file has a distinct number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedLine {
    /// One-based line number in the post-change file.
    pub new_lineno: u32,
}

/// Read-only view of one file's change within a review.
pub trait Patch {
    /// Repository-relative path of the changed file.
    fn path(&self) -> &Path;

    /// Number of lines the patch adds.
    fn additions(&self) -> usize;

    /// Added-line records in file order.
    fn added_lines(&self) -> &[AddedLine];
}

impl<P: Patch + ?Sized> Patch for &P {
    fn path(&self) -> &Path {
        (**self).path()
    }

    fn additions(&self) -> usize {
        (**self).additions()
    }

    fn added_lines(&self) -> &[AddedLine] {
        (**self).added_lines()
    }
}

/// Owned patch record, fully built before the pipeline runs.
#[derive(Debug, Clone)]
pub struct FilePatch {
    /// Repository-relative path of the changed file.
    pub path: PathBuf,
    /// Total `+` lines in the patch.
    pub additions: usize,
    /// New-file line numbers of the added lines, in file order.
    pub added_lines: Vec<AddedLine>,
}

impl Patch for FilePatch {
    fn path(&self) -> &Path {
        &self.path
    }

    fn additions(&self) -> usize {
        self.additions
    }

    fn added_lines(&self) -> &[AddedLine] {
        &self.added_lines
    }
}
