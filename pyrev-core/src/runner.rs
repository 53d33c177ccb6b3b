//! The plugin entry point: filter, invoke, parse, map, build.
//!
//! Control flow is strictly sequential with no retries. The only branching is
//! the guard for an empty patch selection, which short-circuits the run
//! before pyright is ever spawned.

use crate::checker::{Checker, Pyright};
use crate::diagnostics::parse_report;
use crate::error::Error;
use crate::mapper::anchor_line;
use crate::message::ReviewMessage;
use crate::patch::Patch;

/// Runs pyright for one review and maps its findings onto the change.
///
/// Holds the host-supplied patches and optional commit reference for the
/// duration of a single run; nothing is retained afterwards.
pub struct PyrightRunner<'a, P: Patch> {
    patches: &'a [P],
    commit: Option<String>,
}

impl<'a, P: Patch> PyrightRunner<'a, P> {
    /// Creates a runner over the host's patches. `commit` is the review's
    /// commitish, when the host has one.
    pub fn new(patches: &'a [P], commit: Option<String>) -> Self {
        Self { patches, commit }
    }

    /// Runs the full pipeline with the real pyright executable.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub fn run(&self) -> Result<Vec<ReviewMessage>, Error> {
        self.run_with(&Pyright)
    }

    /// Runs the full pipeline against any [`Checker`] implementation.
    ///
    /// Non-empty checker stderr is surfaced as a warning and the run
    /// continues with whatever stdout was captured. Diagnostics that do not
    /// land on an added line are dropped, never reported as errors.
    ///
    /// # Errors
    ///
    /// Fails when the checker cannot be executed or its stdout is not a
    /// valid JSON report; either is fatal for the run.
    pub fn run_with<C: Checker>(&self, checker: &C) -> Result<Vec<ReviewMessage>, Error> {
        let python_patches = self.python_patches();
        if python_patches.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            files = python_patches.len(),
            commit = self.commit.as_deref().unwrap_or("none"),
            "running pyright over the project"
        );

        let output = checker.check()?;

        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            tracing::warn!("pyright reported on stderr:\n{stderr}");
        }
        tracing::debug!("pyright stdout:\n{}", output.stdout);

        let report = parse_report(&output.stdout)?;

        let messages = report
            .diagnostics
            .iter()
            .filter_map(|diagnostic| {
                anchor_line(&python_patches, diagnostic)
                    .and_then(|line| ReviewMessage::build(line, diagnostic))
            })
            .collect();
        Ok(messages)
    }

    /// Patches worth checking: positive additions and a `.py` path.
    fn python_patches(&self) -> Vec<&'a P> {
        self.patches
            .iter()
            .filter(|patch| patch.additions() > 0)
            .filter(|patch| patch.path().extension().is_some_and(|ext| ext == "py"))
            .collect()
    }
}
