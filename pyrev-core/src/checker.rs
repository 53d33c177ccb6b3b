//! Invocation of the external pyright executable.
//!
//! pyright always runs against the whole project tree. Scoping the run to the
//! changed files breaks pyright's cross-file import resolution
//! (<https://github.com/microsoft/pyright/issues/1015>), so the per-file
//! narrowing happens later in the diff mapper, never here.
//!
//! The invocation is synchronous and blocking, with no timeout: a hung
//! pyright hangs the review run.

use std::process::Command;

use crate::error::Error;

/// Captured output streams of one checker run.
#[derive(Debug, Clone, Default)]
pub struct CheckerOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Seam between the pipeline and the external analysis process.
///
/// Production code uses [`Pyright`]; tests substitute an implementation that
/// returns a canned report.
pub trait Checker {
    /// Runs the checker over the project and captures both output streams.
    fn check(&self) -> Result<CheckerOutput, Error>;
}

/// The real pyright invoker.
///
/// Executable resolution is fixed: a `pyright` on the search path wins,
/// otherwise the run goes through the `npx` shim that a node package install
/// provides. Neither the executable path nor extra flags are configurable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pyright;

impl Pyright {
    fn command() -> Command {
        match which::which("pyright") {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "found pyright on PATH");
                Command::new(path)
            }
            Err(_) => {
                let mut npx = Command::new("npx");
                npx.arg("pyright");
                npx
            }
        }
    }
}

impl Checker for Pyright {
    fn check(&self) -> Result<CheckerOutput, Error> {
        let output = Self::command().arg("--lib").arg("--outputjson").output()?;

        // pyright exits nonzero whenever it found any diagnostic, so the
        // status carries no failure signal; a broken run shows up downstream
        // as an undecodable report instead.
        tracing::debug!(status = %output.status, "pyright finished");

        Ok(CheckerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
