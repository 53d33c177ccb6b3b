//! pyrev-core — pyright findings mapped onto review diffs.
//!
//! The crate is one linear pipeline, invoked once per review: filter the
//! change's patches down to Python files with additions, run pyright over the
//! whole project, decode its JSON report, keep the diagnostics whose line
//! range overlaps a line the diff actually added, and hand back one
//! [`ReviewMessage`] per surviving diagnostic, anchored at the deepest added
//! line it touches.
//!
//! The host owns the diff. Patches arrive through the [`Patch`] contract,
//! results leave as [`ReviewMessage`] values, and nothing is retained between
//! runs. pyright itself is reached through the [`Checker`] seam so tests can
//! substitute a canned report for the real subprocess.

pub mod checker;
pub mod diagnostics;
pub mod error;
pub mod mapper;
pub mod message;
pub mod patch;
pub mod runner;

pub use checker::{Checker, CheckerOutput, Pyright};
pub use diagnostics::{Diagnostic, Position, PyrightReport, Range, Severity};
pub use error::Error;
pub use message::ReviewMessage;
pub use patch::{AddedLine, FilePatch, Patch};
pub use runner::PyrightRunner;
