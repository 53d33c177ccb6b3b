//! Review output records handed back to the host.

use std::fmt;
use std::path::PathBuf;

use crate::diagnostics::{Diagnostic, Severity};

/// One reviewable finding: a mapped diagnostic pinned to a line of the change.
///
/// Built once per successfully mapped diagnostic and handed off immediately;
/// the pipeline retains no copy. Severity and message stay optional — absent
/// fields from a best-effort decode propagate rather than being invented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMessage {
    /// Path of the changed file, as the checker reported it.
    pub path: PathBuf,
    /// One-based line number within the change.
    pub line: u32,
    /// Severity label carried over from the diagnostic.
    pub severity: Option<Severity>,
    /// Free-text description from the checker.
    pub message: Option<String>,
}

impl ReviewMessage {
    /// Builds the message for a diagnostic anchored at `line`.
    ///
    /// The mapper has already required the diagnostic's file to resolve the
    /// anchor, so this only returns `None` on patch data the mapper never saw.
    pub(crate) fn build(line: u32, diagnostic: &Diagnostic) -> Option<Self> {
        Some(Self {
            path: diagnostic.file.clone()?,
            line,
            severity: diagnostic.severity.clone(),
            message: diagnostic.message.clone(),
        })
    }
}

impl fmt::Display for ReviewMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = self
            .severity
            .as_ref()
            .map(Severity::as_str)
            .unwrap_or("unspecified");
        let text = self.message.as_deref().unwrap_or("");
        write!(f, "{}:{}: {severity}: {text}", self.path.display(), self.line)
    }
}
