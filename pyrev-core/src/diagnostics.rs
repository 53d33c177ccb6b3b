//! Serde model of pyright's `--outputjson` report.
//!
//! Decoding is tolerant per field: everything inside a diagnostic is optional
//! and defaults to absent, so a partially formed diagnostic flows through the
//! pipeline and gets dropped by the mapper instead of failing the run. Only
//! the top-level shape is strict — a document without a `diagnostics` array
//! is a decode error, fatal for the run.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;

/// Severity label attached to a pyright diagnostic.
///
/// Labels outside the known set are carried through verbatim rather than
/// rejected; the pipeline reports severities, it does not police them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Severity {
    Error,
    Warning,
    Information,
    /// Any label pyright emits that is not one of the known three.
    Other(String),
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        match label.as_str() {
            "error" => Self::Error,
            "warning" => Self::Warning,
            "information" => Self::Information,
            _ => Self::Other(label),
        }
    }
}

impl Severity {
    /// The label as pyright reported it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
            Self::Other(label) => label,
        }
    }

    /// True for the `error` level.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based position within a source file.
///
/// pyright also reports a character column here; the diff mapping only ever
/// consumes the line, so the column is not decoded.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub line: Option<u32>,
}

/// Zero-based inclusive line range of a diagnostic.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

/// One issue reported by pyright, decoded best-effort.
///
/// A `Diagnostic` only has meaning for the lifetime of one run; it is built
/// fresh from the captured report and never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub range: Option<Range>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Diagnostic {
    /// Zero-based first line of the reported range, if present.
    pub fn start_line(&self) -> Option<u32> {
        self.range.as_ref().and_then(|range| range.start.line)
    }

    /// Zero-based last line of the reported range, if present.
    pub fn end_line(&self) -> Option<u32> {
        self.range.as_ref().and_then(|range| range.end.line)
    }
}

/// Top-level shape of a pyright `--outputjson` document.
#[derive(Debug, Deserialize)]
pub struct PyrightReport {
    pub diagnostics: Vec<Diagnostic>,
}

/// Decodes captured checker stdout into a report.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the text is not JSON or lacks a top-level
/// `diagnostics` array — including the empty stdout left behind by a checker
/// that never started.
pub fn parse_report(stdout: &str) -> Result<PyrightReport, Error> {
    Ok(serde_json::from_str(stdout)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_diagnostic() {
        let report = parse_report(
            r#"{"diagnostics":[{"file":"a.py","severity":"warning",
                "range":{"start":{"line":9},"end":{"line":10}},
                "message":"unused import"}]}"#,
        )
        .unwrap();

        let diag = &report.diagnostics[0];
        assert_eq!(diag.file.as_deref(), Some(std::path::Path::new("a.py")));
        assert_eq!(diag.severity, Some(Severity::Warning));
        assert_eq!(diag.start_line(), Some(9));
        assert_eq!(diag.end_line(), Some(10));
        assert_eq!(diag.message.as_deref(), Some("unused import"));
    }

    #[test]
    fn missing_fields_decode_to_absent() {
        let report = parse_report(r#"{"diagnostics":[{}]}"#).unwrap();

        let diag = &report.diagnostics[0];
        assert!(diag.file.is_none());
        assert!(diag.severity.is_none());
        assert!(diag.start_line().is_none());
        assert!(diag.end_line().is_none());
        assert!(diag.message.is_none());
    }

    #[test]
    fn partial_range_decodes_to_absent_endpoints() {
        let report =
            parse_report(r#"{"diagnostics":[{"file":"a.py","range":{"start":{"line":3}}}]}"#)
                .unwrap();

        let diag = &report.diagnostics[0];
        assert_eq!(diag.start_line(), Some(3));
        assert!(diag.end_line().is_none());
    }

    #[test]
    fn unknown_severity_passes_through() {
        let report =
            parse_report(r#"{"diagnostics":[{"severity":"fatal"}]}"#).unwrap();

        let severity = report.diagnostics[0].severity.clone().unwrap();
        assert_eq!(severity, Severity::Other("fatal".to_owned()));
        assert_eq!(severity.as_str(), "fatal");
        assert!(!severity.is_error());
    }

    #[test]
    fn top_level_shape_is_strict() {
        assert!(parse_report("").is_err());
        assert!(parse_report("pyright: command not found").is_err());
        assert!(parse_report("{}").is_err());
        assert!(parse_report(r#"{"summary":{"errorCount":0}}"#).is_err());
    }

    #[test]
    fn extra_top_level_keys_are_ignored() {
        let report = parse_report(
            r#"{"version":"1.1.0","diagnostics":[],"summary":{"errorCount":0}}"#,
        )
        .unwrap();
        assert!(report.diagnostics.is_empty());
    }
}
