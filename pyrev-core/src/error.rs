//! Error type for the review pipeline.

use thiserror::Error;

/// Failures that abort a review run.
///
/// There are deliberately few variants: the pipeline has no recovery paths.
/// Diagnostics that merely fail to land on an added line are dropped by the
/// mapper and never become errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The pyright process could not be spawned or its streams captured.
    #[error("failed to run pyright: {0}")]
    Checker(#[from] std::io::Error),

    /// pyright's stdout was not the expected JSON report. This also covers
    /// the not-installed case, where the captured stdout is empty.
    #[error("failed to decode pyright report: {0}")]
    Parse(#[from] serde_json::Error),
}
