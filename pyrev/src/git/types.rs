//! Diff-mode selection for patch extraction.

/// Which git comparison produces the patches under review.
///
/// The default is `Unstaged` (working directory vs index), matching what a
/// developer most recently touched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Working directory vs index (`git diff`).
    #[default]
    Unstaged,
    /// Index vs HEAD (`git diff --cached`).
    Staged,
    /// HEAD vs a base branch or commit (`git diff <base>..HEAD`).
    Base(String),
    /// Arbitrary commit range (`git diff A..B`).
    CommitRange {
        /// The starting ref (older commit or branch tip).
        from: String,
        /// The ending ref (newer commit or branch tip).
        to: String,
    },
}

impl DiffMode {
    /// The commitish the review is anchored to, when the mode names one.
    ///
    /// Handed to the runner as the optional commit reference of the host
    /// contract; diff modes against the working tree or index have none.
    pub fn commit(&self) -> Option<String> {
        match self {
            DiffMode::Unstaged | DiffMode::Staged | DiffMode::Base(_) => None,
            DiffMode::CommitRange { to, .. } => Some(to.clone()),
        }
    }
}
