//! Mapping checker diagnostics onto lines added by the change.
//!
//! pyright reports line ranges over whole files; a review only wants issues
//! on lines the author touched. This module translates between the two
//! views: a diagnostic survives only if its range overlaps a line the diff
//! added, and it anchors on the deepest such line.

use crate::diagnostics::Diagnostic;
use crate::patch::Patch;

/// Resolves the review anchor line for `diagnostic`, or `None` when the
/// diagnostic does not touch any added line.
///
/// `patches` must already be narrowed to the change's reviewable files; this
/// narrows further to the diagnostic's own file by plain path equality (case
/// and symlink differences are not reconciled).
///
/// pyright's range is zero-based and inclusive while added-line numbers are
/// one-based, so both endpoints shift up by one before the overlap test.
/// Among overlapping added lines the maximum new-file line number wins. A
/// diagnostic missing its file or either range endpoint matches nothing.
pub fn anchor_line<P: Patch>(patches: &[P], diagnostic: &Diagnostic) -> Option<u32> {
    let file = diagnostic.file.as_deref()?;
    let start = diagnostic.start_line()?.checked_add(1)?;
    let end = diagnostic.end_line()?.checked_add(1)?;

    let mut anchor: Option<u32> = None;
    for line in patches
        .iter()
        .filter(|patch| patch.path() == file)
        .flat_map(|patch| patch.added_lines())
    {
        if !(start..=end).contains(&line.new_lineno) {
            continue;
        }
        match anchor {
            None => anchor = Some(line.new_lineno),
            Some(best) => {
                // Added-line numbers are unique per file in a well-formed
                // diff; an equal candidate means the patch data is corrupt.
                debug_assert_ne!(
                    best,
                    line.new_lineno,
                    "duplicate added line {} for {}",
                    best,
                    file.display()
                );
                if line.new_lineno > best {
                    anchor = Some(line.new_lineno);
                }
            }
        }
    }
    anchor
}
