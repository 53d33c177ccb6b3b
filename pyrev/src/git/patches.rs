//! Synchronous patch extraction from a git repository.
//!
//! git2's diff types borrow from the `Diff` they came from, so everything
//! the pipeline needs is copied into owned [`FilePatch`] records inside the
//! foreach callbacks and the `Diff` is dropped before the review runs.

use std::cell::RefCell;
use std::path::Path;

use git2::{Diff, DiffOptions, Repository};
use pyrev_core::{AddedLine, FilePatch};

use super::types::DiffMode;

/// Opens the repository at `path` and extracts owned patches for `mode`.
///
/// # Errors
///
/// Returns `git2::Error` if the repository cannot be opened, a ref in `mode`
/// does not resolve, or tree-walking fails.
pub fn load_patches(path: &str, mode: &DiffMode) -> Result<Vec<FilePatch>, git2::Error> {
    let repo = Repository::open(path)?;
    let diff = diff_for_mode(&repo, mode)?;
    Ok(extract_patches(&diff))
}

/// Obtains a `git2::Diff` for the requested comparison.
fn diff_for_mode<'a>(repo: &'a Repository, mode: &DiffMode) -> Result<Diff<'a>, git2::Error> {
    let mut opts = DiffOptions::new();
    match mode {
        DiffMode::Unstaged => repo.diff_index_to_workdir(None, Some(&mut opts)),
        DiffMode::Staged => {
            let head_tree = repo.head()?.peel_to_commit()?.tree()?;
            repo.diff_tree_to_index(Some(&head_tree), None, Some(&mut opts))
        }
        DiffMode::Base(base) => {
            let base_tree = repo.revparse_single(base)?.peel_to_commit()?.tree()?;
            let head_tree = repo.head()?.peel_to_commit()?.tree()?;
            repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))
        }
        DiffMode::CommitRange { from, to } => {
            let old_tree = repo.revparse_single(from)?.peel_to_commit()?.tree()?;
            let new_tree = repo.revparse_single(to)?.peel_to_commit()?.tree()?;
            repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
        }
    }
}

/// Walks the diff once, collecting one `FilePatch` per delta with the
/// new-file line number of every `+` line.
///
/// The file callback fires once per delta in order, so `last_mut()` in the
/// line callback always refers to the current file. RefCell shares mutable
/// access between the two closures; git2 invokes them sequentially on the
/// calling thread.
fn extract_patches(diff: &Diff<'_>) -> Vec<FilePatch> {
    let patches: RefCell<Vec<FilePatch>> = RefCell::new(Vec::new());

    let _ = diff.foreach(
        &mut |delta, _progress| {
            let path = delta
                .new_file()
                .path()
                .unwrap_or(Path::new("unknown"))
                .to_path_buf();
            patches.borrow_mut().push(FilePatch {
                path,
                additions: 0,
                added_lines: Vec::new(),
            });
            true
        },
        None,
        None,
        Some(&mut |_delta, _hunk, line| {
            if line.origin() != '+' {
                return true;
            }
            let mut patches = patches.borrow_mut();
            if let Some(patch) = patches.last_mut() {
                patch.additions += 1;
                if let Some(new_lineno) = line.new_lineno() {
                    patch.added_lines.push(AddedLine { new_lineno });
                }
            }
            true
        }),
    );

    patches.into_inner()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use git2::{Repository, Signature};

    use super::*;

    fn init_repo(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        repo
    }

    /// Writes `contents` to `name`, stages it, and commits. Returns the
    /// commit id so tests can build ranges.
    fn commit_file(repo: &Repository, name: &str, contents: &str) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), contents).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let sig = Signature::now("test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
            .unwrap()
    }

    #[test]
    fn unstaged_edit_yields_added_line_numbers() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = init_repo(dir.path());
        commit_file(&repo, "a.py", "import os\n");

        // Append two lines without staging them.
        fs::write(
            dir.path().join("a.py"),
            "import os\nprint(os.name)\nprint(os.sep)\n",
        )
        .unwrap();

        let path = dir.path().to_string_lossy().into_owned();
        let patches = load_patches(&path, &DiffMode::Unstaged).unwrap();

        assert_eq!(patches.len(), 1);
        let patch = &patches[0];
        assert_eq!(patch.path, Path::new("a.py").to_path_buf());
        assert_eq!(patch.additions, 2);
        let linenos: Vec<u32> = patch.added_lines.iter().map(|l| l.new_lineno).collect();
        assert_eq!(linenos, vec![2, 3]);
    }

    #[test]
    fn staged_edit_uses_the_index() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = init_repo(dir.path());
        commit_file(&repo, "a.py", "x = 1\n");

        // Stage a new line but leave a further unstaged one in the workdir.
        fs::write(dir.path().join("a.py"), "x = 1\ny = 2\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.py")).unwrap();
        index.write().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\ny = 2\nz = 3\n").unwrap();

        let path = dir.path().to_string_lossy().into_owned();
        let patches = load_patches(&path, &DiffMode::Staged).unwrap();

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].additions, 1);
        assert_eq!(patches[0].added_lines, vec![AddedLine { new_lineno: 2 }]);
    }

    #[test]
    fn commit_range_diffs_two_commits() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = init_repo(dir.path());
        let first = commit_file(&repo, "a.py", "a = 1\n");
        commit_file(&repo, "a.py", "a = 1\nb = 2\nc = 3\n");

        let path = dir.path().to_string_lossy().into_owned();
        let mode = DiffMode::CommitRange {
            from: first.to_string(),
            to: "HEAD".to_owned(),
        };
        let patches = load_patches(&path, &mode).unwrap();

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].additions, 2);
        let linenos: Vec<u32> = patches[0].added_lines.iter().map(|l| l.new_lineno).collect();
        assert_eq!(linenos, vec![2, 3]);
    }

    #[test]
    fn clean_tree_yields_no_patches() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = init_repo(dir.path());
        commit_file(&repo, "a.py", "a = 1\n");

        let path = dir.path().to_string_lossy().into_owned();
        let patches = load_patches(&path, &DiffMode::Unstaged).unwrap();

        assert!(patches.is_empty());
    }

    #[test]
    fn commit_accessor_follows_the_mode() {
        assert_eq!(DiffMode::Unstaged.commit(), None);
        assert_eq!(DiffMode::Staged.commit(), None);
        assert_eq!(DiffMode::Base("main".to_owned()).commit(), None);
        assert_eq!(
            DiffMode::CommitRange {
                from: "abc".to_owned(),
                to: "HEAD".to_owned()
            }
            .commit(),
            Some("HEAD".to_owned())
        );
    }
}
