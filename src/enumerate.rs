/*!
 * Candidate enumeration with strategy fallback
 *
 * Strategies are tried in order and the first one that yields a non-empty
 * listing wins. The filesystem walk is the universal fallback and always
 * runs last if nothing earlier produced candidates.
 */

use std::path::Path;
use std::process::{Command, Stdio};

use clap::ValueEnum;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::utils::{parse_null_separated, path_to_posix, to_posix};

/// Directory name that is never descended into or listed
const VCS_DIR: &str = ".git";

/// A way of listing the files below a root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// `git ls-files` for tracked and untracked-but-not-ignored files
    Git,
    /// `rg --files` including hidden files, excluding `.git/`
    Ripgrep,
    /// Manual directory walk
    Walk,
}

impl Strategy {
    /// All strategies in priority order
    pub fn chain() -> Vec<Strategy> {
        Strategy::iter().collect()
    }
}

/// Collect root-relative candidate paths using the first successful strategy.
///
/// Returns the strategy that produced the listing alongside the paths.
pub fn collect_candidates(root: &Path, strategies: &[Strategy]) -> (Strategy, Vec<String>) {
    for &strategy in strategies {
        let listing = match strategy {
            Strategy::Git => collect_with_git(root),
            Strategy::Ripgrep => collect_with_ripgrep(root),
            Strategy::Walk => break,
        };

        match listing {
            Some(paths) if !paths.is_empty() => {
                debug!(%strategy, count = paths.len(), "enumerated candidates");
                return (strategy, paths.iter().map(|p| to_posix(p)).collect());
            }
            _ => debug!(%strategy, "strategy produced no candidates, falling through"),
        }
    }

    let paths = walk_filesystem(root);
    debug!(strategy = %Strategy::Walk, count = paths.len(), "enumerated candidates");
    (Strategy::Walk, paths)
}

/// Tracked plus untracked-but-not-ignored files from git
fn collect_with_git(root: &Path) -> Option<Vec<String>> {
    let mut command = Command::new("git");
    command
        .arg("-C")
        .arg(root)
        .args(["ls-files", "-z", "-co", "--exclude-standard"]);
    run_listing(command)
}

/// Every non-ignored file ripgrep would search, hidden files included
fn collect_with_ripgrep(root: &Path) -> Option<Vec<String>> {
    let mut command = Command::new("rg");
    command
        .args(["--files", "-0", "--hidden", "-g", "!.git/"])
        .current_dir(root);
    run_listing(command)
}

/// Run a listing tool and parse its NUL-delimited stdout.
///
/// `None` when the tool is missing, exits non-zero or prints nothing.
fn run_listing(mut command: Command) -> Option<Vec<String>> {
    command.stdin(Stdio::null()).stderr(Stdio::null());
    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            debug!(program = ?command.get_program(), error = %e, "listing tool unavailable");
            return None;
        }
    };

    if !output.status.success() || output.stdout.is_empty() {
        debug!(program = ?command.get_program(), status = %output.status, "listing tool failed");
        return None;
    }

    Some(parse_null_separated(&output.stdout))
}

/// Walk the tree below `root`, recording files and symlinks.
///
/// Symlinks are recorded as-is and never followed. Unreadable entries are
/// skipped.
pub fn walk_filesystem(root: &Path) -> Vec<String> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != VCS_DIR);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let file_type = entry.file_type();
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }

        match entry.path().strip_prefix(root) {
            Ok(relative) => files.push(path_to_posix(relative)),
            Err(_) => warn!(path = %entry.path().display(), "entry outside of root"),
        }
    }

    files
}
