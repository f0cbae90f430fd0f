/*!
 * Ignore-file loading and gitignore-style matching
 *
 * `.gitignore` and `.bctxignore` at the scan root are merged into one rule
 * set, gitignore rules first, so tool-specific rules (including negations)
 * can override them.
 */

use std::fs;
use std::io;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use crate::error::Result;

/// Version-control ignore file read from the root
pub const GITIGNORE_FILENAME: &str = ".gitignore";

/// Tool-specific ignore file read from the root
pub const BCTX_IGNORE_FILENAME: &str = ".bctxignore";

/// Compiled ignore rules for one scan root
#[derive(Debug)]
pub struct IgnoreFilter {
    rules: Gitignore,
}

impl IgnoreFilter {
    /// Load and merge the ignore files found in `root`.
    ///
    /// Returns `None` when neither file exists or both are blank.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let gitignore = read_ignore_file(root, GITIGNORE_FILENAME)?;
        let bctxignore = read_ignore_file(root, BCTX_IGNORE_FILENAME)?;

        let combined = [gitignore, bctxignore]
            .into_iter()
            .filter(|contents| !contents.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Self::from_contents(root, &combined)
    }

    /// Compile rules from raw ignore-file text
    pub fn from_contents(root: &Path, contents: &str) -> Result<Option<Self>> {
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let mut builder = GitignoreBuilder::new(root);
        for line in contents.lines() {
            if let Err(e) = builder.add_line(None, line) {
                warn!(line, error = %e, "skipping invalid ignore pattern");
            }
        }

        let rules = builder.build()?;
        debug!(rules = rules.num_ignores() + rules.num_whitelists(), "compiled ignore rules");
        Ok(Some(Self { rules }))
    }

    /// Whether a root-relative, forward-slash path is ignored.
    ///
    /// Ancestor directories are checked shallowest first; once a directory is
    /// ignored nothing below it can be re-included by a negated pattern.
    pub fn ignores(&self, relative: &str) -> bool {
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return false;
        }

        let mut prefix = String::new();
        for segment in &segments[..segments.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if self.rules.matched(&prefix, true).is_ignore() {
                return true;
            }
        }

        self.rules.matched(segments.join("/"), false).is_ignore()
    }
}

/// Read an ignore file, treating absence as empty content
fn read_ignore_file(root: &Path, filename: &str) -> Result<String> {
    match fs::read(root.join(filename)) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).trim().to_string()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn filter(contents: &str) -> IgnoreFilter {
        IgnoreFilter::from_contents(Path::new("/proj"), contents)
            .unwrap()
            .expect("rules should compile")
    }

    #[test]
    fn test_blank_contents_is_no_filter() {
        assert!(IgnoreFilter::from_contents(Path::new("/proj"), "")
            .unwrap()
            .is_none());
        assert!(IgnoreFilter::from_contents(Path::new("/proj"), "  \n\n")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_comment_only_is_filter_that_ignores_nothing() {
        let rules = filter("# nothing here");
        assert!(!rules.ignores("a.ts"));
    }

    #[test]
    fn test_basename_pattern_matches_any_depth() {
        let rules = filter("*.log");
        assert!(rules.ignores("debug.log"));
        assert!(rules.ignores("deep/nested/debug.log"));
        assert!(!rules.ignores("debug.txt"));
    }

    #[test]
    fn test_anchored_pattern() {
        let rules = filter("/build.ts");
        assert!(rules.ignores("build.ts"));
        assert!(!rules.ignores("src/build.ts"));
    }

    #[test]
    fn test_directory_pattern_applies_to_contents() {
        let rules = filter("dist/");
        assert!(rules.ignores("dist/bundle.js"));
        assert!(rules.ignores("pkg/dist/deep/x.js"));
        // A file named like the directory is not a directory
        assert!(!rules.ignores("dist"));
    }

    #[test]
    fn test_negation_re_includes_file() {
        let rules = filter("*.md\n!README.md");
        assert!(rules.ignores("CHANGELOG.md"));
        assert!(!rules.ignores("README.md"));
    }

    #[test]
    fn test_negation_cannot_escape_ignored_directory() {
        let rules = filter("build/\n!build/keep.ts");
        assert!(rules.ignores("build/other.ts"));
        assert!(rules.ignores("build/keep.ts"));
    }

    #[test]
    fn test_negated_directory_restores_children() {
        let rules = filter("/*\n!/src/");
        assert!(rules.ignores("top.ts"));
        assert!(!rules.ignores("src/lib.ts"));
    }

    #[test]
    fn test_wildcards_and_classes() {
        let rules = filter("logs/**/*.tmp\nfile?.txt\n[ab].rs");
        assert!(rules.ignores("logs/a/b/c.tmp"));
        assert!(rules.ignores("logs/c.tmp"));
        assert!(rules.ignores("file1.txt"));
        assert!(!rules.ignores("file10.txt"));
        assert!(rules.ignores("a.rs"));
        assert!(!rules.ignores("c.rs"));
    }

    #[test]
    fn test_load_merges_both_files_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(GITIGNORE_FILENAME), "*.md\n").unwrap();
        fs::write(dir.path().join(BCTX_IGNORE_FILENAME), "!keep.md\nsecret.ts\n").unwrap();

        let rules = IgnoreFilter::load(dir.path()).unwrap().unwrap();
        assert!(rules.ignores("notes.md"));
        assert!(!rules.ignores("keep.md"));
        assert!(rules.ignores("secret.ts"));
        assert!(!rules.ignores("main.ts"));
    }

    #[test]
    fn test_load_without_files_is_none() {
        let dir = tempdir().unwrap();
        assert!(IgnoreFilter::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_propagates_non_missing_errors() {
        let dir = tempdir().unwrap();
        // A directory where the file is expected cannot be read as a file
        fs::create_dir(dir.path().join(GITIGNORE_FILENAME)).unwrap();
        assert!(IgnoreFilter::load(dir.path()).is_err());
    }
}
