/*!
 * File matching and classification
 *
 * The extension filter is a hard gate: files that fail it are dropped.
 * Ignore rules and exclude patterns only mark a file's content as excluded,
 * so the file still shows up in the tree.
 */

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::enumerate::{collect_candidates, Strategy};
use crate::error::Result;
use crate::filters::{compile_patterns, is_excluded, ExcludePattern, ExtensionSet};
use crate::ignore_rules::IgnoreFilter;
use crate::types::MatchedFile;
use crate::utils::{compare_relative, path_to_posix};

/// Outcome of a scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Verified absolute root
    pub root: PathBuf,
    /// Strategy that produced the candidates
    pub strategy: Strategy,
    /// Number of candidates before the extension gate
    pub candidates: usize,
    /// Surviving files, sorted by relative path
    pub files: Vec<MatchedFile>,
}

/// Scanner for a dump root
pub struct Scanner {
    /// Scanner configuration
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Enumerate, filter and classify the files below the configured root
    pub fn scan(&self) -> Result<ScanResult> {
        let root = self.config.resolve_root()?;

        let extensions = ExtensionSet::parse(&self.config.extensions);
        let patterns = compile_patterns(&self.config.exclude_patterns);
        let ignore_filter = if self.config.respect_ignore_files {
            IgnoreFilter::load(&root)?
        } else {
            None
        };
        debug!(
            extensions = ?extensions.as_slice(),
            patterns = patterns.len(),
            ignore_rules = ignore_filter.is_some(),
            "filters ready"
        );

        let (strategy, candidates) = collect_candidates(&root, &self.config.strategies);
        let candidate_count = candidates.len();

        let mut files: Vec<MatchedFile> = build_matched_files(&root, &candidates)
            .into_iter()
            .filter(|file| extensions.matches(&file.relative))
            .map(|file| classify(file, ignore_filter.as_ref(), &patterns))
            .collect();
        files.sort_by(|a, b| compare_relative(&a.relative, &b.relative));

        debug!(
            %strategy,
            candidates = candidate_count,
            matched = files.len(),
            content_excluded = files.iter().filter(|f| f.content_excluded).count(),
            "scan complete"
        );

        Ok(ScanResult {
            root,
            strategy,
            candidates: candidate_count,
            files,
        })
    }
}

/// Turn raw candidates into matched-file records
pub fn build_matched_files(root: &Path, candidates: &[String]) -> Vec<MatchedFile> {
    candidates
        .iter()
        .map(|candidate| MatchedFile::new(root, candidate))
        .collect()
}

/// Set the content-exclusion flag from ignore rules and exclude patterns
pub fn classify(
    mut file: MatchedFile,
    ignore_filter: Option<&IgnoreFilter>,
    patterns: &[ExcludePattern],
) -> MatchedFile {
    let ignored = ignore_filter.is_some_and(|rules| rules.ignores(&file.relative));
    let excluded = is_excluded(&path_to_posix(&file.absolute), &file.relative, patterns);
    file.content_excluded = ignored || excluded;
    file
}
