/*!
 * Core types and data structures for bctx
 */

use std::path::{Path, PathBuf};

use crate::utils::normalize_relative;

/// A candidate file that survived enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Absolute path, the root joined with `relative`
    pub absolute: PathBuf,
    /// Root-relative path in forward-slash form without a leading `./`
    pub relative: String,
    /// Whether the content block is suppressed (ignore rule or exclude pattern hit)
    pub content_excluded: bool,
}

impl MatchedFile {
    /// Build a record from a root and a raw candidate path
    pub fn new(root: &Path, candidate: &str) -> Self {
        let relative = normalize_relative(candidate);
        Self {
            absolute: root.join(&relative),
            relative,
            content_excluded: false,
        }
    }

    /// Heading form of the relative path, always starting with `/`
    pub fn heading_path(&self) -> String {
        if self.relative.starts_with('/') {
            self.relative.clone()
        } else {
            format!("/{}", self.relative)
        }
    }
}
