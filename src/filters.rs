/*!
 * Exclude-pattern and extension filtering
 */

use glob_match::glob_match;

use crate::utils::to_posix;

/// A user-supplied exclude glob compiled for three-way matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludePattern {
    /// Pattern in forward-slash form
    pattern: String,
    /// Slashless patterns are also tested against bare file names
    match_basename: bool,
}

impl ExcludePattern {
    /// Compile one raw pattern; `None` for blank input
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let pattern = to_posix(trimmed);
        let match_basename = !pattern.contains('/');
        Some(Self {
            pattern,
            match_basename,
        })
    }

    /// The normalized glob
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Test an absolute path
    pub fn matches_absolute(&self, absolute: &str) -> bool {
        glob_match(&self.pattern, &to_posix(absolute))
    }

    /// Test a root-relative path
    pub fn matches_relative(&self, relative: &str) -> bool {
        glob_match(&self.pattern, &to_posix(relative))
    }

    /// Test a bare file name; always false for patterns containing `/`
    pub fn matches_basename(&self, basename: &str) -> bool {
        self.match_basename && glob_match(&self.pattern, basename)
    }
}

/// Compile raw exclude patterns, dropping blank entries
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<ExcludePattern> {
    patterns
        .iter()
        .filter_map(|pattern| ExcludePattern::new(pattern.as_ref()))
        .collect()
}

/// Whether a file is hit by any exclude pattern
pub fn is_excluded(absolute: &str, relative: &str, patterns: &[ExcludePattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let basename = relative.rsplit('/').next().unwrap_or(relative);

    patterns.iter().any(|pattern| {
        pattern.matches_absolute(absolute)
            || pattern.matches_relative(relative)
            || pattern.matches_basename(basename)
    })
}

/// Requested file extensions, without dots, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// Parse raw tokens; each token may hold several `|`-separated extensions
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut extensions: Vec<String> = Vec::new();

        for token in tokens {
            for piece in token.as_ref().split('|') {
                let trimmed = piece.trim();
                let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
                if !trimmed.is_empty() && !extensions.iter().any(|e| e == trimmed) {
                    extensions.push(trimmed.to_string());
                }
            }
        }

        Self { extensions }
    }

    /// True when no extensions were requested
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// The parsed extensions
    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    /// Whether a relative path passes the extension gate
    pub fn matches(&self, relative: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        match extension_of(relative) {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

/// Text after the final `.` of the last segment.
///
/// A single leading dot belongs to the stem, so `.gitignore` has no
/// extension while `..x` has `x`. A trailing dot yields no extension.
fn extension_of(relative: &str) -> Option<&str> {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    let stem_start = usize::from(name.starts_with('.'));
    let dot = name[stem_start..].rfind('.')? + stem_start;
    let ext = &name[dot + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
