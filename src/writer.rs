/*!
 * Tree and content rendering for bctx
 */

use std::collections::HashSet;
use std::fs;
use std::io::Write;

use tracing::debug;

use crate::error::{Result, ResultExt};
use crate::types::MatchedFile;
use crate::utils::compare_relative;

/// First line of the tree block
pub const TREE_HEADER: &str = "### Tree (filtered):";

/// Note written to the diagnostic stream when the extension gate leaves nothing
pub const NO_MATCHES_MESSAGE: &str = "[bctx] No files matched the extension filters.";

/// Counters for the content blocks written by one dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    /// Files whose bytes were written
    pub written: usize,
    /// Files that could not be read
    pub unreadable: usize,
    /// Files listed in the tree but with content withheld
    pub suppressed: usize,
}

/// Writer for the primary (dump) and diagnostic streams
pub struct DumpWriter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> DumpWriter<W, E> {
    /// Create a new writer
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the writer, returning both streams
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Write the indented tree of every file, directories listed once
    pub fn write_tree(&mut self, files: &[MatchedFile]) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "{}", TREE_HEADER).output_context(|| "writing tree")?;

        let mut seen: HashSet<String> = HashSet::new();
        for file in sorted(files) {
            let segments: Vec<&str> = file.relative.split('/').collect();
            let (leaf, dirs) = match segments.split_last() {
                Some(parts) => parts,
                None => continue,
            };

            let mut cursor = String::new();
            for (depth, segment) in dirs.iter().enumerate() {
                if !cursor.is_empty() {
                    cursor.push('/');
                }
                cursor.push_str(segment);
                if seen.insert(cursor.clone()) {
                    writeln!(out, "  {}{}/", "  ".repeat(depth), segment)
                        .output_context(|| "writing tree")?;
                }
            }

            writeln!(out, "  {}{}", "  ".repeat(dirs.len()), leaf)
                .output_context(|| "writing tree")?;
        }

        writeln!(out).output_context(|| "writing tree")?;
        Ok(())
    }

    /// Write a header and the raw bytes of every file not content-excluded.
    ///
    /// A file that cannot be read is reported on the diagnostic stream and
    /// the dump carries on with the next file.
    pub fn write_contents(&mut self, files: &[MatchedFile]) -> Result<ContentStats> {
        let mut stats = ContentStats::default();

        for file in sorted(files) {
            if file.content_excluded {
                stats.suppressed += 1;
                continue;
            }

            let heading = file.heading_path();
            writeln!(self.out, "===== {} =====", heading)
                .output_context(|| format!("writing header for {}", heading))?;

            match fs::read(&file.absolute) {
                Ok(bytes) => {
                    self.out
                        .write_all(&bytes)
                        .output_context(|| format!("writing {}", heading))?;
                    if bytes.last() != Some(&b'\n') {
                        self.out
                            .write_all(b"\n")
                            .output_context(|| format!("writing {}", heading))?;
                    }
                    stats.written += 1;
                }
                Err(e) => {
                    debug!(path = %file.absolute.display(), error = %e, "unreadable file");
                    writeln!(self.err, "[Error reading {}]: {}", heading, e)
                        .output_context(|| "writing diagnostics")?;
                    stats.unreadable += 1;
                }
            }

            writeln!(self.out).output_context(|| format!("writing {}", heading))?;
        }

        self.out.flush().output_context(|| "flushing output")?;
        Ok(stats)
    }

    /// Report that nothing survived the extension filter
    pub fn write_no_matches(&mut self) -> Result<()> {
        writeln!(self.err, "{}", NO_MATCHES_MESSAGE).output_context(|| "writing diagnostics")
    }
}

/// Files ordered by relative path with the locale-style comparator
fn sorted(files: &[MatchedFile]) -> Vec<&MatchedFile> {
    let mut ordered: Vec<&MatchedFile> = files.iter().collect();
    ordered.sort_by(|a, b| compare_relative(&a.relative, &b.relative));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn render_tree(relatives: &[&str]) -> String {
        let files: Vec<MatchedFile> = relatives
            .iter()
            .map(|r| MatchedFile::new(Path::new("/proj"), r))
            .collect();
        let mut writer = DumpWriter::new(Vec::new(), Vec::new());
        writer.write_tree(&files).unwrap();
        let (out, _) = writer.into_inner();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tree_lists_directories_once() {
        let tree = render_tree(&["src/b.ts", "README.md", "src/a.ts", "src/util/deep.ts"]);
        assert_eq!(
            tree,
            "### Tree (filtered):\n  README.md\n  src/\n    a.ts\n    b.ts\n    util/\n      deep.ts\n\n"
        );
    }

    #[test]
    fn test_tree_handles_sibling_prefixes() {
        let tree = render_tree(&["a/b/c.ts", "a/bb/d.ts", "a/b/e.ts"]);
        assert_eq!(
            tree,
            "### Tree (filtered):\n  a/\n    b/\n      c.ts\n      e.ts\n    bb/\n      d.ts\n\n"
        );
    }

    #[test]
    fn test_contents_force_single_trailing_newline() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("with.txt"), "line\n").unwrap();
        fs::write(dir.path().join("without.txt"), "line").unwrap();
        fs::write(dir.path().join("zero.txt"), "").unwrap();

        let files: Vec<MatchedFile> = ["zero.txt", "with.txt", "without.txt"]
            .iter()
            .map(|r| MatchedFile::new(dir.path(), r))
            .collect();

        let mut writer = DumpWriter::new(Vec::new(), Vec::new());
        let stats = writer.write_contents(&files).unwrap();
        let (out, err) = writer.into_inner();

        assert_eq!(stats.written, 3);
        assert!(err.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "===== /with.txt =====\nline\n\n\
             ===== /without.txt =====\nline\n\n\
             ===== /zero.txt =====\n\n\n"
        );
    }

    #[test]
    fn test_contents_skip_excluded_and_report_unreadable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ok.ts"), "ok\n").unwrap();
        fs::write(dir.path().join("hidden.ts"), "secret\n").unwrap();

        let mut hidden = MatchedFile::new(dir.path(), "hidden.ts");
        hidden.content_excluded = true;
        let files = vec![
            MatchedFile::new(dir.path(), "missing.ts"),
            hidden,
            MatchedFile::new(dir.path(), "ok.ts"),
        ];

        let mut writer = DumpWriter::new(Vec::new(), Vec::new());
        let stats = writer.write_contents(&files).unwrap();
        let (out, err) = writer.into_inner();
        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();

        assert_eq!(
            stats,
            ContentStats {
                written: 1,
                unreadable: 1,
                suppressed: 1
            }
        );
        assert!(!out.contains("hidden.ts"));
        assert!(!out.contains("secret"));
        assert!(out.contains("===== /missing.ts =====\n\n===== /ok.ts =====\nok\n\n"));
        assert!(err.starts_with("[Error reading /missing.ts]: "));
    }

    #[test]
    fn test_no_matches_message() {
        let mut writer = DumpWriter::new(Vec::new(), Vec::new());
        writer.write_no_matches().unwrap();
        let (out, err) = writer.into_inner();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), format!("{}\n", NO_MATCHES_MESSAGE));
    }
}
