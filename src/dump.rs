/*!
 * The dump pipeline: scan, then render tree and contents
 */

use std::io::Write;

use tracing::info;

use crate::config::Config;
use crate::enumerate::Strategy;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::writer::{ContentStats, DumpWriter};

/// What a dump produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    /// Strategy that produced the candidates
    pub strategy: Strategy,
    /// Paths enumerated before the extension gate
    pub candidates: usize,
    /// Files listed in the tree
    pub files_listed: usize,
    /// Content block counters
    pub contents: ContentStats,
}

/// Run a full dump, writing the tree and contents to `out` and
/// diagnostics to `err`.
///
/// When no file passes the extension filter a note goes to `err` and
/// nothing is written to `out`; this is not an error.
pub fn run<W: Write, E: Write>(config: &Config, out: W, err: E) -> Result<DumpSummary> {
    let scan = Scanner::new(config.clone()).scan()?;
    let mut writer = DumpWriter::new(out, err);

    if scan.files.is_empty() {
        writer.write_no_matches()?;
        return Ok(DumpSummary {
            strategy: scan.strategy,
            candidates: scan.candidates,
            files_listed: 0,
            contents: ContentStats::default(),
        });
    }

    writer.write_tree(&scan.files)?;
    let contents = writer.write_contents(&scan.files)?;

    info!(
        root = %scan.root.display(),
        strategy = %scan.strategy,
        candidates = scan.candidates,
        listed = scan.files.len(),
        written = contents.written,
        suppressed = contents.suppressed,
        unreadable = contents.unreadable,
        "dump complete"
    );

    Ok(DumpSummary {
        strategy: scan.strategy,
        candidates: scan.candidates,
        files_listed: scan.files.len(),
        contents,
    })
}
