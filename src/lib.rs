/*!
 * bctx - Dump a filtered directory tree and file contents for LLM context
 *
 * Files are enumerated with git, ripgrep or a directory walk, gated by the
 * requested extensions, and classified against `.gitignore`, `.bctxignore`
 * and exclude globs. Classified files stay in the tree but their contents
 * are withheld.
 */

pub mod config;
pub mod dump;
pub mod enumerate;
pub mod error;
pub mod filters;
pub mod ignore_rules;
pub mod logging;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Cli, Command, Config, DumpArgs};
pub use dump::{run, DumpSummary};
pub use enumerate::{collect_candidates, Strategy};
pub use error::{BctxError, Result};
pub use filters::{compile_patterns, is_excluded, ExcludePattern, ExtensionSet};
pub use ignore_rules::IgnoreFilter;
pub use scanner::{ScanResult, Scanner};
pub use types::MatchedFile;
pub use writer::DumpWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
