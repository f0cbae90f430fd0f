/*!
 * Configuration handling for bctx
 */

use std::path::{self, PathBuf};

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use once_cell::sync::Lazy;

use crate::enumerate::Strategy;
use crate::error::Result;

/// Exclude patterns applied when no `--exclude` is given.
///
/// Matching files stay in the tree; only their contents are withheld.
pub static DEFAULT_EXCLUDE_PATTERNS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Lock files
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "bun.lockb",
        "Cargo.lock",
        "composer.lock",
        "poetry.lock",
        // Generated assets
        "*.min.js",
        "*.min.css",
        "*.map",
        "*.tsbuildinfo",
    ]
});

/// Owned copy of the default exclude patterns
pub fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Command-line interface for bctx
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bctx",
    version = env!("CARGO_PKG_VERSION"),
    about = "Context utilities for feeding projects to LLMs",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Dump a filtered directory tree and matching file contents, honouring .gitignore rules
    Dump(DumpArgs),
}

/// Arguments for `bctx dump`
#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// Extensions to include (space or | separated, leading dot optional)
    pub extensions: Vec<String>,

    /// Root directory to scan
    #[arg(short = 'C', long = "cwd", default_value = ".")]
    pub cwd: PathBuf,

    /// Glob pattern whose matches keep their tree entry but not their contents
    /// (repeatable, comma-separated; replaces the defaults)
    #[arg(
        short = 'x',
        long = "exclude",
        value_delimiter = ',',
        default_values_t = default_exclude_patterns()
    )]
    pub exclude: Vec<String>,

    /// Do not read .gitignore or .bctxignore
    #[arg(long)]
    pub no_ignore_files: bool,

    /// Enumeration strategies to try, in order (the walk always runs last)
    #[arg(long = "strategy", value_enum)]
    pub strategies: Vec<Strategy>,
}

/// Dump configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub root: PathBuf,

    /// Raw extension tokens
    pub extensions: Vec<String>,

    /// Raw exclude patterns
    pub exclude_patterns: Vec<String>,

    /// Whether to read .gitignore and .bctxignore
    pub respect_ignore_files: bool,

    /// Enumeration strategies in priority order
    pub strategies: Vec<Strategy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
            respect_ignore_files: true,
            strategies: Strategy::chain(),
        }
    }
}

impl Config {
    /// Create configuration from `dump` arguments
    pub fn from_args(args: DumpArgs) -> Self {
        let exclude_patterns = args
            .exclude
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        let strategies = if args.strategies.is_empty() {
            Strategy::chain()
        } else {
            args.strategies
        };

        Self {
            root: args.cwd,
            extensions: args.extensions,
            exclude_patterns,
            respect_ignore_files: !args.no_ignore_files,
            strategies,
        }
    }

    /// Configuration for `root` with defaults everywhere else
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve the root to an absolute path and verify it is a directory
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let absolute = path::absolute(&self.root)?;
        crate::ensure!(
            absolute.is_dir(),
            RootNotFound,
            "{}",
            absolute.display()
        );
        Ok(absolute)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.resolve_root()?;
        for pattern in &self.exclude_patterns {
            crate::ensure!(
                !pattern.contains('\0'),
                Config,
                "exclude pattern contains a NUL byte: {:?}",
                pattern
            );
        }
        Ok(())
    }
}
