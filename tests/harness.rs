//! Test harness for bctx CLI tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::Command as BinCommand;
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Initialize a git repository, returning false when git is unavailable
    pub fn init_git(&self) -> bool {
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(self.dir.path())
            .status();
        matches!(status, Ok(status) if status.success())
    }

    /// `bctx` with no arguments
    pub fn bare(&self) -> BinCommand {
        let mut cmd = BinCommand::cargo_bin("bctx").expect("bctx binary should be built");
        cmd.current_dir(self.path());
        cmd
    }

    /// `bctx dump` rooted at this workspace
    pub fn dump(&self) -> BinCommand {
        let mut cmd = BinCommand::cargo_bin("bctx").expect("bctx binary should be built");
        cmd.arg("dump").arg("-C").arg(self.path());
        cmd
    }
}

/// Whether ripgrep is on PATH
pub fn rg_available() -> bool {
    let status = Command::new("rg").arg("--version").output();
    matches!(status, Ok(output) if output.status.success())
}
