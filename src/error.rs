//! Global error handling for bctx
//!
//! Only fatal conditions are represented here. Degraded enumeration and
//! per-file read failures are handled where they occur and never surface
//! as a `BctxError`.

use std::io;
use thiserror::Error;

/// Global error type for bctx operations
#[derive(Error, Debug)]
pub enum BctxError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Ignore-file compilation errors
    #[error("Ignore rule error: {0}")]
    Ignore(#[from] ignore::Error),

    /// Root directory missing or not a directory
    #[error("Directory not found: {0}")]
    RootNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure writing to the primary or diagnostic stream
    #[error("Output error: {0}")]
    Output(String),
}

/// Specialized Result type for bctx operations
pub type Result<T> = std::result::Result<T, BctxError>;

/// Creates a BctxError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::BctxError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to I/O errors on the output streams
pub trait ResultExt<T> {
    /// Convert the error into an `Output` error prefixed with context
    fn output_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T> ResultExt<T> for std::result::Result<T, io::Error> {
    fn output_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| BctxError::Output(format!("{}: {}", f(), e)))
    }
}

// Allow `?` on bctx results inside functions returning io::Result
impl From<BctxError> for io::Error {
    fn from(err: BctxError) -> Self {
        match err {
            BctxError::Io(e) => e,
            other => io::Error::other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_root(exists: bool) -> Result<()> {
        crate::ensure!(exists, RootNotFound, "/missing/{}", "dir");
        Ok(())
    }

    #[test]
    fn test_ensure_macro_builds_variant() {
        assert!(check_root(true).is_ok());
        let err = check_root(false).unwrap_err();
        assert!(matches!(err, BctxError::RootNotFound(_)));
        assert_eq!(err.to_string(), "Directory not found: /missing/dir");
    }

    #[test]
    fn test_output_context() {
        let failed: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let err = failed.output_context(|| "writing tree").unwrap_err();
        assert_eq!(err.to_string(), "Output error: writing tree: pipe closed");
    }
}
