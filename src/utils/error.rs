//! Error types for the image-preparation pipeline.
//!
//! Provides a hierarchy of error types using `thiserror`, plus the mapping
//! from error variant to process exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Usage errors: bad or missing command-line arguments.
#[derive(Error, Debug)]
pub enum UsageError {
    /// No source image was given and no pre-optimized file supplied
    #[error("no source image given (pass a file path, or -O <optimized file>)")]
    MissingSource,
    /// Source path does not exist
    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),
    /// Source path exists but is not a regular file
    #[error("source is not a regular file: {0}")]
    NotAFile(PathBuf),
    /// Source has no stem to derive output names from
    #[error("cannot derive a base name from: {0}")]
    BareName(PathBuf),
    /// Source extension is not one of the supported image formats
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Main error type for the pipeline.
///
/// Every failure surfaces as one of these variants; `exit_code` decides the
/// process exit status at the `main` seam.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Argument validation failed
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// The JPEG compression tool is not on PATH
    #[error("compression tool `{tool}` not found on PATH ({hint})")]
    MissingCompressor { tool: &'static str, hint: &'static str },

    /// The image metadata/resize tool pair is not on PATH
    #[error("metadata/resize tools `{tool}` not found on PATH ({hint})")]
    MissingResizer { tool: &'static str, hint: &'static str },

    /// An external tool ran but failed; its stderr is passed through untranslated
    #[error("tool failure: {0}")]
    Tool(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for pipeline operations.
pub type PrepResult<T> = Result<T, PrepError>;

// Helper methods for error creation
impl PrepError {
    pub fn tool<T: Into<String>>(msg: T) -> Self {
        Self::Tool(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// 2 usage, 3 missing source, 4 missing compressor, 5 missing
    /// metadata/resize pair, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(UsageError::MissingSource) => 3,
            Self::Usage(_) => 2,
            Self::MissingCompressor { .. } => 4,
            Self::MissingResizer { .. } => 5,
            Self::Tool(_) | Self::Io(_) => 1,
        }
    }
}

// Convert std::io::Error to PrepError
impl From<io::Error> for PrepError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
