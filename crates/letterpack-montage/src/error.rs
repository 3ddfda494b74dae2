//! Error types for the montage backend.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for tiling operations.
pub type MontageResult<T> = Result<T, MontageError>;

/// Errors that can occur while assembling a spritesheet.
#[derive(Debug, Error)]
pub enum MontageError {
    /// No montage executable could be located.
    #[error("montage executable not found. Install ImageMagick, or set LETTERPACK_MONTAGE to the montage binary")]
    ToolNotFound,

    /// An explicitly configured tool path does not exist.
    #[error("configured montage path does not exist: {path}")]
    ConfiguredToolMissing { path: PathBuf },

    /// Failed to spawn the tool process.
    #[error("failed to spawn montage process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The tool ran longer than the configured timeout.
    #[error("montage process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The tool exited with a non-zero status.
    #[error("montage exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// The grid cannot hold the requested images.
    #[error("a {cols}x{rows} grid cannot hold {count} images")]
    GridTooSmall { cols: u32, rows: u32, count: usize },

    /// IO error while waiting on the process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MontageError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            MontageError::ToolNotFound => "MONTAGE_001",
            MontageError::ConfiguredToolMissing { .. } => "MONTAGE_002",
            MontageError::SpawnFailed(_) => "MONTAGE_003",
            MontageError::Timeout { .. } => "MONTAGE_004",
            MontageError::ProcessFailed { .. } => "MONTAGE_005",
            MontageError::GridTooSmall { .. } => "MONTAGE_006",
            MontageError::Io(_) => "MONTAGE_007",
        }
    }

    /// Text the tool wrote to stderr, if the failure came from the tool itself.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            MontageError::ProcessFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
