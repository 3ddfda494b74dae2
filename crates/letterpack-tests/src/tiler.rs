//! A [`Tiler`] that records requests instead of running montage.

use letterpack_montage::{MontageError, MontageResult, TileRequest, Tiler};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// A recorded tiling request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub images: Vec<PathBuf>,
    pub tile: String,
    pub geometry: String,
    pub output: PathBuf,
}

/// Records every request; either writes a placeholder sheet or fails.
#[derive(Debug, Default)]
pub struct RecordingTiler {
    failure: Option<(i32, String)>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingTiler {
    /// A tiler that succeeds and writes a placeholder file at the output path.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// A tiler that exits with `exit_code` and the given stderr.
    pub fn failing(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            failure: Some((exit_code, stderr.into())),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl Tiler for RecordingTiler {
    fn tile(&self, request: &TileRequest<'_>) -> MontageResult<PathBuf> {
        self.calls.borrow_mut().push(RecordedCall {
            images: request.images.to_vec(),
            tile: request.grid.to_string(),
            geometry: request.cell.to_string(),
            output: request.output.to_path_buf(),
        });
        if let Some((code, stderr)) = &self.failure {
            return Err(MontageError::process_failed(*code, stderr.clone()));
        }
        fs::write(request.output, b"RIFF")?;
        Ok(request.output.to_path_buf())
    }
}
