//! The tiling seam between sprite packing and the external image tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{MontageError, MontageResult};

/// Grid dimensions of a spritesheet, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    /// Smallest grid with `cols` columns that holds `count` cells.
    ///
    /// Zero columns or zero cells yield zero rows.
    pub fn for_count(count: usize, cols: u32) -> Self {
        let rows = if cols == 0 {
            0
        } else {
            count.div_ceil(cols as usize) as u32
        };
        Self { cols, rows }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// Formats as montage `-tile` geometry, e.g. `8x3`.
impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Pixel dimensions of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// Formats as montage `-geometry`, e.g. `215x265`.
impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A request to tile `images` row-major into a single sheet at `output`.
#[derive(Debug, Clone, Copy)]
pub struct TileRequest<'a> {
    pub images: &'a [PathBuf],
    pub grid: GridSize,
    pub cell: CellSize,
    pub output: &'a Path,
}

impl TileRequest<'_> {
    /// Checks that every image has a cell.
    pub fn check_fits(&self) -> MontageResult<()> {
        if self.images.len() > self.grid.capacity() {
            return Err(MontageError::GridTooSmall {
                cols: self.grid.cols,
                rows: self.grid.rows,
                count: self.images.len(),
            });
        }
        Ok(())
    }
}

/// Something that can compose images into a spritesheet.
///
/// Implementations must place `images` row-major in the order given; the
/// coordinate table written alongside the sheet depends on it.
pub trait Tiler {
    /// Builds the sheet and returns the path that was written.
    fn tile(&self, request: &TileRequest<'_>) -> MontageResult<PathBuf>;
}

impl<T: Tiler + ?Sized> Tiler for &T {
    fn tile(&self, request: &TileRequest<'_>) -> MontageResult<PathBuf> {
        (**self).tile(request)
    }
}
