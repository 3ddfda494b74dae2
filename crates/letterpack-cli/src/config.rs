//! Asset layout configuration.
//!
//! Every command takes an [`AssetConfig`] instead of reading fixed paths, so
//! the same code runs against the project's `assets/` directory or a
//! temporary directory in tests.

use letterpack_montage::CellSize;
use std::path::{Path, PathBuf};

/// Default assets directory, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Default sprite cell width in pixels.
pub const DEFAULT_CELL_WIDTH: u32 = 215;

/// Default sprite cell height in pixels.
pub const DEFAULT_CELL_HEIGHT: u32 = 265;

/// Default number of spritesheet columns.
pub const DEFAULT_COLUMNS: u32 = 8;

/// File names and sheet geometry, rooted at `assets_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Base directory all other paths are relative to.
    pub assets_dir: PathBuf,
    /// Whitespace-separated word list.
    pub words_input: String,
    /// Generated word-list fragment.
    pub words_output: String,
    /// Directory holding one image per sprite.
    pub sprites_dir: String,
    /// Extension (without dot) of sprite images.
    pub sprite_extension: String,
    /// Spritesheet written by the tiling tool.
    pub sheet_output: String,
    /// Generated coordinate table.
    pub table_output: String,
    /// Identifier the coordinate table is assigned to.
    pub table_identifier: String,
    /// Pixel size of each sheet cell.
    pub cell: CellSize,
    /// Number of sheet columns.
    pub columns: u32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            words_input: "words.txt".to_string(),
            words_output: "words.js".to_string(),
            sprites_dir: "alphabets".to_string(),
            sprite_extension: "png".to_string(),
            sheet_output: "spritesheet.webp".to_string(),
            table_output: "alphabets.js".to_string(),
            table_identifier: "alphabets".to_string(),
            cell: CellSize {
                width: DEFAULT_CELL_WIDTH,
                height: DEFAULT_CELL_HEIGHT,
            },
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl AssetConfig {
    /// Creates a config rooted at the given assets directory.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the sheet cell size.
    pub fn cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell = CellSize { width, height };
        self
    }

    /// Sets the number of sheet columns.
    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn words_input_path(&self) -> PathBuf {
        self.assets_dir.join(&self.words_input)
    }

    pub fn words_output_path(&self) -> PathBuf {
        self.assets_dir.join(&self.words_output)
    }

    pub fn sprites_dir_path(&self) -> PathBuf {
        self.assets_dir.join(&self.sprites_dir)
    }

    pub fn sheet_output_path(&self) -> PathBuf {
        self.assets_dir.join(&self.sheet_output)
    }

    pub fn table_output_path(&self) -> PathBuf {
        self.assets_dir.join(&self.table_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AssetConfig::default();
        assert_eq!(config.words_input_path(), Path::new("assets/words.txt"));
        assert_eq!(config.words_output_path(), Path::new("assets/words.js"));
        assert_eq!(config.sprites_dir_path(), Path::new("assets/alphabets"));
        assert_eq!(
            config.sheet_output_path(),
            Path::new("assets/spritesheet.webp")
        );
        assert_eq!(config.table_output_path(), Path::new("assets/alphabets.js"));
        assert_eq!(config.cell.to_string(), "215x265");
        assert_eq!(config.columns, 8);
    }

    #[test]
    fn test_builder() {
        let config = AssetConfig::new("/tmp/game").cell_size(32, 48).columns(4);
        assert_eq!(config.assets_dir(), Path::new("/tmp/game"));
        assert_eq!(config.cell, CellSize { width: 32, height: 48 });
        assert_eq!(config.columns, 4);
        assert_eq!(config.words_input, "words.txt");
    }
}
