//! Pack-sprites command implementation
//!
//! Tiles the sprite images into one sheet through the montage backend and
//! writes the matching coordinate table.

use anyhow::{Context, Result};
use colored::Colorize;
use letterpack_montage::{MontageError, TileRequest, Tiler};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use crate::config::AssetConfig;
use crate::sprites::{discover_sprites, LocationTable, SheetLayout};

/// What happened to the spritesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetStatus {
    /// The tiling tool wrote the sheet.
    Written { path: String },
    /// The tiling tool failed.
    Failed {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stderr: Option<String>,
    },
    /// There was nothing to tile.
    Skipped,
}

impl SheetStatus {
    fn from_error(err: &MontageError) -> Self {
        SheetStatus::Failed {
            code: err.code().to_string(),
            message: err.to_string(),
            stderr: err.stderr().map(str::to_string),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, SheetStatus::Written { .. })
    }
}

/// Outcome of a pack run.
#[derive(Debug, Clone, Serialize)]
pub struct PackReport {
    /// Number of sprites found
    pub sprite_count: usize,
    /// Sheet grid and cell geometry
    pub layout: SheetLayout,
    /// Spritesheet result
    pub sheet: SheetStatus,
    /// Coordinate table path, if it was written
    pub table_path: Option<String>,
    /// Sprite locations by group
    pub groups: LocationTable,
}

/// Packs sprites into a sheet and writes the coordinate table.
///
/// A tiling failure does not stop the run: the table is still written unless
/// `require_sheet` is set.
pub fn pack_sprites(
    config: &AssetConfig,
    tiler: &dyn Tiler,
    require_sheet: bool,
) -> Result<PackReport> {
    anyhow::ensure!(config.columns > 0, "Column count must be at least 1");

    let sprites = discover_sprites(&config.sprites_dir_path(), &config.sprite_extension)?;
    let layout = SheetLayout::new(sprites.len(), config.columns, config.cell);
    let sheet_path = config.sheet_output_path();

    let sheet = if sprites.is_empty() {
        SheetStatus::Skipped
    } else {
        let request = TileRequest {
            images: &sprites,
            grid: layout.grid,
            cell: layout.cell,
            output: &sheet_path,
        };
        match request.check_fits().and_then(|()| tiler.tile(&request)) {
            Ok(path) => SheetStatus::Written {
                path: path.display().to_string(),
            },
            Err(e) => SheetStatus::from_error(&e),
        }
    };

    let groups = LocationTable::build(&sprites, &layout);

    let table_path = if require_sheet && !sheet.is_written() {
        None
    } else {
        let path = config.table_output_path();
        fs::write(&path, groups.render_js(&config.table_identifier))
            .with_context(|| format!("Failed to write sprite table: {}", path.display()))?;
        Some(path.display().to_string())
    };

    Ok(PackReport {
        sprite_count: sprites.len(),
        layout,
        sheet,
        table_path,
        groups,
    })
}

/// Run the pack-sprites command
pub fn run(
    config: &AssetConfig,
    tiler: &dyn Tiler,
    require_sheet: bool,
    json: bool,
) -> Result<ExitCode> {
    let report = pack_sprites(config, tiler, require_sheet)?;
    let exit = if report.table_path.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(exit);
    }

    println!(
        "{} {} sprites on a {} grid of {} cells",
        "Packing".cyan().bold(),
        report.sprite_count,
        report.layout.grid,
        report.layout.cell
    );

    match &report.sheet {
        SheetStatus::Written { path } => {
            println!("{} spritesheet written to {}", "ok".green(), path.as_str().bold());
        }
        SheetStatus::Failed {
            message, stderr, ..
        } => {
            println!(
                "{} {}",
                "error:".red().bold(),
                stderr.as_deref().unwrap_or(message)
            );
        }
        SheetStatus::Skipped => {
            println!("{} no sprites found, spritesheet not written", "!!".yellow());
        }
    }

    match &report.table_path {
        Some(path) => {
            println!(
                "{} sprite locations written to {}",
                "ok".green(),
                path.as_str().bold()
            );
            if matches!(report.sheet, SheetStatus::Failed { .. }) {
                println!(
                    "{} sprite locations describe a spritesheet that was not written",
                    "WARNING".yellow().bold()
                );
            }
        }
        None => {
            println!(
                "{} sprite locations not written (--require-sheet)",
                "!!".yellow()
            );
        }
    }

    Ok(exit)
}
