//! Doctor command implementation
//!
//! Checks the tiling tool and the asset directory layout.

use anyhow::Result;
use colored::Colorize;
use letterpack_montage::{Montage, MontageError};
use std::process::ExitCode;

use crate::config::AssetConfig;
use crate::sprites::discover_sprites;

/// Run the doctor command
///
/// Checks:
/// - montage installation
/// - word list presence
/// - sprite directory contents
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(config: &AssetConfig, montage: &Montage) -> Result<ExitCode> {
    println!("{}", "letterpack doctor".cyan().bold());
    println!("{}", "=================".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} letterpack-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Dependencies:".bold());
    match montage.find_tool() {
        Ok(tool) => match montage.version() {
            Ok(version) => {
                println!("  {} {} ({})", "ok".green(), tool.display(), version);
            }
            Err(e) => {
                println!("  {} {} found but failed: {}", "!!".red(), tool.display(), e);
                all_ok = false;
            }
        },
        Err(MontageError::ToolNotFound) => {
            println!("  {} montage not found", "!!".yellow());
            println!(
                "     {}",
                "ImageMagick is required to write the spritesheet.".dimmed()
            );
            println!(
                "     {}",
                "Install from https://imagemagick.org/script/download.php".dimmed()
            );
            all_ok = false;
        }
        Err(e) => {
            println!("  {} {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Assets:".bold());
    let words = config.words_input_path();
    if words.is_file() {
        println!("  {} {}", "ok".green(), words.display());
    } else {
        println!("  {} {} (missing)", "!!".red(), words.display());
        all_ok = false;
    }

    let sprites_dir = config.sprites_dir_path();
    match discover_sprites(&sprites_dir, &config.sprite_extension) {
        Ok(sprites) if sprites.is_empty() => {
            println!(
                "  {} {} (no *.{} files)",
                "!!".yellow(),
                sprites_dir.display(),
                config.sprite_extension
            );
        }
        Ok(sprites) => {
            println!(
                "  {} {} ({} sprites)",
                "ok".green(),
                sprites_dir.display(),
                sprites.len()
            );
        }
        Err(e) => {
            println!("  {} {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}
