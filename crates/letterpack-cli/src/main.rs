//! letterpack CLI - build steps for word-list and spritesheet assets
//!
//! `letterpack clean` deduplicates the word list, `letterpack pack_sprites`
//! packs the sprite images into a sheet and coordinate table.

use clap::{Parser, Subcommand};
use letterpack_montage::{Montage, MontageConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use letterpack_cli::commands;
use letterpack_cli::config::{
    AssetConfig, DEFAULT_ASSETS_DIR, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_COLUMNS,
};

const USAGE: &str = "usage: letterpack <clean|pack_sprites|doctor>";

/// letterpack - word-list and spritesheet asset builder
#[derive(Parser)]
#[command(name = "letterpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Assets directory all inputs and outputs live in
    #[arg(long, global = true, default_value = DEFAULT_ASSETS_DIR)]
    assets: PathBuf,

    /// Output machine-readable JSON instead of colored text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove case duplicates from words.txt and write words.js
    Clean,

    /// Pack alphabets/*.png into spritesheet.webp and write alphabets.js
    #[command(name = "pack_sprites", alias = "pack-sprites")]
    PackSprites {
        /// Number of sheet columns
        #[arg(long, default_value_t = DEFAULT_COLUMNS, value_parser = clap::value_parser!(u32).range(1..))]
        columns: u32,

        /// Cell width in pixels
        #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
        cell_width: u32,

        /// Cell height in pixels
        #[arg(long, default_value_t = DEFAULT_CELL_HEIGHT)]
        cell_height: u32,

        /// Path to the montage executable (default: LETTERPACK_MONTAGE or PATH)
        #[arg(long)]
        montage: Option<PathBuf>,

        /// Kill montage after this many seconds (default: wait indefinitely)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Only write alphabets.js if the spritesheet was written
        #[arg(long)]
        require_sheet: bool,
    },

    /// Check the montage installation and asset layout
    Doctor {
        /// Path to the montage executable (default: LETTERPACK_MONTAGE or PATH)
        #[arg(long)]
        montage: Option<PathBuf>,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn montage_for(path: Option<PathBuf>, timeout_secs: Option<u64>) -> Montage {
    let mut config = MontageConfig::default();
    if let Some(path) = path {
        config = config.tool_path(path);
    }
    if let Some(secs) = timeout_secs {
        config = config.timeout_secs(secs);
    }
    Montage::with_config(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AssetConfig::new(&cli.assets);

    let result = match cli.command {
        None => {
            println!("{}", USAGE);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Clean) => commands::clean::run(&config, cli.json),
        Some(Commands::PackSprites {
            columns,
            cell_width,
            cell_height,
            montage,
            timeout_secs,
            require_sheet,
        }) => {
            let config = config.columns(columns).cell_size(cell_width, cell_height);
            let montage = montage_for(montage, timeout_secs);
            commands::pack_sprites::run(&config, &montage, require_sheet, cli.json)
        }
        Some(Commands::Doctor { montage }) => {
            commands::doctor::run(&config, &montage_for(montage, None))
        }
        Some(Commands::Unknown(args)) => {
            let mode = args.first().map(String::as_str).unwrap_or_default();
            println!("unknown mode: {}, exiting", mode);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
