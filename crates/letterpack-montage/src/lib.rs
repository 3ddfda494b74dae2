//! letterpack montage backend
//!
//! Assembles a spritesheet from individual sprite images by running
//! ImageMagick's `montage` tool as a subprocess. The sprite packer talks to
//! this crate only through the [`Tiler`] trait, so it can be exercised
//! without ImageMagick installed.
//!
//! # Tool discovery
//!
//! [`Montage::find_tool`] searches, in order:
//!
//! 1. An explicit path in [`MontageConfig::tool_path`]
//! 2. The `LETTERPACK_MONTAGE` environment variable
//! 3. `montage` on the system PATH
//! 4. `magick` on the system PATH (run as `magick montage`)
//! 5. Common installation paths
//!
//! # Example
//!
//! ```ignore
//! use letterpack_montage::{CellSize, GridSize, Montage, TileRequest, Tiler};
//!
//! let request = TileRequest {
//!     images: &images,
//!     grid: GridSize::for_count(images.len(), 8),
//!     cell: CellSize { width: 215, height: 265 },
//!     output: Path::new("assets/spritesheet.webp"),
//! };
//! Montage::new().tile(&request)?;
//! ```

pub mod error;
pub mod orchestrator;
pub mod tiler;

pub use error::{MontageError, MontageResult};
pub use orchestrator::{build_args, Montage, MontageConfig, MontageTool, MONTAGE_PATH_ENV};
pub use tiler::{CellSize, GridSize, TileRequest, Tiler};
