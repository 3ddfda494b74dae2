//! letterpack End-to-End Test Infrastructure
//!
//! Integration tests for both asset build steps:
//!
//! - Clean: `words.txt` -> `words.js`
//! - Pack sprites: `alphabets/*.png` -> `spritesheet.webp` + `alphabets.js`
//! - CLI modes: usage, unknown modes, exit codes
//!
//! ## Running Tests
//!
//! ```bash
//! # Everything that does not need ImageMagick
//! cargo test -p letterpack-tests
//!
//! # Also run against a real montage install
//! LETTERPACK_RUN_MONTAGE_TESTS=1 cargo test -p letterpack-tests -- --ignored
//! ```

pub mod harness;
pub mod tiler;

pub use harness::{CliResult, TestHarness};
pub use tiler::RecordingTiler;
