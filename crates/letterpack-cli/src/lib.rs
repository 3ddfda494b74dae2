//! letterpack CLI library.
//!
//! Build steps for the word game's assets: word-list case deduplication and
//! sprite packing. The `letterpack` binary is a thin dispatcher over
//! [`commands`].

pub mod commands;
pub mod config;
pub mod sprites;
pub mod words;

pub use config::AssetConfig;
