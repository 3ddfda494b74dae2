//! CLI command implementations

pub mod clean;
pub mod doctor;
pub mod pack_sprites;
