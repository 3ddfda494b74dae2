//! Sprite discovery, sheet layout, and the coordinate table.
//!
//! Sprites are placed row-major in sorted file-name order. The table written
//! next to the sheet relies on the tiling tool using the same order.

use anyhow::{Context, Result};
use letterpack_montage::{CellSize, GridSize};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::words::quote;

/// Finds every `*.<extension>` file directly inside `dir`, sorted by path.
pub fn discover_sprites(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Sprite directory not found: {}", dir.display());
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.{}", escaped, glob::Pattern::escape(extension));

    let mut sprites = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid sprite glob pattern")? {
        let path = entry.context("Failed to read sprite directory entry")?;
        if path.is_file() {
            sprites.push(path);
        }
    }
    sprites.sort();
    Ok(sprites)
}

/// Group name of a sprite: its file stem without trailing ASCII digits.
///
/// `A1.png` and `A2.png` both belong to group `A`.
pub fn group_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    stem.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Top-left pixel offset of a sprite in the sheet.
///
/// Offsets are `u64`: cell size and index are each `u32`-sized, their
/// product is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteLocation {
    pub x: u64,
    pub y: u64,
}

/// Fixed-cell grid a sheet is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub grid: GridSize,
    pub cell: CellSize,
}

impl SheetLayout {
    /// Layout for `count` sprites in `columns` columns.
    pub fn new(count: usize, columns: u32, cell: CellSize) -> Self {
        Self {
            grid: GridSize::for_count(count, columns),
            cell,
        }
    }

    /// Location of the sprite at `index`. Requires a non-zero column count.
    pub fn location(&self, index: usize) -> SpriteLocation {
        let cols = self.grid.cols as usize;
        SpriteLocation {
            x: u64::from(self.cell.width) * (index % cols) as u64,
            y: u64::from(self.cell.height) * (index / cols) as u64,
        }
    }
}

/// Group name to ordered sprite locations, groups in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTable {
    groups: Vec<(String, Vec<SpriteLocation>)>,
    index: HashMap<String, usize>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a location to `group`, creating the group on first use.
    pub fn push(&mut self, group: &str, location: SpriteLocation) {
        match self.index.get(group) {
            Some(&i) => self.groups[i].1.push(location),
            None => {
                self.index.insert(group.to_string(), self.groups.len());
                self.groups.push((group.to_string(), vec![location]));
            }
        }
    }

    /// Builds the table for sprites already in sheet order.
    pub fn build(sprites: &[PathBuf], layout: &SheetLayout) -> Self {
        let mut table = Self::new();
        for (idx, sprite) in sprites.iter().enumerate() {
            table.push(&group_name(sprite), layout.location(idx));
        }
        table
    }

    pub fn get(&self, group: &str) -> Option<&[SpriteLocation]> {
        self.index.get(group).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpriteLocation])> {
        self.groups.iter().map(|(g, l)| (g.as_str(), l.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders the table as an object literal assigned to `identifier`.
    ///
    /// ```text
    /// alphabets={
    /// "A": [{'x': 0, 'y': 0}, {'x': 215, 'y': 0}],
    /// }
    /// ```
    pub fn render_js(&self, identifier: &str) -> String {
        let mut out = format!("{}={{\n", identifier);
        for (group, locations) in self.iter() {
            let locs = locations
                .iter()
                .map(|l| format!("{{'x': {}, 'y': {}}}", l.x, l.y))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "{}: [{}],", quote(group), locs);
        }
        out.push_str("}\n");
        out
    }
}

impl Serialize for LocationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (group, locations) in &self.groups {
            map.serialize_entry(group, locations)?;
        }
        map.end()
    }
}
