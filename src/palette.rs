// src/palette.rs

//! The 256-entry global palette and the blitter-side lookup table derived
//! from it.

use crate::color::{Color16, Color32};

#[cfg(test)]
mod tests;

/// First palette index whose color cycles over time (water, lights, ...).
pub const PALETTE_ANIM_START: u8 = 227;
/// Number of cycling palette entries.
pub const PALETTE_ANIM_SIZE: u8 = 28;

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// The global 8-bit palette as the game owns it.
///
/// `first_dirty`/`count_dirty` describe which entries changed since the
/// video backend last consumed the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Color32; PALETTE_SIZE],
    pub first_dirty: usize,
    pub count_dirty: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Color32::default(); PALETTE_SIZE],
            first_dirty: 0,
            count_dirty: PALETTE_SIZE,
        }
    }
}

impl Palette {
    /// Builds a palette from its colors, marking every entry dirty.
    pub fn new(colors: [Color32; PALETTE_SIZE]) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    /// Rotates the animated range by `steps` entries and marks only that range
    /// dirty.
    pub fn cycle_animation(&mut self, steps: usize) {
        let start = usize::from(PALETTE_ANIM_START);
        let end = start + usize::from(PALETTE_ANIM_SIZE);
        self.colors[start..end].rotate_left(steps % usize::from(PALETTE_ANIM_SIZE));
        self.first_dirty = start;
        self.count_dirty = usize::from(PALETTE_ANIM_SIZE);
    }

    #[inline]
    pub fn color32(&self, index: u8) -> Color32 {
        self.colors[usize::from(index)]
    }
}

/// Resolves a palette index to an on-screen color.
pub trait ColorLookup {
    fn lookup(&self, index: u8) -> Color16;
}

/// The global palette converts on every lookup.
impl ColorLookup for Palette {
    #[inline]
    fn lookup(&self, index: u8) -> Color16 {
        Color16::from(self.color32(index))
    }
}

/// A palette already converted to the on-screen format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    entries: [Color16; PALETTE_SIZE],
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self {
            entries: [Color16::BLACK; PALETTE_SIZE],
        }
    }
}

impl PaletteTable {
    pub fn new(palette: &Palette) -> Self {
        let mut table = Self::default();
        table.refresh(palette);
        table
    }

    /// Reconverts all 256 entries.
    ///
    /// `palette.first_dirty` must be 0 (full update) or `PALETTE_ANIM_START`
    /// (only the animated entries changed); any other value means the caller
    /// mixed up its palette bookkeeping.
    pub fn refresh(&mut self, palette: &Palette) {
        assert!(
            palette.first_dirty == 0 || palette.first_dirty == usize::from(PALETTE_ANIM_START),
            "unexpected first dirty palette entry {}",
            palette.first_dirty
        );

        for (entry, color) in self.entries.iter_mut().zip(palette.colors.iter()) {
            *entry = Color16::from(*color);
        }
    }
}

impl ColorLookup for PaletteTable {
    #[inline]
    fn lookup(&self, index: u8) -> Color16 {
        self.entries[usize::from(index)]
    }
}
