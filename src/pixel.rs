// src/pixel.rs

//! Bit-packed per-pixel records.
//!
//! [`SourcePixel`] is the compact format of an encoded sprite and
//! [`AnimCell`] is one entry of the animation plane that shadows the screen.

use crate::color::Color16;
use crate::palette::PALETTE_ANIM_START;

#[cfg(test)]
mod tests;

const ALPHA_SHIFT: u32 = 16;
const BRIGHTNESS_SHIFT: u32 = 20;
const REMAP_SHIFT: u32 = 24;
const NIBBLE_MASK: u32 = 0xF;

/// Alpha value of a fully opaque source pixel.
pub const OPAQUE: u8 = 15;

/// One pixel of an encoded sprite, packed into 32 bits:
///
/// ```text
///  31      24 23  20 19  16 15               0
/// +----------+------+------+------------------+
/// |  remap   |  v   |  a   |  color (5-6-5)   |
/// +----------+------+------+------------------+
/// ```
///
/// A remap index of 0 means the embedded color is used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SourcePixel(u32);

impl SourcePixel {
    /// Packs the fields. `alpha` and `brightness` are truncated to 4 bits.
    #[inline]
    pub const fn new(color: Color16, alpha: u8, brightness: u8, remap: u8) -> Self {
        Self(
            color.raw() as u32
                | ((alpha as u32 & NIBBLE_MASK) << ALPHA_SHIFT)
                | ((brightness as u32 & NIBBLE_MASK) << BRIGHTNESS_SHIFT)
                | ((remap as u32) << REMAP_SHIFT),
        )
    }

    #[inline]
    pub const fn color(self) -> Color16 {
        Color16::from_raw(self.0 as u16)
    }

    /// Alpha in 0..=15; 15 is fully opaque.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> ALPHA_SHIFT) & NIBBLE_MASK) as u8
    }

    /// Brightness in 0..=15.
    #[inline]
    pub const fn brightness(self) -> u8 {
        ((self.0 >> BRIGHTNESS_SHIFT) & NIBBLE_MASK) as u8
    }

    /// Palette index this pixel is remapped through, or 0.
    #[inline]
    pub const fn remap(self) -> u8 {
        (self.0 >> REMAP_SHIFT) as u8
    }
}

const CELL_INDEX_MASK: u8 = 0x1F;
const CELL_BRIGHTNESS_SHIFT: u32 = 5;

/// One cell of the animation plane, packed into a byte.
///
/// The low 5 bits hold the animated color index (0 = not animated, `n` =
/// palette index `PALETTE_ANIM_START + n - 1`); the high 3 bits hold the
/// source brightness at half resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct AnimCell(u8);

impl AnimCell {
    pub const NONE: AnimCell = AnimCell(0);

    /// Packs a raw cell index (5 bits) and halved brightness (3 bits).
    #[inline]
    pub const fn new(index: u8, brightness: u8) -> Self {
        Self((index & CELL_INDEX_MASK) | ((brightness & 0x7) << CELL_BRIGHTNESS_SHIFT))
    }

    /// Cell for a pixel showing animated palette entry `palette_index` at the
    /// 4-bit `brightness`.
    ///
    /// `palette_index` must lie in the animation range.
    #[inline]
    pub fn animated(palette_index: u8, brightness: u8) -> Self {
        debug_assert!(palette_index >= PALETTE_ANIM_START);
        Self::new(palette_index - PALETTE_ANIM_START + 1, brightness >> 1)
    }

    /// Cell for a pixel filled with palette entry `palette_index`; cleared
    /// when the entry is not animated.
    #[inline]
    pub fn for_palette_index(palette_index: u8, brightness: u8) -> Self {
        if palette_index >= PALETTE_ANIM_START {
            Self::animated(palette_index, brightness)
        } else {
            Self::NONE
        }
    }

    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Raw 5-bit index; 0 means "not animated".
    #[inline]
    pub const fn index(self) -> u8 {
        self.0 & CELL_INDEX_MASK
    }

    /// Stored 3-bit brightness.
    #[inline]
    pub const fn brightness(self) -> u8 {
        self.0 >> CELL_BRIGHTNESS_SHIFT
    }

    #[inline]
    pub const fn is_animated(self) -> bool {
        self.index() != 0
    }

    /// Palette index this cell displays, if animated.
    #[inline]
    pub fn palette_index(self) -> Option<u8> {
        match self.index() {
            0 => None,
            n => Some(n + PALETTE_ANIM_START - 1),
        }
    }
}
