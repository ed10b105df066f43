// src/sprite.rs

//! Sprite containers: the decoded form handed over by the sprite loader and
//! the encoded form the blitters draw from.

use crate::pixel::SourcePixel;

/// One decoded sprite pixel, as delivered by the sprite loader.
///
/// `m` is the palette index the pixel is remapped through (0 for plain RGB
/// pixels) and `v` the brightness the loader recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommonPixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub m: u8,
    pub v: u8,
}

/// A decoded sprite in full precision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoaderSprite {
    pub width: u16,
    pub height: u16,
    pub x_offs: i16,
    pub y_offs: i16,
    /// Row-major, `width * height` pixels.
    pub data: Vec<CommonPixel>,
}

/// A sprite in the blitter's compact format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    pub x_offs: i16,
    pub y_offs: i16,
    pub data: Vec<SourcePixel>,
}

impl Sprite {
    /// Bytes occupied by the sprite: header plus packed pixels.
    pub fn byte_size(&self) -> usize {
        std::mem::size_of::<u16>() * 2
            + std::mem::size_of::<i16>() * 2
            + self.data.len() * std::mem::size_of::<SourcePixel>()
    }
}

/// Sampling ratio between sprite pixels and screen pixels.
///
/// Each level halves the resolution: at `Out4x` every 4th source column of
/// every 4th source row is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ZoomLevel {
    #[default]
    Normal = 0,
    Out2x = 1,
    Out4x = 2,
    Out8x = 3,
}

impl ZoomLevel {
    /// Source pixels advanced per destination pixel, on both axes.
    #[inline]
    pub fn scale(self) -> usize {
        1 << self as u8
    }
}
