// src/blitter/encoder.rs

//! Conversion of loader sprites into the packed [`SourcePixel`] format.

use crate::color::{adjust_brightness, downsample, DEFAULT_BRIGHTNESS};
use crate::palette::ColorLookup;
use crate::pixel::SourcePixel;
use crate::sprite::{CommonPixel, LoaderSprite, Sprite};

/// Encodes `sprite`, resolving remapped pixels through `palette`.
///
/// The result keeps the input's dimensions and anchor offsets.
pub fn encode<L: ColorLookup>(sprite: &LoaderSprite, palette: &L) -> Sprite {
    let expected = usize::from(sprite.width) * usize::from(sprite.height);
    assert_eq!(
        sprite.data.len(),
        expected,
        "{}x{} sprite carries {} pixels",
        sprite.width,
        sprite.height,
        sprite.data.len()
    );

    Sprite {
        width: sprite.width,
        height: sprite.height,
        x_offs: sprite.x_offs,
        y_offs: sprite.y_offs,
        data: sprite.data.iter().map(|px| encode_pixel(px, palette)).collect(),
    }
}

/// Plain pixels keep their own color. Remapped pixels store the palette
/// color scaled by the brightest channel of the loader color, so a remap
/// table later only needs the index and the brightness.
fn encode_pixel<L: ColorLookup>(px: &CommonPixel, palette: &L) -> SourcePixel {
    let alpha = px.a / 16;
    if px.m == 0 {
        return SourcePixel::new(downsample(px.r, px.g, px.b), alpha, 0, 0);
    }

    let brightness = match px.r.max(px.g).max(px.b) / 16 {
        0 => DEFAULT_BRIGHTNESS,
        v => v,
    };
    let color = adjust_brightness(palette.lookup(px.m), brightness);
    SourcePixel::new(color, alpha, brightness, px.m)
}
