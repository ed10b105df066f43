// src/blitter/compositor.rs

//! Per-pixel sprite compositing shared by both 16bpp blitters.
//!
//! Each [`BlitterMode`] is a [`Kernel`] that turns one source pixel and the
//! screen pixel under it into an [`Outcome`]. The mode is matched once per
//! draw call and the pixel loop is monomorphized per kernel, so the inner
//! loop carries no mode branches. Whether an animation plane is written is
//! also decided once per call.

use log::debug;

use super::{BlitterMode, BlitterParams, PaletteId, RemapTable, PALETTE_NEWSPAPER, PALETTE_TO_TRANSPARENT};
use crate::color::{
    adjust_brightness, compose_pa, compose_pa_no_check, downsample, make_dark, make_gray, make_transparent,
    Color16,
};
use crate::palette::{ColorLookup, PALETTE_ANIM_START};
use crate::pixel::{AnimCell, SourcePixel, OPAQUE};
use crate::sprite::ZoomLevel;
use crate::surface::Surface;

/// Screen darkening applied under `Transparent` sprites, out of 256.
const SPRITE_SHADOW: u32 = 192;
/// Screen darkening applied by `PALETTE_TO_TRANSPARENT` rectangles, out of 256.
const RECT_SHADOW: u32 = 154;

/// What happens to one destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Neither the pixel nor its animation cell changes.
    Untouched,
    /// The pixel gets a color that never animates; its cell is cleared.
    Plain(Color16),
    /// The pixel shows an animated palette entry recorded in the cell.
    Animated(Color16, AnimCell),
}

/// Per-mode compositing rule.
pub trait Kernel {
    fn composite<L: ColorLookup>(&self, src: SourcePixel, current: Color16, lookup: &L) -> Outcome;
}

pub struct Normal;

pub struct ColorRemap<'a>(pub &'a RemapTable);

pub struct CrashRemap<'a>(pub &'a RemapTable);

pub struct Transparent;

pub struct BlackRemap;

impl Kernel for Normal {
    #[inline(always)]
    fn composite<L: ColorLookup>(&self, src: SourcePixel, current: Color16, lookup: &L) -> Outcome {
        let alpha = src.alpha();
        if alpha == 0 {
            return Outcome::Untouched;
        }

        let m = src.remap();
        if m < PALETTE_ANIM_START {
            return Outcome::Plain(compose_pa(src.color(), alpha, current));
        }

        let color = adjust_brightness(lookup.lookup(m), src.brightness());
        if alpha == OPAQUE {
            Outcome::Animated(color, AnimCell::animated(m, src.brightness()))
        } else {
            Outcome::Plain(compose_pa_no_check(color, alpha, current))
        }
    }
}

/// Draws a remapped pixel through `remap`. A remap result of 0 skips it.
#[inline(always)]
fn remapped<L: ColorLookup>(remap: &RemapTable, src: SourcePixel, current: Color16, lookup: &L) -> Outcome {
    let index = remap[usize::from(src.remap())];
    if index == 0 {
        return Outcome::Untouched;
    }

    let alpha = src.alpha();
    let color = compose_pa(adjust_brightness(lookup.lookup(index), src.brightness()), alpha, current);
    if alpha == OPAQUE && index >= PALETTE_ANIM_START {
        Outcome::Animated(color, AnimCell::animated(index, src.brightness()))
    } else {
        Outcome::Plain(color)
    }
}

impl Kernel for ColorRemap<'_> {
    #[inline(always)]
    fn composite<L: ColorLookup>(&self, src: SourcePixel, current: Color16, lookup: &L) -> Outcome {
        let alpha = src.alpha();
        if alpha == 0 {
            return Outcome::Untouched;
        }
        if src.remap() == 0 {
            return Outcome::Plain(compose_pa(src.color(), alpha, current));
        }
        remapped(self.0, src, current, lookup)
    }
}

impl Kernel for CrashRemap<'_> {
    #[inline(always)]
    fn composite<L: ColorLookup>(&self, src: SourcePixel, current: Color16, lookup: &L) -> Outcome {
        let alpha = src.alpha();
        if alpha == 0 {
            return Outcome::Untouched;
        }
        if src.remap() == 0 {
            let g = make_dark(src.color());
            return Outcome::Plain(compose_pa(downsample(g, g, g), alpha, current));
        }
        remapped(self.0, src, current, lookup)
    }
}

impl Kernel for Transparent {
    #[inline(always)]
    fn composite<L: ColorLookup>(&self, src: SourcePixel, current: Color16, _lookup: &L) -> Outcome {
        // Outside the shape the pixel is unchanged, so its cell must stay set.
        if src.alpha() == 0 {
            return Outcome::Untouched;
        }
        Outcome::Plain(make_transparent(current, SPRITE_SHADOW, 256))
    }
}

impl Kernel for BlackRemap {
    #[inline(always)]
    fn composite<L: ColorLookup>(&self, src: SourcePixel, _current: Color16, _lookup: &L) -> Outcome {
        if src.alpha() == 0 {
            return Outcome::Untouched;
        }
        Outcome::Plain(Color16::BLACK)
    }
}

/// Draws `bp` in `mode` onto `pixels`, keeping `cells` in step when given.
///
/// `cells` must be laid out like `pixels`: one cell per pixel offset.
pub fn draw<L: ColorLookup>(
    pixels: &mut [Color16],
    cells: Option<&mut [AnimCell]>,
    bp: &BlitterParams<'_>,
    mode: BlitterMode,
    zoom: ZoomLevel,
    lookup: &L,
) {
    match mode {
        BlitterMode::Normal => draw_with(pixels, cells, bp, zoom, &Normal, lookup),
        BlitterMode::ColorRemap => {
            let kernel = ColorRemap(bp.remap_table(mode));
            draw_with(pixels, cells, bp, zoom, &kernel, lookup)
        }
        BlitterMode::CrashRemap => {
            let kernel = CrashRemap(bp.remap_table(mode));
            draw_with(pixels, cells, bp, zoom, &kernel, lookup)
        }
        BlitterMode::Transparent => draw_with(pixels, cells, bp, zoom, &Transparent, lookup),
        BlitterMode::BlackRemap => draw_with(pixels, cells, bp, zoom, &BlackRemap, lookup),
    }
}

fn draw_with<K: Kernel, L: ColorLookup>(
    pixels: &mut [Color16],
    cells: Option<&mut [AnimCell]>,
    bp: &BlitterParams<'_>,
    zoom: ZoomLevel,
    kernel: &K,
    lookup: &L,
) {
    match cells {
        None => for_each_pixel(bp, zoom, |src, i| match kernel.composite(src, pixels[i], lookup) {
            Outcome::Untouched => {}
            Outcome::Plain(color) | Outcome::Animated(color, _) => pixels[i] = color,
        }),
        Some(cells) => for_each_pixel(bp, zoom, |src, i| match kernel.composite(src, pixels[i], lookup) {
            Outcome::Untouched => {}
            Outcome::Plain(color) => {
                pixels[i] = color;
                cells[i] = AnimCell::NONE;
            }
            Outcome::Animated(color, cell) => {
                pixels[i] = color;
                cells[i] = cell;
            }
        }),
    }
}

/// Visits the clipped rectangle of `bp`, passing each sampled source pixel
/// and the destination offset it lands on.
///
/// The sprite is sampled every `zoom.scale()` pixels on both axes; the skip
/// values are in destination pixels.
#[inline(always)]
fn for_each_pixel(bp: &BlitterParams<'_>, zoom: ZoomLevel, mut f: impl FnMut(SourcePixel, usize)) {
    let scale = zoom.scale();
    let mut src_line = (bp.skip_top * bp.sprite_width + bp.skip_left) * scale;
    let mut dst_line = bp.dst + bp.top * bp.pitch + bp.left;

    for _ in 0..bp.height {
        let mut src = src_line;
        for x in 0..bp.width {
            f(bp.sprite[src], dst_line + x);
            src += scale;
        }
        src_line += bp.sprite_width * scale;
        dst_line += bp.pitch;
    }
}

/// Recolors the rectangle at `dst` according to `pal`, clearing the matching
/// animation cells when given. Unknown palettes leave everything as is.
pub fn draw_color_mapping_rect(
    surface: &mut Surface,
    cells: Option<&mut [AnimCell]>,
    dst: usize,
    width: usize,
    height: usize,
    pal: PaletteId,
) {
    let map: fn(Color16) -> Color16 = match pal {
        PALETTE_TO_TRANSPARENT => |c| make_transparent(c, RECT_SHADOW, 256),
        PALETTE_NEWSPAPER => make_gray,
        _ => {
            debug!("16bpp blitter doesn't know how to draw this color table ({})", pal);
            return;
        }
    };

    let pitch = surface.pitch();
    let pixels = surface.pixels_mut();
    for row in 0..height {
        let start = dst + row * pitch;
        for px in &mut pixels[start..start + width] {
            *px = map(*px);
        }
    }

    if let Some(cells) = cells {
        for row in 0..height {
            let start = dst + row * pitch;
            cells[start..start + width].fill(AnimCell::NONE);
        }
    }
}
