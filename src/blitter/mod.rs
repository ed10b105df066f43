// src/blitter/mod.rs

//! 16bpp software blitters.
//!
//! A blitter draws encoded sprites, filled rectangles and saved screen
//! regions onto the current draw target of a [`RenderContext`]. Two
//! implementations exist:
//!
//! - [`Blitter16bppSimple`] draws straight onto the screen. Animated palette
//!   entries are resolved once, at draw time.
//! - [`Blitter16bppAnim`] shadows the screen with an animation plane that
//!   remembers which pixels show animated palette entries, so a palette
//!   cycle can repaint exactly those pixels.
//!
//! Blitters are created by name through [`factory::select_blitter`].

pub mod anim;
pub mod base;
pub mod compositor;
pub mod encoder;
pub mod factory;
pub mod simple;

pub use anim::Blitter16bppAnim;
pub use factory::{blitters_info, select_blitter, BlitterFactory};
pub use simple::Blitter16bppSimple;

use std::fmt;

use crate::palette::{ColorLookup, Palette};
use crate::pixel::SourcePixel;
use crate::sprite::{LoaderSprite, Sprite, ZoomLevel};
use crate::surface::RenderContext;
use crate::video::VideoDriver;

/// Maps palette indices to other palette indices (company colors, crash
/// smoke, ...). Index 0 in the output means "skip this pixel".
pub type RemapTable = [u8; 256];

/// How a sprite is combined with the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlitterMode {
    /// Draw the sprite as encoded.
    #[default]
    Normal,
    /// Recolor remapped pixels through [`BlitterParams::remap`].
    ColorRemap,
    /// Darken the screen under the sprite's shape.
    Transparent,
    /// Like `ColorRemap`, but plain pixels are drawn as dark gray.
    CrashRemap,
    /// Draw the sprite's shape in black.
    BlackRemap,
}

/// Who performs palette animation for the active blitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAnimation {
    /// Palette animation is not supported.
    None,
    /// The video backend handles it (8bpp hardware palettes).
    VideoBackend,
    /// The blitter repaints animated pixels itself.
    Blitter,
}

/// A palette recoloring understood by `draw_color_mapping_rect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteId(pub u32);

/// Darkens the area, used for transparent overlays.
pub const PALETTE_TO_TRANSPARENT: PaletteId = PaletteId(0x322);
/// Turns the area gray, like old newsprint.
pub const PALETTE_NEWSPAPER: PaletteId = PaletteId(0x323);

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A screen rectangle in pixels, relative to a `video` offset.
///
/// Used in/out by `scroll_buffer`, which shrinks it to the area that received
/// scrolled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Everything `draw` needs to know about one sprite placement.
///
/// The rectangle `(left, top, width, height)` is already clipped to the
/// target; `skip_left`/`skip_top` say how many destination pixels were
/// clipped away on those edges. `dst` is the offset of the target's origin
/// and `pitch` its row stride, both in pixels.
#[derive(Debug, Clone, Copy)]
pub struct BlitterParams<'a> {
    pub sprite: &'a [SourcePixel],
    pub sprite_width: usize,
    pub skip_left: usize,
    pub skip_top: usize,
    pub width: usize,
    pub height: usize,
    pub left: usize,
    pub top: usize,
    pub dst: usize,
    pub pitch: usize,
    pub remap: Option<&'a RemapTable>,
}

impl<'a> BlitterParams<'a> {
    /// Parameters drawing the whole of `sprite` at `(left, top)`.
    pub fn for_sprite(sprite: &'a Sprite, left: usize, top: usize, pitch: usize) -> Self {
        Self {
            sprite: &sprite.data,
            sprite_width: usize::from(sprite.width),
            skip_left: 0,
            skip_top: 0,
            width: usize::from(sprite.width),
            height: usize::from(sprite.height),
            left,
            top,
            dst: 0,
            pitch,
            remap: None,
        }
    }

    pub fn with_remap(mut self, remap: &'a RemapTable) -> Self {
        self.remap = Some(remap);
        self
    }

    /// The remap table, which the remapping modes cannot draw without.
    pub(crate) fn remap_table(&self, mode: BlitterMode) -> &'a RemapTable {
        match self.remap {
            Some(remap) => remap,
            None => panic!("{:?} needs a remap table", mode),
        }
    }
}

/// Errors raised while choosing a blitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlitterError {
    /// No registered blitter has this name.
    UnknownBlitter(String),
}

impl fmt::Display for BlitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlitterError::UnknownBlitter(name) => write!(f, "unknown blitter '{}'", name),
        }
    }
}

impl std::error::Error for BlitterError {}

/// The drawing interface shared by all 16bpp blitters.
///
/// `video` and `dst` arguments are pixel offsets into `ctx.screen`. All
/// rectangles must lie inside the target; violating that panics.
///
/// The provided methods draw straight onto the target using the global
/// palette; blitters with extra per-pixel state override them.
pub trait Blitter {
    fn name(&self) -> &'static str;

    /// Bits per screen pixel.
    fn screen_depth(&self) -> u8 {
        16
    }

    /// Bytes one pixel occupies in a buffer filled by `copy_to_buffer`.
    fn bytes_per_pixel(&self) -> usize {
        base::BYTES_PER_PIXEL
    }

    fn move_to(&self, ctx: &RenderContext, video: usize, x: i32, y: i32) -> usize {
        base::move_to(&ctx.screen, video, x, y)
    }

    /// Sets one pixel to palette entry `color`.
    fn set_pixel(&mut self, ctx: &mut RenderContext, video: usize, x: usize, y: usize, color: u8) {
        let color = ctx.palette.lookup(color);
        base::set_pixel(&mut ctx.screen, video, x, y, color);
    }

    /// Fills a rectangle with palette entry `color`.
    fn draw_rect(&mut self, ctx: &mut RenderContext, video: usize, width: usize, height: usize, color: u8) {
        let color = ctx.palette.lookup(color);
        base::draw_rect(&mut ctx.screen, video, width, height, color);
    }

    /// Recolors a rectangle in place. Unknown palettes are ignored.
    fn draw_color_mapping_rect(
        &mut self,
        ctx: &mut RenderContext,
        dst: usize,
        width: usize,
        height: usize,
        pal: PaletteId,
    );

    /// Draws a sprite.
    fn draw(&mut self, ctx: &mut RenderContext, bp: &BlitterParams<'_>, mode: BlitterMode, zoom: ZoomLevel);

    /// Restores a rectangle saved by `copy_to_buffer`.
    fn copy_from_buffer(&mut self, ctx: &mut RenderContext, video: usize, src: &[u8], width: usize, height: usize) {
        base::copy_from_buffer(&mut ctx.screen, video, src, width, height);
    }

    /// Saves a rectangle so it can be restored later. `dst` must hold
    /// `buffer_size(width, height)` bytes.
    fn copy_to_buffer(&self, ctx: &RenderContext, video: usize, dst: &mut [u8], width: usize, height: usize) {
        base::copy_to_buffer(&ctx.screen, video, dst, width, height);
    }

    /// Copies screen pixels only, as they would appear in a screenshot.
    fn copy_image_to_buffer(
        &self,
        ctx: &RenderContext,
        video: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        dst_pitch: usize,
    ) {
        base::copy_image_to_buffer(&ctx.screen, video, dst, width, height, dst_pitch);
    }

    /// Scrolls a rectangle; see [`base::scroll_plane`].
    fn scroll_buffer(&mut self, ctx: &mut RenderContext, video: usize, rect: &mut Rect, scroll_x: i32, scroll_y: i32) {
        let pitch = ctx.screen.pitch();
        base::scroll_plane(ctx.screen.pixels_mut(), pitch, video, rect, scroll_x, scroll_y);
    }

    /// Bytes needed to save a `width` x `height` rectangle.
    fn buffer_size(&self, width: usize, height: usize) -> usize {
        width * height * self.bytes_per_pixel()
    }

    /// Applies a palette change to the screen and reports the repainted area.
    fn palette_animate(&mut self, _ctx: &mut RenderContext, _video: &mut dyn VideoDriver) {}

    fn use_palette_animation(&self) -> PaletteAnimation {
        PaletteAnimation::None
    }

    /// Called after the screen was resized.
    fn post_resize(&mut self, _ctx: &RenderContext) {}

    /// Converts a loaded sprite to this blitter's format.
    fn encode(&self, sprite: &LoaderSprite, palette: &Palette) -> Sprite {
        encoder::encode(sprite, palette)
    }
}
