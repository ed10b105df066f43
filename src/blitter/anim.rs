// src/blitter/anim.rs

//! The 16bpp blitter with palette animation.
//!
//! Alongside the screen it keeps an animation plane with one [`AnimCell`] per
//! screen pixel offset (same width, height and pitch as the screen). A cell is
//! non-zero exactly when its pixel currently shows an animated palette entry,
//! and then records which entry and at what brightness. A palette cycle only
//! has to walk the plane and repaint the marked pixels.
//!
//! While `screen_disable_anim` is set the draw target is some off-screen
//! surface: drawing falls back to plain 16bpp and the plane is left alone.

use log::{debug, trace};

use super::{base, compositor, Blitter, BlitterMode, BlitterParams, PaletteAnimation, PaletteId, Rect};
use crate::color::{adjust_brightness, Color16, DEFAULT_BRIGHTNESS};
use crate::palette::{ColorLookup, PaletteTable};
use crate::pixel::AnimCell;
use crate::sprite::ZoomLevel;
use crate::surface::{RenderContext, Surface};
use crate::video::VideoDriver;

#[derive(Debug, Default)]
pub struct Blitter16bppAnim {
    anim_buf: Vec<AnimCell>,
    anim_buf_width: usize,
    anim_buf_height: usize,
    anim_buf_pitch: usize,
    /// Palette as of the last `palette_animate`.
    palette: PaletteTable,
}

impl Blitter16bppAnim {
    /// Creates the blitter with an empty plane; call `post_resize` once the
    /// screen exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// The animation plane, indexed like the screen's pixels.
    pub fn anim_cells(&self) -> &[AnimCell] {
        &self.anim_buf
    }

    /// Cell of screen pixel `(x, y)`.
    pub fn anim_cell(&self, x: usize, y: usize) -> AnimCell {
        self.anim_buf[x + y * self.anim_buf_pitch]
    }

    fn check_plane(&self, screen: &Surface) {
        assert!(
            self.anim_buf_width == screen.width()
                && self.anim_buf_height == screen.height()
                && self.anim_buf_pitch == screen.pitch(),
            "animation plane is {}x{} (pitch {}) but the screen is {}x{} (pitch {}); post_resize was not called",
            self.anim_buf_width,
            self.anim_buf_height,
            self.anim_buf_pitch,
            screen.width(),
            screen.height(),
            screen.pitch()
        );
    }

    /// Color of an animated cell under the current palette.
    #[inline]
    fn cell_color(&self, cell: AnimCell) -> Option<Color16> {
        let index = cell.palette_index()?;
        Some(adjust_brightness(self.palette.lookup(index), cell.brightness() << 1))
    }
}

impl Blitter for Blitter16bppAnim {
    fn name(&self) -> &'static str {
        "16bpp-anim"
    }

    fn bytes_per_pixel(&self) -> usize {
        base::BYTES_PER_PIXEL + std::mem::size_of::<AnimCell>()
    }

    fn set_pixel(&mut self, ctx: &mut RenderContext, video: usize, x: usize, y: usize, color: u8) {
        if ctx.screen_disable_anim {
            let color = ctx.palette.lookup(color);
            base::set_pixel(&mut ctx.screen, video, x, y, color);
            return;
        }

        self.check_plane(&ctx.screen);
        base::set_pixel(&mut ctx.screen, video, x, y, self.palette.lookup(color));
        let offset = video + x + y * self.anim_buf_pitch;
        self.anim_buf[offset] = AnimCell::for_palette_index(color, DEFAULT_BRIGHTNESS);
    }

    fn draw_rect(&mut self, ctx: &mut RenderContext, video: usize, width: usize, height: usize, color: u8) {
        if ctx.screen_disable_anim {
            let color = ctx.palette.lookup(color);
            base::draw_rect(&mut ctx.screen, video, width, height, color);
            return;
        }

        self.check_plane(&ctx.screen);
        base::draw_rect(&mut ctx.screen, video, width, height, self.palette.lookup(color));

        let cell = AnimCell::for_palette_index(color, DEFAULT_BRIGHTNESS);
        for row in 0..height {
            let start = video + row * self.anim_buf_pitch;
            self.anim_buf[start..start + width].fill(cell);
        }
    }

    fn draw_color_mapping_rect(
        &mut self,
        ctx: &mut RenderContext,
        dst: usize,
        width: usize,
        height: usize,
        pal: PaletteId,
    ) {
        if ctx.screen_disable_anim {
            compositor::draw_color_mapping_rect(&mut ctx.screen, None, dst, width, height, pal);
            return;
        }

        self.check_plane(&ctx.screen);
        compositor::draw_color_mapping_rect(
            &mut ctx.screen,
            Some(self.anim_buf.as_mut_slice()),
            dst,
            width,
            height,
            pal,
        );
    }

    fn draw(&mut self, ctx: &mut RenderContext, bp: &BlitterParams<'_>, mode: BlitterMode, zoom: ZoomLevel) {
        if ctx.screen_disable_anim {
            let RenderContext { screen, palette, .. } = ctx;
            compositor::draw(screen.pixels_mut(), None, bp, mode, zoom, &*palette);
            return;
        }

        self.check_plane(&ctx.screen);
        assert_eq!(
            bp.pitch,
            self.anim_buf_pitch,
            "sprite target pitch differs from the screen's"
        );
        compositor::draw(
            ctx.screen.pixels_mut(),
            Some(self.anim_buf.as_mut_slice()),
            bp,
            mode,
            zoom,
            &self.palette,
        );
    }

    /// Restores pixels and cells, then repaints animated pixels with the
    /// current palette so a restore never shows stale animation colors.
    fn copy_from_buffer(&mut self, ctx: &mut RenderContext, video: usize, src: &[u8], width: usize, height: usize) {
        assert!(!ctx.screen_disable_anim, "cannot restore a buffer off-screen");
        self.check_plane(&ctx.screen);

        let row_pixels = width * base::BYTES_PER_PIXEL;
        let row_bytes = row_pixels + width;
        assert!(
            src.len() >= row_bytes * height,
            "buffer of {} bytes is too small for {}x{} pixels",
            src.len(),
            width,
            height
        );

        let pitch = self.anim_buf_pitch;
        for row in 0..height {
            let start = video + row * pitch;
            let bytes = &src[row * row_bytes..(row + 1) * row_bytes];
            let (pixel_bytes, cell_bytes) = bytes.split_at(row_pixels);

            base::read_row(&mut ctx.screen.pixels_mut()[start..start + width], pixel_bytes);
            let cells = &mut self.anim_buf[start..start + width];
            for (cell, raw) in cells.iter_mut().zip(cell_bytes) {
                *cell = AnimCell::from_raw(*raw);
            }

            let pixels = &mut ctx.screen.pixels_mut()[start..start + width];
            for (px, cell) in pixels.iter_mut().zip(&self.anim_buf[start..start + width]) {
                if let Some(color) = self.cell_color(*cell) {
                    *px = color;
                }
            }
        }
    }

    /// Saves each row as its pixels followed by its cells.
    fn copy_to_buffer(&self, ctx: &RenderContext, video: usize, dst: &mut [u8], width: usize, height: usize) {
        assert!(!ctx.screen_disable_anim, "cannot save a buffer off-screen");
        self.check_plane(&ctx.screen);

        let row_pixels = width * base::BYTES_PER_PIXEL;
        let row_bytes = row_pixels + width;
        let pitch = self.anim_buf_pitch;
        let pixels = ctx.screen.pixels();

        for row in 0..height {
            let start = video + row * pitch;
            let out = &mut dst[row * row_bytes..(row + 1) * row_bytes];
            let (pixel_bytes, cell_bytes) = out.split_at_mut(row_pixels);

            base::write_row(pixel_bytes, &pixels[start..start + width]);
            for (raw, cell) in cell_bytes.iter_mut().zip(&self.anim_buf[start..start + width]) {
                *raw = cell.raw();
            }
        }
    }

    fn scroll_buffer(&mut self, ctx: &mut RenderContext, video: usize, rect: &mut Rect, scroll_x: i32, scroll_y: i32) {
        assert!(!ctx.screen_disable_anim, "cannot scroll off-screen");
        self.check_plane(&ctx.screen);

        // Both planes share the same geometry, so the plane scrolls with a
        // copy of the rect and the screen reports the result.
        let mut plane_rect = *rect;
        base::scroll_plane(
            &mut self.anim_buf,
            self.anim_buf_pitch,
            video,
            &mut plane_rect,
            scroll_x,
            scroll_y,
        );

        let pitch = ctx.screen.pitch();
        base::scroll_plane(ctx.screen.pixels_mut(), pitch, video, rect, scroll_x, scroll_y);
        debug_assert_eq!(plane_rect, *rect);
    }

    /// Repaints every animated pixel from the current palette and marks the
    /// whole screen dirty.
    fn palette_animate(&mut self, ctx: &mut RenderContext, video: &mut dyn VideoDriver) {
        assert!(!ctx.screen_disable_anim, "palette animation needs the real screen");
        self.check_plane(&ctx.screen);

        self.palette.refresh(&ctx.palette);

        let pitch = self.anim_buf_pitch;
        let width = self.anim_buf_width;
        let pixels = ctx.screen.pixels_mut();
        let mut repainted = 0usize;
        for y in 0..self.anim_buf_height {
            let start = y * pitch;
            let cells = &self.anim_buf[start..start + width];
            for (px, cell) in pixels[start..start + width].iter_mut().zip(cells) {
                if let Some(color) = self.cell_color(*cell) {
                    *px = color;
                    repainted += 1;
                }
            }
        }
        trace!("Blitter16bppAnim: palette animation repainted {} pixels", repainted);

        video.make_dirty(0, 0, ctx.screen.width(), ctx.screen.height());
    }

    fn use_palette_animation(&self) -> PaletteAnimation {
        PaletteAnimation::Blitter
    }

    /// Reallocates the plane, all cells cleared, when the screen geometry
    /// changed.
    fn post_resize(&mut self, ctx: &RenderContext) {
        let screen = &ctx.screen;
        if screen.width() == self.anim_buf_width
            && screen.height() == self.anim_buf_height
            && screen.pitch() == self.anim_buf_pitch
        {
            return;
        }

        debug!(
            "Blitter16bppAnim: reallocating animation plane {}x{} -> {}x{} (pitch {})",
            self.anim_buf_width,
            self.anim_buf_height,
            screen.width(),
            screen.height(),
            screen.pitch()
        );
        self.anim_buf_width = screen.width();
        self.anim_buf_height = screen.height();
        self.anim_buf_pitch = screen.pitch();
        self.anim_buf = vec![AnimCell::NONE; self.anim_buf_pitch * self.anim_buf_height];
    }
}

#[cfg(test)]
mod tests;
