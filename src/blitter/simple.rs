// src/blitter/simple.rs

//! The 16bpp blitter without palette animation.

use super::{compositor, Blitter, BlitterMode, BlitterParams, PaletteId};
use crate::sprite::ZoomLevel;
use crate::surface::RenderContext;

/// Draws straight onto the screen.
///
/// Animated palette entries are resolved through the global palette when a
/// sprite is drawn and stay frozen afterwards.
#[derive(Debug, Default)]
pub struct Blitter16bppSimple;

impl Blitter16bppSimple {
    pub fn new() -> Self {
        Self
    }
}

impl Blitter for Blitter16bppSimple {
    fn name(&self) -> &'static str {
        "16bpp-simple"
    }

    fn draw(&mut self, ctx: &mut RenderContext, bp: &BlitterParams<'_>, mode: BlitterMode, zoom: ZoomLevel) {
        let RenderContext { screen, palette, .. } = ctx;
        compositor::draw(screen.pixels_mut(), None, bp, mode, zoom, &*palette);
    }

    fn draw_color_mapping_rect(
        &mut self,
        ctx: &mut RenderContext,
        dst: usize,
        width: usize,
        height: usize,
        pal: PaletteId,
    ) {
        compositor::draw_color_mapping_rect(&mut ctx.screen, None, dst, width, height, pal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blitter::{PaletteAnimation, PALETTE_NEWSPAPER};
    use crate::color::{make_gray, Color16, Color32, DEFAULT_BRIGHTNESS};
    use crate::palette::{Palette, PALETTE_ANIM_START, PALETTE_SIZE};
    use crate::pixel::{SourcePixel, OPAQUE};
    use crate::surface::Surface;
    use crate::video::HeadlessVideoDriver;

    fn context() -> RenderContext {
        let mut colors = [Color32::default(); PALETTE_SIZE];
        colors[usize::from(PALETTE_ANIM_START)] = Color32::new(0, 0, 248);
        colors[10] = Color32::new(248, 0, 0);
        RenderContext::new(Surface::new(4, 4), Palette::new(colors))
    }

    #[test_log::test]
    fn identity() {
        let blitter = Blitter16bppSimple::new();
        assert_eq!(blitter.name(), "16bpp-simple");
        assert_eq!(blitter.screen_depth(), 16);
        assert_eq!(blitter.bytes_per_pixel(), 2);
        assert_eq!(blitter.buffer_size(3, 5), 30);
        assert_eq!(blitter.use_palette_animation(), PaletteAnimation::None);
    }

    #[test_log::test]
    fn animated_pixels_freeze_at_draw_time() {
        let mut ctx = context();
        let mut blitter = Blitter16bppSimple::new();
        let sprite = [SourcePixel::new(Color16::BLACK, OPAQUE, DEFAULT_BRIGHTNESS, PALETTE_ANIM_START)];
        let bp = BlitterParams {
            sprite: &sprite,
            sprite_width: 1,
            skip_left: 0,
            skip_top: 0,
            width: 1,
            height: 1,
            left: 2,
            top: 1,
            dst: 0,
            pitch: 4,
            remap: None,
        };
        blitter.draw(&mut ctx, &bp, BlitterMode::Normal, ZoomLevel::Normal);
        assert_eq!(ctx.screen.pixel(2, 1), Color16::new(0, 0, 31));

        ctx.palette.colors[usize::from(PALETTE_ANIM_START)] = Color32::new(248, 248, 248);
        let mut video = HeadlessVideoDriver::new();
        blitter.palette_animate(&mut ctx, &mut video);

        assert_eq!(ctx.screen.pixel(2, 1), Color16::new(0, 0, 31));
        assert_eq!(video.notifications(), 0);
    }

    #[test_log::test]
    fn rect_and_pixel_use_the_global_palette() {
        let mut ctx = context();
        let mut blitter = Blitter16bppSimple::new();

        blitter.draw_rect(&mut ctx, 0, 2, 2, 10);
        blitter.set_pixel(&mut ctx, 0, 3, 3, 10);

        assert_eq!(ctx.screen.pixel(1, 1), Color16::new(31, 0, 0));
        assert_eq!(ctx.screen.pixel(3, 3), Color16::new(31, 0, 0));
        assert_eq!(ctx.screen.pixel(2, 2), Color16::BLACK);
    }

    #[test_log::test]
    fn newspaper_grays_the_rect() {
        let mut ctx = context();
        let mut blitter = Blitter16bppSimple::new();
        blitter.draw_rect(&mut ctx, 0, 4, 4, 10);

        blitter.draw_color_mapping_rect(&mut ctx, 5, 2, 1, PALETTE_NEWSPAPER);

        let red = Color16::new(31, 0, 0);
        assert_eq!(ctx.screen.pixel(1, 1), make_gray(red));
        assert_eq!(ctx.screen.pixel(2, 1), make_gray(red));
        assert_eq!(ctx.screen.pixel(3, 1), red);
    }
}
