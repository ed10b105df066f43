// src/blitter/anim/tests.rs

use super::*;
use crate::blitter::PALETTE_TO_TRANSPARENT;
use crate::color::Color32;
use crate::palette::{Palette, PALETTE_ANIM_START, PALETTE_SIZE};
use crate::pixel::{SourcePixel, OPAQUE};
use crate::video::{DirtyRect, HeadlessVideoDriver};

const WATER: u8 = PALETTE_ANIM_START + 2;
const GRASS: u8 = 40;

fn palette() -> Palette {
    let mut colors = [Color32::default(); PALETTE_SIZE];
    colors[usize::from(GRASS)] = Color32::new(0, 160, 0);
    for i in 0..usize::from(crate::palette::PALETTE_ANIM_SIZE) {
        let v = (i * 8) as u8;
        colors[usize::from(PALETTE_ANIM_START) + i] = Color32::new(v, v, 248);
    }
    Palette::new(colors)
}

/// A ready-to-draw anim blitter on a `width` x `height` screen.
fn setup(width: usize, height: usize) -> (Blitter16bppAnim, RenderContext) {
    let mut ctx = RenderContext::new(Surface::new(width, height), palette());
    let mut blitter = Blitter16bppAnim::new();
    blitter.post_resize(&ctx);
    blitter.palette_animate(&mut ctx, &mut HeadlessVideoDriver::new());
    (blitter, ctx)
}

fn single(px: SourcePixel) -> [SourcePixel; 1] {
    [px]
}

fn params(sprite: &[SourcePixel], left: usize, top: usize, pitch: usize) -> BlitterParams<'_> {
    BlitterParams {
        sprite,
        sprite_width: 1,
        skip_left: 0,
        skip_top: 0,
        width: 1,
        height: 1,
        left,
        top,
        dst: 0,
        pitch,
        remap: None,
    }
}

fn assert_plane_consistent(blitter: &Blitter16bppAnim, ctx: &RenderContext) {
    for y in 0..ctx.screen.height() {
        for x in 0..ctx.screen.width() {
            let cell = blitter.anim_cell(x, y);
            if let Some(index) = cell.palette_index() {
                let expected = adjust_brightness(blitter.palette.lookup(index), cell.brightness() << 1);
                assert_eq!(ctx.screen.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }
}

#[test_log::test]
fn identity() {
    let blitter = Blitter16bppAnim::new();
    assert_eq!(blitter.name(), "16bpp-anim");
    assert_eq!(blitter.bytes_per_pixel(), 3);
    assert_eq!(blitter.buffer_size(4, 2), 24);
    assert_eq!(blitter.use_palette_animation(), PaletteAnimation::Blitter);
}

#[test_log::test]
fn opaque_animated_pixel_is_recorded() {
    let (mut blitter, mut ctx) = setup(1, 1);
    let sprite = single(SourcePixel::new(Color16::BLACK, OPAQUE, 8, PALETTE_ANIM_START + 5));

    blitter.draw(&mut ctx, &params(&sprite, 0, 0, 1), BlitterMode::Normal, ZoomLevel::Normal);

    assert_eq!(blitter.anim_cell(0, 0), AnimCell::new(6, 4));
    assert_eq!(ctx.screen.pixel(0, 0), ctx.palette.lookup(PALETTE_ANIM_START + 5));
}

#[test_log::test]
fn plain_draw_clears_the_cell_but_transparent_pixels_do_not() {
    let (mut blitter, mut ctx) = setup(2, 1);
    blitter.draw_rect(&mut ctx, 0, 2, 1, WATER);
    assert!(blitter.anim_cells().iter().all(|c| c.is_animated()));

    let plain = single(SourcePixel::new(Color16::new(1, 2, 3), OPAQUE, 8, 0));
    blitter.draw(&mut ctx, &params(&plain, 0, 0, 2), BlitterMode::Normal, ZoomLevel::Normal);
    let hidden = single(SourcePixel::new(Color16::new(1, 2, 3), 0, 8, 0));
    blitter.draw(&mut ctx, &params(&hidden, 1, 0, 2), BlitterMode::Normal, ZoomLevel::Normal);

    assert_eq!(blitter.anim_cell(0, 0), AnimCell::NONE);
    assert!(blitter.anim_cell(1, 0).is_animated());
    assert_plane_consistent(&blitter, &ctx);
}

#[test_log::test]
fn transparent_mode_clears_cells_under_the_shape() {
    let (mut blitter, mut ctx) = setup(1, 1);
    blitter.set_pixel(&mut ctx, 0, 0, 0, WATER);
    assert!(blitter.anim_cell(0, 0).is_animated());

    let shadow = single(SourcePixel::new(Color16::BLACK, 4, 8, 0));
    blitter.draw(&mut ctx, &params(&shadow, 0, 0, 1), BlitterMode::Transparent, ZoomLevel::Normal);

    assert_eq!(blitter.anim_cell(0, 0), AnimCell::NONE);
}

#[test_log::test]
fn transparent_mode_keeps_cells_outside_the_shape() {
    let (mut blitter, mut ctx) = setup(1, 1);
    blitter.set_pixel(&mut ctx, 0, 0, 0, WATER);
    let before = ctx.screen.pixel(0, 0);

    let outside = single(SourcePixel::new(Color16::BLACK, 0, 8, 0));
    blitter.draw(&mut ctx, &params(&outside, 0, 0, 1), BlitterMode::Transparent, ZoomLevel::Normal);

    assert!(blitter.anim_cell(0, 0).is_animated());
    assert_eq!(ctx.screen.pixel(0, 0), before);
    assert_plane_consistent(&blitter, &ctx);
}

#[test_log::test]
fn fill_with_plain_index_clears_cells() {
    let (mut blitter, mut ctx) = setup(8, 8);
    blitter.draw_rect(&mut ctx, 0, 8, 8, WATER);
    let inner = ctx.screen.offset(2, 2);
    blitter.draw_rect(&mut ctx, inner, 4, 4, 0);

    assert_eq!(blitter.anim_cell(2, 2), AnimCell::NONE);
    assert_eq!(blitter.anim_cell(5, 5), AnimCell::NONE);
    assert!(blitter.anim_cell(1, 1).is_animated());
    assert!(blitter.anim_cell(6, 6).is_animated());
    assert_eq!(ctx.screen.pixel(3, 3), Color16::BLACK);
}

#[test_log::test]
fn palette_animate_repaints_only_marked_pixels() {
    let (mut blitter, mut ctx) = setup(4, 2);
    blitter.draw_rect(&mut ctx, 0, 4, 2, GRASS);
    blitter.set_pixel(&mut ctx, 0, 1, 1, WATER);
    let grass = ctx.screen.pixel(0, 0);

    ctx.palette.cycle_animation(1);
    let mut video = HeadlessVideoDriver::new();
    blitter.palette_animate(&mut ctx, &mut video);

    assert_eq!(ctx.screen.pixel(1, 1), ctx.palette.lookup(WATER));
    assert_ne!(ctx.screen.pixel(1, 1), grass);
    for (x, y) in [(0, 0), (3, 0), (0, 1), (2, 1)] {
        assert_eq!(ctx.screen.pixel(x, y), grass);
    }
    assert_eq!(
        video.take_dirty(),
        DirtyRect {
            left: 0,
            top: 0,
            right: 4,
            bottom: 2
        }
    );
    assert_plane_consistent(&blitter, &ctx);
}

#[test_log::test]
fn restore_repaints_animated_pixels_with_current_palette() {
    let (mut blitter, mut ctx) = setup(3, 2);
    blitter.draw_rect(&mut ctx, 0, 3, 2, GRASS);
    blitter.set_pixel(&mut ctx, 0, 2, 1, WATER);

    let mut saved = vec![0u8; blitter.buffer_size(3, 2)];
    blitter.copy_to_buffer(&ctx, 0, &mut saved, 3, 2);

    blitter.draw_rect(&mut ctx, 0, 3, 2, 0);
    ctx.palette.cycle_animation(3);
    blitter.palette_animate(&mut ctx, &mut HeadlessVideoDriver::new());
    blitter.copy_from_buffer(&mut ctx, 0, &saved, 3, 2);

    assert_eq!(blitter.anim_cell(2, 1), AnimCell::for_palette_index(WATER, 8));
    assert_eq!(ctx.screen.pixel(2, 1), ctx.palette.lookup(WATER));
    assert_eq!(ctx.screen.pixel(0, 0), ctx.palette.lookup(GRASS));
    assert_plane_consistent(&blitter, &ctx);
}

#[test_log::test]
fn saved_rows_hold_pixels_then_cells() {
    let (mut blitter, mut ctx) = setup(2, 1);
    blitter.set_pixel(&mut ctx, 0, 1, 0, WATER);

    let mut saved = vec![0u8; blitter.buffer_size(2, 1)];
    blitter.copy_to_buffer(&ctx, 0, &mut saved, 2, 1);

    let pixel = u16::from_ne_bytes([saved[2], saved[3]]);
    assert_eq!(pixel, ctx.screen.pixel(1, 0).raw());
    assert_eq!(saved[4], 0);
    assert_eq!(saved[5], AnimCell::for_palette_index(WATER, 8).raw());
}

#[test_log::test]
fn empty_rectangles_round_trip() {
    let (mut blitter, mut ctx) = setup(3, 3);
    blitter.draw_rect(&mut ctx, 0, 3, 3, WATER);
    let screen = ctx.screen.clone();
    let cells = blitter.anim_cells().to_vec();

    for (width, height) in [(0, 2), (2, 0)] {
        let mut saved = vec![0u8; blitter.buffer_size(width, height)];
        blitter.copy_to_buffer(&ctx, 1, &mut saved, width, height);
        blitter.copy_from_buffer(&mut ctx, 1, &saved, width, height);
    }

    assert_eq!(ctx.screen, screen);
    assert_eq!(blitter.anim_cells(), &cells[..]);
}

#[test_log::test]
fn screenshot_copy_excludes_cells() {
    let (mut blitter, mut ctx) = setup(2, 2);
    blitter.draw_rect(&mut ctx, 0, 2, 2, WATER);

    let mut image = vec![0u8; 2 * 2 * 2];
    blitter.copy_image_to_buffer(&ctx, 0, &mut image, 2, 2, 2);
    let first = u16::from_ne_bytes([image[0], image[1]]);
    assert_eq!(first, ctx.screen.pixel(0, 0).raw());
}

#[test_log::test]
fn scroll_moves_both_planes() {
    let (mut blitter, mut ctx) = setup(4, 10);
    blitter.set_pixel(&mut ctx, 0, 1, 0, WATER);

    let mut rect = Rect {
        left: 0,
        top: 0,
        width: 4,
        height: 10,
    };
    blitter.scroll_buffer(&mut ctx, 0, &mut rect, 0, 3);

    assert_eq!(rect.top, 3);
    assert_eq!(rect.height, 7);
    assert!(blitter.anim_cell(1, 3).is_animated());
    assert_eq!(ctx.screen.pixel(1, 3), ctx.palette.lookup(WATER));
    assert_plane_consistent(&blitter, &ctx);
}

#[test_log::test]
fn color_mapping_clears_cells() {
    let (mut blitter, mut ctx) = setup(2, 2);
    blitter.draw_rect(&mut ctx, 0, 2, 2, WATER);

    blitter.draw_color_mapping_rect(&mut ctx, 0, 2, 1, PALETTE_TO_TRANSPARENT);

    assert_eq!(blitter.anim_cell(0, 0), AnimCell::NONE);
    assert_eq!(blitter.anim_cell(1, 0), AnimCell::NONE);
    assert!(blitter.anim_cell(0, 1).is_animated());
}

#[test_log::test]
fn resize_reallocates_a_cleared_plane() {
    let (mut blitter, mut ctx) = setup(8, 6);
    blitter.draw_rect(&mut ctx, 0, 8, 6, WATER);

    ctx.resize(10, 7);
    blitter.post_resize(&ctx);

    assert_eq!(blitter.anim_cells().len(), 70);
    assert!(blitter.anim_cells().iter().all(|c| *c == AnimCell::NONE));
}

#[test_log::test]
fn resize_to_the_same_size_keeps_the_plane() {
    let (mut blitter, mut ctx) = setup(3, 3);
    blitter.set_pixel(&mut ctx, 0, 1, 1, WATER);

    blitter.post_resize(&ctx);
    assert!(blitter.anim_cell(1, 1).is_animated());
}

#[test_log::test]
fn offscreen_drawing_leaves_the_plane_alone() {
    let (mut blitter, mut ctx) = setup(2, 2);
    blitter.draw_rect(&mut ctx, 0, 2, 2, WATER);
    let before = blitter.anim_cells().to_vec();

    let mut target = Surface::new(2, 2);
    ctx.render_offscreen(&mut target, |ctx| {
        blitter.draw_rect(ctx, 0, 2, 2, GRASS);
        let plain = single(SourcePixel::new(Color16::new(3, 3, 3), OPAQUE, 8, 0));
        blitter.draw(ctx, &params(&plain, 0, 0, 2), BlitterMode::Normal, ZoomLevel::Normal);
        blitter.set_pixel(ctx, 0, 1, 1, 0);
    });

    assert_eq!(blitter.anim_cells(), &before[..]);
    assert_eq!(target.pixel(1, 0), ctx.palette.lookup(GRASS));
    assert_eq!(target.pixel(0, 0), Color16::new(3, 3, 3));
    assert!(!ctx.screen_disable_anim);
}

#[test_log::test]
#[should_panic(expected = "post_resize was not called")]
fn drawing_before_sizing_the_plane_panics() {
    let mut ctx = RenderContext::new(Surface::new(2, 2), palette());
    let mut blitter = Blitter16bppAnim::new();
    blitter.draw_rect(&mut ctx, 0, 1, 1, GRASS);
}
