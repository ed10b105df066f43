// src/main.rs

//! Headless driver for the tileblit blitters.
//!
//! Renders a small tiled scene into an in-memory screen and runs a few
//! palette-animation ticks, logging what each step touched.

use anyhow::{anyhow, Context};
use log::{debug, info};

use tileblit::blitter::{
    select_blitter, Blitter, BlitterMode, BlitterParams, PaletteAnimation, Rect, PALETTE_TO_TRANSPARENT,
};
use tileblit::color::Color32;
use tileblit::config::Config;
use tileblit::palette::{Palette, PALETTE_ANIM_SIZE, PALETTE_ANIM_START, PALETTE_SIZE};
use tileblit::sprite::{CommonPixel, LoaderSprite, Sprite, ZoomLevel};
use tileblit::surface::{RenderContext, Surface};
use tileblit::video::HeadlessVideoDriver;

const TILE_WIDTH: u16 = 32;
const TILE_HEIGHT: u16 = 16;
/// Palette entry used for the background fill.
const GROUND_INDEX: u8 = 60;

fn main() -> anyhow::Result<()> {
    let config = Config::load_or_default().context("Failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.filter.as_str()))
        .format_timestamp_micros()
        .init();

    info!("Starting tileblit...");
    debug!("Configuration: {:?}", config);

    let mut blitter = select_blitter(&config.blitter.name)
        .with_context(|| format!("Failed to select blitter '{}'", config.blitter.name))?;

    let (width, height) = (config.screen.width, config.screen.height);
    if width < usize::from(TILE_WIDTH) || height < usize::from(TILE_HEIGHT) {
        return Err(anyhow!("Screen {}x{} is smaller than one tile", width, height));
    }

    let mut ctx = RenderContext::new(Surface::new(width, height), demo_palette());
    let mut video = HeadlessVideoDriver::new();
    blitter.post_resize(&ctx);
    if blitter.use_palette_animation() == PaletteAnimation::Blitter {
        blitter.palette_animate(&mut ctx, &mut video);
        video.take_dirty();
    }

    // --- Scene ---
    let tile = blitter.encode(&water_tile(), &ctx.palette);
    info!(
        "Encoded {}x{} water tile ({} bytes)",
        tile.width,
        tile.height,
        tile.byte_size()
    );

    blitter.draw_rect(&mut ctx, 0, width, height, GROUND_INDEX);
    let tiles = draw_tiled(blitter.as_mut(), &mut ctx, &tile);
    info!("Drew {} tiles", tiles);

    // An overlay box: save what is under it, darken it, then restore.
    let (box_w, box_h) = (width / 4, height / 4);
    let box_at = ctx.screen.offset(width / 8, height / 8);
    let mut saved = vec![0u8; blitter.buffer_size(box_w, box_h)];
    blitter.copy_to_buffer(&ctx, box_at, &mut saved, box_w, box_h);
    blitter.draw_color_mapping_rect(&mut ctx, box_at, box_w, box_h, PALETTE_TO_TRANSPARENT);
    blitter.copy_from_buffer(&mut ctx, box_at, &saved, box_w, box_h);
    debug!("Saved and restored a {}x{} overlay", box_w, box_h);

    let mut rect = Rect {
        left: 0,
        top: 0,
        width: width as i32,
        height: height as i32,
    };
    blitter.scroll_buffer(&mut ctx, 0, &mut rect, 0, i32::from(TILE_HEIGHT / 2));
    info!(
        "Scrolled; content now at ({}, {}) {}x{}",
        rect.left, rect.top, rect.width, rect.height
    );

    // --- Palette animation ---
    for frame in 0..config.animation.frames {
        ctx.palette.cycle_animation(1);
        blitter.palette_animate(&mut ctx, &mut video);

        let dirty = video.take_dirty();
        info!(
            "Frame {}: dirty ({}, {})-({}, {})",
            frame, dirty.left, dirty.top, dirty.right, dirty.bottom
        );
    }

    info!("tileblit finished ({} dirty notifications).", video.notifications());
    Ok(())
}

/// Covers the screen with `tile`, clipping the right and bottom edges.
fn draw_tiled(blitter: &mut dyn Blitter, ctx: &mut RenderContext, tile: &Sprite) -> usize {
    let (width, height) = (ctx.screen.width(), ctx.screen.height());
    let pitch = ctx.screen.pitch();
    let mut count = 0;

    for top in (0..height).step_by(usize::from(tile.height)) {
        for left in (0..width).step_by(usize::from(tile.width)) {
            let mut bp = BlitterParams::for_sprite(tile, left, top, pitch);
            bp.width = bp.width.min(width - left);
            bp.height = bp.height.min(height - top);
            blitter.draw(ctx, &bp, BlitterMode::Normal, ZoomLevel::Normal);
            count += 1;
        }
    }
    count
}

/// Grayscale ramp with a blue cycle in the animated range.
fn demo_palette() -> Palette {
    let mut colors = [Color32::default(); PALETTE_SIZE];
    for (i, c) in colors.iter_mut().enumerate().take(usize::from(PALETTE_ANIM_START)) {
        let v = (i * 255 / usize::from(PALETTE_ANIM_START)) as u8;
        *c = Color32::new(v / 2, v, v / 3);
    }
    for i in 0..usize::from(PALETTE_ANIM_SIZE) {
        let wave = (i % 7) as u8;
        colors[usize::from(PALETTE_ANIM_START) + i] = Color32::new(20 + wave * 10, 60 + wave * 20, 200);
    }
    Palette::new(colors)
}

/// A diamond of animated water with a plain shoreline.
fn water_tile() -> LoaderSprite {
    let (w, h) = (i32::from(TILE_WIDTH), i32::from(TILE_HEIGHT));
    let mut data = Vec::with_capacity((w * h) as usize);

    for y in 0..h {
        for x in 0..w {
            // Manhattan distance from the center, in tile-height units.
            let d = (2 * x - w + 1).abs() / 2 + (2 * y - h + 1).abs();
            let px = if d > h {
                CommonPixel::default()
            } else if d >= h - 1 {
                CommonPixel {
                    r: 194,
                    g: 178,
                    b: 128,
                    a: 255,
                    m: 0,
                    v: 0,
                }
            } else {
                let phase = ((x + y) % i32::from(PALETTE_ANIM_SIZE)) as u8;
                CommonPixel {
                    r: 128,
                    g: 128,
                    b: 128,
                    a: 255,
                    m: PALETTE_ANIM_START + phase,
                    v: 8,
                }
            };
            data.push(px);
        }
    }

    LoaderSprite {
        width: TILE_WIDTH,
        height: TILE_HEIGHT,
        x_offs: -(TILE_WIDTH as i16) / 2,
        y_offs: 0,
        data,
    }
}
