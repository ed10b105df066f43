// src/surface.rs

//! Pixel surfaces and the render context that is threaded through every
//! blitter call.

use crate::color::Color16;
use crate::palette::Palette;

/// A row-major 16bpp pixel surface.
///
/// `pitch` is the row stride in pixels and may exceed `width`. Blitter calls
/// address pixels by their offset into [`Surface::pixels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Vec<Color16>,
    width: usize,
    height: usize,
    pitch: usize,
}

impl Surface {
    /// Creates a black surface whose pitch equals its width.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pitch(width, height, width)
    }

    /// Creates a black surface with an explicit row stride.
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Self {
        assert!(pitch >= width, "pitch {} is narrower than width {}", pitch, width);
        Self {
            pixels: vec![Color16::BLACK; pitch * height],
            width,
            height,
            pitch,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.pitch
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color16 {
        self.pixels[self.offset(x, y)]
    }

    #[inline]
    pub fn pixels(&self) -> &[Color16] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color16] {
        &mut self.pixels
    }
}

/// Everything a blitter reads besides its own state.
///
/// `screen` is the current draw target. While `screen_disable_anim` is set
/// the target is not the visible screen, and animation-aware blitters fall back
/// to plain drawing without touching their animation plane.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub screen: Surface,
    pub palette: Palette,
    pub screen_disable_anim: bool,
}

impl RenderContext {
    pub fn new(screen: Surface, palette: Palette) -> Self {
        Self {
            screen,
            palette,
            screen_disable_anim: false,
        }
    }

    /// Replaces the screen with a black surface of the new size.
    ///
    /// The caller must notify the blitter via `post_resize` before drawing.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.screen = Surface::new(width, height);
    }

    /// Runs `f` with `target` swapped in as the draw target and animation
    /// disabled, then restores the screen.
    pub fn render_offscreen<R>(
        &mut self,
        target: &mut Surface,
        f: impl FnOnce(&mut RenderContext) -> R,
    ) -> R {
        std::mem::swap(&mut self.screen, target);
        let old_disable = std::mem::replace(&mut self.screen_disable_anim, true);

        let result = f(self);

        self.screen_disable_anim = old_disable;
        std::mem::swap(&mut self.screen, target);
        result
    }
}
