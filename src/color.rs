// src/color.rs

//! Packed color formats and the per-pixel color arithmetic used by the blitters.
//!
//! Two representations live here:
//! - [`Color32`]: the 8-bit-per-channel color of the global palette and of
//!   decoded sprites.
//! - [`Color16`]: the on-screen 5-6-5 format, packed into a `u16` with blue in
//!   the low bits and red in the high bits.
//!
//! The arithmetic mirrors what a 16bpp framebuffer can cheaply do per pixel:
//! integer-only blending, darkening, gray conversion and brightness scaling.


/// Brightness value that leaves a color unchanged (range is 0..=15).
pub const DEFAULT_BRIGHTNESS: u8 = 8;

const BLUE_BITS: u32 = 5;
const GREEN_BITS: u32 = 6;
const RED_BITS: u32 = 5;

const BLUE_SHIFT: u32 = 0;
const GREEN_SHIFT: u32 = BLUE_SHIFT + BLUE_BITS;
const RED_SHIFT: u32 = GREEN_SHIFT + GREEN_BITS;

const BLUE_MASK: u16 = (1 << BLUE_BITS) - 1;
const GREEN_MASK: u16 = (1 << GREEN_BITS) - 1;
const RED_MASK: u16 = (1 << RED_BITS) - 1;

/// Largest value of the red and blue channels.
pub const MAX_RED_BLUE: u8 = RED_MASK as u8;
/// Largest value of the green channel.
pub const MAX_GREEN: u8 = GREEN_MASK as u8;

/// An 8-bit-per-channel color, as stored in the global palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    /// Creates an opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// On-screen 5-6-5 color.
///
/// Channel values passed to [`Color16::new`] are truncated to their bit width,
/// the same way a store into a packed bit-field would truncate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Color16(u16);

impl Color16 {
    pub const BLACK: Color16 = Color16(0);

    /// Packs raw channel values: `r` and `b` in 0..=31, `g` in 0..=63.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(
            ((r as u16 & RED_MASK) << RED_SHIFT)
                | ((g as u16 & GREEN_MASK) << GREEN_SHIFT)
                | ((b as u16 & BLUE_MASK) << BLUE_SHIFT),
        )
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> RED_SHIFT) & RED_MASK) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & GREEN_MASK) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> BLUE_SHIFT) & BLUE_MASK) as u8
    }
}

impl From<Color32> for Color16 {
    #[inline]
    fn from(c: Color32) -> Self {
        downsample(c.r, c.g, c.b)
    }
}

/// Converts 8-bit channels to the on-screen format by dropping low bits.
#[inline]
pub const fn downsample(r: u8, g: u8, b: u8) -> Color16 {
    Color16::new(r >> 3, g >> 2, b >> 3)
}

/// Blends `(r, g, b)` over `current` with `alpha` in 0..=15, always running the
/// interpolation.
///
/// The divisor is 16, not 15. Full alpha therefore never quite reaches the
/// source color here; callers that can see alpha 0 or 15 use
/// [`compose_rgba`] instead.
#[inline]
pub fn compose_rgba_no_check(r: u8, g: u8, b: u8, alpha: u8, current: Color16) -> Color16 {
    let a = i32::from(alpha);
    let mix = |src: u8, dst: u8| -> u8 {
        let dst = i32::from(dst);
        ((i32::from(src) - dst) * a / 16 + dst) as u8
    };
    Color16::new(
        mix(r, current.r()),
        mix(g, current.g()),
        mix(b, current.b()),
    )
}

/// Blends `(r, g, b)` over `current`. Alpha 0 returns `current` untouched and
/// alpha 15 returns the source exactly.
#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, alpha: u8, current: Color16) -> Color16 {
    if alpha == 0 {
        return current;
    }
    if alpha >= 15 {
        return Color16::new(r, g, b);
    }
    compose_rgba_no_check(r, g, b, alpha, current)
}

/// [`compose_rgba_no_check`] for an already packed source color.
#[inline]
pub fn compose_pa_no_check(color: Color16, alpha: u8, current: Color16) -> Color16 {
    compose_rgba_no_check(color.r(), color.g(), color.b(), alpha, current)
}

/// [`compose_rgba`] for an already packed source color.
#[inline]
pub fn compose_pa(color: Color16, alpha: u8, current: Color16) -> Color16 {
    if alpha == 0 {
        return current;
    }
    if alpha >= 15 {
        return color;
    }
    compose_pa_no_check(color, alpha, current)
}

/// Scales every channel by `numerator / denominator`.
///
/// A numerator below the denominator darkens the color; the blitters use
/// 192/256 for transparent sprites and 154/256 for transparent rectangles.
#[inline]
pub fn make_transparent(color: Color16, numerator: u32, denominator: u32) -> Color16 {
    let scale = |c: u8| (u32::from(c) * numerator / denominator) as u8;
    Color16::new(scale(color.r()), scale(color.g()), scale(color.b()))
}

/// Converts a color to gray using integer luma weights that sum to 65536.
#[inline]
pub fn make_gray(color: Color16) -> Color16 {
    let r = u32::from(color.r()) << 3;
    let g = u32::from(color.g()) << 2;
    let b = u32::from(color.b()) << 3;

    let gray = ((r * 19595 + g * 38470 + b * 7471) / 65536) as u8;
    downsample(gray, gray, gray)
}

/// Returns the 8-bit brightness of a darkened gray version of `color`.
///
/// Weights are roughly 66% of the ones in [`make_gray`].
#[inline]
pub fn make_dark(color: Color16) -> u8 {
    let r = u32::from(color.r()) << 3;
    let g = u32::from(color.g()) << 2;
    let b = u32::from(color.b()) << 3;

    ((r * 13063 + g * 25647 + b * 4981) / 65536) as u8
}

/// Scales a color by `brightness / DEFAULT_BRIGHTNESS` (brightness in 0..=15).
///
/// Channels pushed past their maximum are clamped, and half of the summed
/// overflow is spread over the remaining headroom of every channel, so very
/// bright pixels wash out towards white instead of banding.
#[inline]
pub fn adjust_brightness(color: Color16, brightness: u8) -> Color16 {
    if brightness == DEFAULT_BRIGHTNESS {
        return color;
    }

    let scale = |c: u8| u16::from(c) * u16::from(brightness) / u16::from(DEFAULT_BRIGHTNESS);
    let r = scale(color.r());
    let g = scale(color.g());
    let b = scale(color.b());

    let max_rb = u16::from(MAX_RED_BLUE);
    let max_g = u16::from(MAX_GREEN);

    let mut overbright = 0u16;
    if r > max_rb {
        overbright += r - max_rb;
    }
    if g > max_g {
        overbright += g - max_g;
    }
    if b > max_rb {
        overbright += b - max_rb;
    }

    if overbright == 0 {
        return Color16::new(r as u8, g as u8, b as u8);
    }

    overbright /= 2;
    let spread = |c: u16, max: u16| -> u8 {
        if c >= max {
            max as u8
        } else {
            (c + overbright * (max - c) / (max + 1)).min(max) as u8
        }
    };
    Color16::new(spread(r, max_rb), spread(g, max_g), spread(b, max_rb))
}
