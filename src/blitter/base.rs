// src/blitter/base.rs

//! Rectangle and buffer operations over a 16bpp surface.
//!
//! Nothing here knows about palette animation. Offsets (`video`) are pixel
//! offsets into the surface, and rectangles are trusted to lie inside it: a
//! rectangle that leaves the surface panics on the slice bounds check instead
//! of corrupting neighbouring memory.

use super::Rect;
use crate::color::Color16;
use crate::surface::Surface;

/// Bytes one screen pixel occupies in a saved buffer.
pub const BYTES_PER_PIXEL: usize = std::mem::size_of::<Color16>();

/// Offset of the pixel `(x, y)` relative to `video`.
pub fn move_to(surface: &Surface, video: usize, x: i32, y: i32) -> usize {
    let offset = video as isize + x as isize + y as isize * surface.pitch() as isize;
    to_offset(offset)
}

pub fn set_pixel(surface: &mut Surface, video: usize, x: usize, y: usize, color: Color16) {
    let offset = video + x + y * surface.pitch();
    surface.pixels_mut()[offset] = color;
}

pub fn draw_rect(surface: &mut Surface, video: usize, width: usize, height: usize, color: Color16) {
    let pitch = surface.pitch();
    let pixels = surface.pixels_mut();
    for row in 0..height {
        let start = video + row * pitch;
        pixels[start..start + width].fill(color);
    }
}

/// Restores `height` rows of `width` pixels saved by [`copy_to_buffer`].
pub fn copy_from_buffer(surface: &mut Surface, video: usize, src: &[u8], width: usize, height: usize) {
    let row_bytes = width * BYTES_PER_PIXEL;
    assert!(
        src.len() >= row_bytes * height,
        "buffer of {} bytes is too small for {}x{} pixels",
        src.len(),
        width,
        height
    );

    let pitch = surface.pitch();
    let pixels = surface.pixels_mut();
    for row in 0..height {
        let start = video + row * pitch;
        let bytes = &src[row * row_bytes..(row + 1) * row_bytes];
        read_row(&mut pixels[start..start + width], bytes);
    }
}

/// Saves a rectangle into `dst`, rows packed back to back without padding.
pub fn copy_to_buffer(surface: &Surface, video: usize, dst: &mut [u8], width: usize, height: usize) {
    copy_image_to_buffer(surface, video, dst, width, height, width);
}

/// Like [`copy_to_buffer`], but rows in `dst` are `dst_pitch` pixels apart.
pub fn copy_image_to_buffer(
    surface: &Surface,
    video: usize,
    dst: &mut [u8],
    width: usize,
    height: usize,
    dst_pitch: usize,
) {
    let pitch = surface.pitch();
    let pixels = surface.pixels();
    let row_stride = dst_pitch * BYTES_PER_PIXEL;
    let row_bytes = width * BYTES_PER_PIXEL;

    for row in 0..height {
        let start = video + row * pitch;
        let out = row * row_stride;
        write_row(&mut dst[out..out + row_bytes], &pixels[start..start + width]);
    }
}

/// Shifts the rectangle `rect` (relative to `video`) by `(scroll_x, scroll_y)`
/// inside `plane`, a row-major buffer with stride `pitch`.
///
/// On return `rect` describes the part of the rectangle that now holds
/// scrolled content; the strip uncovered on the trailing edge is left for the
/// caller to redraw. Downward scrolls run bottom-up so rows are read before
/// they are overwritten. Every other scroll runs top-down with an
/// overlap-tolerant row copy, since a purely horizontal shift copies a row
/// onto itself.
pub fn scroll_plane<T: Copy>(
    plane: &mut [T],
    pitch: usize,
    video: usize,
    rect: &mut Rect,
    scroll_x: i32,
    scroll_y: i32,
) {
    let pitch = pitch as isize;
    let Rect {
        mut left,
        mut top,
        mut width,
        mut height,
    } = *rect;

    if scroll_y > 0 {
        let mut dst = video as isize + left as isize + (top + height - 1) as isize * pitch;
        let mut src = dst - scroll_y as isize * pitch;

        top += scroll_y;
        height -= scroll_y;
        assert!(height > 0, "scrolled by {} rows out of the rectangle", scroll_y);

        if scroll_x >= 0 {
            dst += scroll_x as isize;
            left += scroll_x;
            width -= scroll_x;
        } else {
            src -= scroll_x as isize;
            width += scroll_x;
        }
        assert!(width > 0, "scrolled by {} columns out of the rectangle", scroll_x);

        for _ in 0..height {
            copy_row(plane, src, dst, width as usize);
            src -= pitch;
            dst -= pitch;
        }
    } else {
        let mut dst = video as isize + left as isize + top as isize * pitch;
        let mut src = dst - scroll_y as isize * pitch;

        height += scroll_y;
        assert!(height > 0, "scrolled by {} rows out of the rectangle", scroll_y);

        if scroll_x >= 0 {
            dst += scroll_x as isize;
            left += scroll_x;
            width -= scroll_x;
        } else {
            src -= scroll_x as isize;
            width += scroll_x;
        }
        assert!(width > 0, "scrolled by {} columns out of the rectangle", scroll_x);

        for _ in 0..height {
            copy_row(plane, src, dst, width as usize);
            src += pitch;
            dst += pitch;
        }
    }

    *rect = Rect {
        left,
        top,
        width,
        height,
    };
}

#[inline]
fn copy_row<T: Copy>(plane: &mut [T], src: isize, dst: isize, width: usize) {
    let src = to_offset(src);
    let dst = to_offset(dst);
    plane.copy_within(src..src + width, dst);
}

#[inline]
fn to_offset(offset: isize) -> usize {
    assert!(offset >= 0, "pixel offset {} lies before the surface", offset);
    offset as usize
}

/// Serializes pixels in native byte order.
#[inline]
pub(crate) fn write_row(dst: &mut [u8], row: &[Color16]) {
    for (bytes, px) in dst.chunks_exact_mut(BYTES_PER_PIXEL).zip(row) {
        bytes.copy_from_slice(&px.raw().to_ne_bytes());
    }
}

#[inline]
pub(crate) fn read_row(row: &mut [Color16], src: &[u8]) {
    for (px, bytes) in row.iter_mut().zip(src.chunks_exact(BYTES_PER_PIXEL)) {
        *px = Color16::from_raw(u16::from_ne_bytes([bytes[0], bytes[1]]));
    }
}
