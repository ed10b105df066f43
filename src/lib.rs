//! tileblit library crate.
//!
//! A 16bpp (5-6-5) software blitter for palette-based tile graphics, with
//! optional palette animation through a per-pixel animation plane.

pub mod blitter;
pub mod color;
pub mod config;
pub mod palette;
pub mod pixel;
pub mod sprite;
pub mod surface;
pub mod video;
