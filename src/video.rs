// src/video.rs

//! The video output collaborator.
//!
//! The blitters only ever tell the video driver which part of the screen
//! changed outside the normal draw path. Everything else (window, surface
//! allocation, presentation) belongs to the driver.

use log::trace;

/// A dirty screen region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl DirtyRect {
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Smallest rectangle covering both.
    pub fn union(self, other: DirtyRect) -> DirtyRect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        DirtyRect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Minimal interface the blitters need from the video output.
pub trait VideoDriver {
    /// Marks `width` x `height` pixels at `(left, top)` for redraw.
    fn make_dirty(&mut self, left: usize, top: usize, width: usize, height: usize);
}

/// A video driver with no output that only accumulates the dirty region.
#[derive(Debug, Default)]
pub struct HeadlessVideoDriver {
    dirty: DirtyRect,
    notifications: usize,
}

impl HeadlessVideoDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated dirty region and resets it.
    pub fn take_dirty(&mut self) -> DirtyRect {
        std::mem::take(&mut self.dirty)
    }

    /// Number of `make_dirty` calls received so far.
    pub fn notifications(&self) -> usize {
        self.notifications
    }
}

impl VideoDriver for HeadlessVideoDriver {
    fn make_dirty(&mut self, left: usize, top: usize, width: usize, height: usize) {
        trace!(
            "HeadlessVideoDriver: make_dirty ({}, {}) {}x{}",
            left,
            top,
            width,
            height
        );
        let rect = DirtyRect {
            left,
            top,
            right: left + width,
            bottom: top + height,
        };
        self.dirty = self.dirty.union(rect);
        self.notifications += 1;
    }
}
