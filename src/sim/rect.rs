//! Axis-aligned rectangle geometry
//!
//! Every solid thing in the world (player, enemies, platforms, spikes,
//! projectiles, blade tips) is an axis-aligned rectangle with its origin at
//! the top-left corner, y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, positive width/height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Overlap test with open-interval semantics: rectangles that merely
    /// touch edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Shrink the rectangle horizontally by `inset` on each side
    /// (collision probe for the vertical resolution pass)
    #[inline]
    pub fn inset_x(&self, inset: f32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y,
            w: self.w - 2.0 * inset,
            h: self.h,
        }
    }

    /// Shrink the rectangle vertically by `inset` on each side
    /// (collision probe for the horizontal resolution pass)
    #[inline]
    pub fn inset_y(&self, inset: f32) -> Self {
        Self {
            x: self.x,
            y: self.y + inset,
            w: self.w,
            h: self.h - 2.0 * inset,
        }
    }
}
