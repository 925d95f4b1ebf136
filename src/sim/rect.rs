//! Axis-aligned boxes in screen space
//!
//! Screen coordinates: origin at top-left, +y points down. Everything that
//! collides (swarm leader, gates, boss) is an integer box.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An integer rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }

    pub fn set_center_x(&mut self, x: i32) {
        self.pos.x = x - self.size.x / 2;
    }

    pub fn set_bottom(&mut self, y: i32) {
        self.pos.y = y - self.size.y;
    }

    /// Shift horizontally so the box lies within `[min_x, max_x]`
    pub fn clamp_x(&mut self, min_x: i32, max_x: i32) {
        if self.left() < min_x {
            self.pos.x = min_x;
        }
        if self.right() > max_x {
            self.pos.x = max_x - self.size.x;
        }
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
