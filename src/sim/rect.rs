//! Axis-aligned rectangle shared by every entity
//!
//! Position is the top-left corner in screen space (y grows downward).
//! Collision and rendering both key off this shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (always positive)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "degenerate rect {width}x{height}");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Overlap test with both rectangles eroded by `inset`
    ///
    /// Edge grazes shallower than the inset do not count as hits.
    pub fn overlaps_inset(&self, other: &Rect, inset: f32) -> bool {
        self.left() < other.right() - inset
            && self.right() > other.left() + inset
            && self.top() < other.bottom() - inset
            && self.bottom() > other.top() + inset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.center(), Vec2::new(30.0, 50.0));
        assert_eq!(Rect::centered(r.center(), r.size), r);
    }

    #[test]
    fn test_overlap_with_inset() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        // Deep overlap
        assert!(a.overlaps_inset(&Rect::new(20.0, 20.0, 50.0, 50.0), 5.0));
        // 3px graze along the right edge is inside the inset
        assert!(!a.overlaps_inset(&Rect::new(47.0, 0.0, 50.0, 50.0), 5.0));
        // Same graze registers with no inset
        assert!(a.overlaps_inset(&Rect::new(47.0, 0.0, 50.0, 50.0), 0.0));
        // Disjoint
        assert!(!a.overlaps_inset(&Rect::new(100.0, 100.0, 10.0, 10.0), 0.0));
    }
}
