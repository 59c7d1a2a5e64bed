//! Axis-aligned rectangles for every collision query in the simulation
//!
//! All coordinates are integer world units. A rectangle spans
//! `[x, x + w) × [y, y + h)`; two rectangles overlap only when they share
//! interior area, so touching edges are not a collision.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle with its top-left corner at `pos`
    pub fn at(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Square of the given half extent centered on `center`
    pub fn centered(center: IVec2, half_extent: i32) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2,
            half_extent * 2,
        )
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Same rectangle moved by `delta`
    pub fn translated(&self, delta: IVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Rectangle grown by `margin` on every side
    pub fn inflated(&self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2,
            self.h + margin * 2,
        )
    }

    /// True if the two rectangles share interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point test, inclusive on every edge
    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// True if `other` lies strictly inside this rectangle
    pub fn strictly_contains(&self, other: &Rect) -> bool {
        other.left() > self.left()
            && other.right() < self.right()
            && other.top() > self.top()
            && other.bottom() < self.bottom()
    }
}

/// True if `rect` overlaps any rectangle yielded by `others`
///
/// An empty set never collides.
pub fn overlaps_any<'a, I>(rect: &Rect, others: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    others.into_iter().any(|o| rect.intersects(o))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap_and_touching() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        // Shared edge only
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        // Fully inside
        assert!(a.intersects(&Rect::new(2, 2, 2, 2)));
    }

    #[test]
    fn test_empty_rect_never_collides() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(5, 5, 0, 10)));
        assert!(!overlaps_any(&a, std::iter::empty()));
    }

    #[test]
    fn test_centered_and_inflated() {
        let r = Rect::centered(IVec2::new(100, 100), 50);
        assert_eq!(r, Rect::new(50, 50, 100, 100));
        assert_eq!(r.inflated(50), Rect::new(0, 0, 200, 200));
        assert!(r.inflated(50).strictly_contains(&r));
        assert!(!r.strictly_contains(&r));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains_point(IVec2::new(0, 0)));
        assert!(r.contains_point(IVec2::new(10, 10)));
        assert!(!r.contains_point(IVec2::new(11, 5)));
    }
}
