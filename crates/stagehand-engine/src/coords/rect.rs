use serde::{Deserialize, Serialize};

use super::Vec2;

/// Axis-aligned rectangle in world units (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Zero-sized rectangle at `p`.
    #[inline]
    pub const fn at(p: Vec2) -> Self {
        Self { origin: p, size: Vec2::zero() }
    }

    /// Smallest rectangle containing every point. Returns `None` for an empty iterator.
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::from_origin_size(min, max - min))
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let far = self.origin + self.size;
        let origin = Vec2::new(self.origin.x.min(far.x), self.origin.y.min(far.y));
        Rect::from_origin_size(origin, Vec2::new(self.size.x.abs(), self.size.y.abs()))
    }

    /// True for points in `[min, max)` on both axes.
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let (min, max) = (r.min(), r.max());
        (min.x..max.x).contains(&p.x) && (min.y..max.y).contains(&p.y)
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + by, self.size)
    }

    /// Smallest rectangle covering both. Zero-sized rects still extend the result
    /// so that an empty container anchored away from its children is accounted for.
    pub fn union(self, other: Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        let min = Vec2::new(a.origin.x.min(b.origin.x), a.origin.y.min(b.origin.y));
        let max = Vec2::new(a.max().x.max(b.max().x), a.max().y.max(b.max().y));
        Rect::from_origin_size(min, max - min)
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(self) -> [Vec2; 4] {
        let (min, max) = (self.min(), self.max());
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }

    // ── union ─────────────────────────────────────────────────────────────

    #[test]
    fn union_of_disjoint_rects_spans_both() {
        let u = r(0.0, 0.0, 5.0, 5.0).union(r(10.0, 20.0, 5.0, 5.0));
        assert_eq!(u, r(0.0, 0.0, 15.0, 25.0));
    }

    #[test]
    fn union_with_contained_rect_is_outer() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert_eq!(outer.union(r(10.0, 10.0, 5.0, 5.0)), outer);
    }

    #[test]
    fn union_with_point_extends_bounds() {
        let u = r(10.0, 10.0, 5.0, 5.0).union(Rect::at(Vec2::new(0.0, 0.0)));
        assert_eq!(u, r(0.0, 0.0, 15.0, 15.0));
    }

    // ── bounding ──────────────────────────────────────────────────────────

    #[test]
    fn bounding_of_points() {
        let b = Rect::bounding([Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(0.0, 0.0)]);
        assert_eq!(b, Some(r(-2.0, -1.0, 5.0, 5.0)));
    }

    #[test]
    fn bounding_of_nothing_is_none() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
