//! 2D line segment type.

use super::{Point2, Vec2};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A 2D line segment defined by two endpoints.
///
/// Polygon edges are handed around as segments, so every predicate that
/// talks about "edges" works on this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[inline]
    pub fn from_coords(x1: F, y1: F, x2: F, y2: F) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Returns the squared length of the segment.
    #[inline]
    pub fn length_squared(self) -> F {
        self.start.distance_squared(self.end)
    }

    /// Returns the length of the segment.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns the point at parameter `t` along the segment.
    ///
    /// `t = 0` is `start`, `t = 1` is `end`.
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Computes the closest point on the segment to the given point.
    ///
    /// Returns `(closest_point, t)` with `t` clamped to [0, 1].
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let v = self.direction();
        let len_sq = v.magnitude_squared();

        if len_sq <= F::epsilon() {
            return (self.start, F::zero());
        }

        let t = (p - self.start).dot(v) / len_sq;
        let t_clamped = t.max(F::zero()).min(F::one());

        (self.point_at(t_clamped), t_clamped)
    }

    /// Computes the squared distance from a point to this segment.
    #[inline]
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance_squared(closest)
    }

    /// Returns `true` if the segment is shorter than `eps`.
    #[inline]
    pub fn is_degenerate(self, eps: F) -> bool {
        self.length_squared() <= eps * eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 3.0, 4.0);
        assert_eq!(s.length_squared(), 25.0);
        assert_eq!(s.length(), 5.0);
    }

    #[test]
    fn test_point_at() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);
        assert_eq!(s.point_at(0.0).x, 0.0);
        assert_eq!(s.point_at(0.5).x, 5.0);
        assert_eq!(s.point_at(1.0).x, 10.0);
    }

    #[test]
    fn test_closest_point_on_segment() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);

        let (closest, t) = s.closest_point(Point2::new(5.0, 5.0));
        assert_relative_eq!(closest.x, 5.0, epsilon = 1e-10);
        assert_relative_eq!(closest.y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(t, 0.5, epsilon = 1e-10);

        let (closest, t) = s.closest_point(Point2::new(15.0, 0.0));
        assert_relative_eq!(closest.x, 10.0, epsilon = 1e-10);
        assert_relative_eq!(t, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_distance_to_point() {
        let s: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);
        assert_relative_eq!(
            s.distance_squared_to_point(Point2::new(5.0, 3.0)),
            9.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_degenerate() {
        let degen: Segment2<f64> = Segment2::from_coords(5.0, 5.0, 5.0, 5.0);
        assert!(degen.is_degenerate(1e-10));
        let (closest, t) = degen.closest_point(Point2::new(0.0, 0.0));
        assert_eq!(closest, Point2::new(5.0, 5.0));
        assert_eq!(t, 0.0);

        let normal: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 1.0, 0.0);
        assert!(!normal.is_degenerate(1e-10));
    }
}
