//! Geometric predicates with explicit tolerance.
//!
//! Every `eps` in this module is a distance in coordinate units.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the side of the directed line `a -> b` that `c` lies on. When `c`
/// is within `eps` of that line the points are `Collinear`. If `a` and `b`
/// coincide, everything is collinear.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let ab = b - a;
    let cross = ab.cross(c - a);
    // |cross| / |ab| is the distance from c to the line.
    let limit = eps * ab.magnitude();

    if cross > limit {
        Orientation::CounterClockwise
    } else if cross < -limit {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a line segment within tolerance.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// Result of a segment intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// Segments do not intersect.
    None,
    /// Segments intersect at a single point.
    Point {
        /// The intersection point.
        point: Point2<F>,
        /// Parameter along first segment (0 = start, 1 = end).
        t1: F,
        /// Parameter along second segment (0 = start, 1 = end).
        t2: F,
    },
    /// Segments are collinear and share a stretch of positive length.
    Overlapping {
        /// Start of the overlapping region.
        start: Point2<F>,
        /// End of the overlapping region.
        end: Point2<F>,
    },
}

impl<F> SegmentIntersection<F> {
    /// Returns `true` unless the result is `None`.
    #[inline]
    pub fn is_some(&self) -> bool {
        !matches!(self, SegmentIntersection::None)
    }
}

/// Intersects two line segments, with tolerance.
///
/// Endpoints within `eps` of the other segment count as touching, so a
/// T-junction or a shared vertex yields a `Point`.
pub fn segments_intersect<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let len1 = d1.magnitude();
    let len2 = d2.magnitude();

    if len1 <= eps || len2 <= eps {
        return degenerate_intersection(s1, s2, eps);
    }

    let cross = d1.cross(d2);
    let d = s2.start - s1.start;

    // Parallel when the longer segment drifts less than eps off the shorter one's direction.
    if cross.abs() <= eps * len1.min(len2) {
        if point_line_distance(s2.start, s1) > eps {
            return SegmentIntersection::None;
        }

        let len_sq = len1 * len1;
        let t_start = d.dot(d1) / len_sq;
        let t_end = (s2.end - s1.start).dot(d1) / len_sq;
        let (t_min, t_max) = if t_start <= t_end {
            (t_start, t_end)
        } else {
            (t_end, t_start)
        };

        let overlap_start = t_min.max(F::zero());
        let overlap_end = t_max.min(F::one());
        let t_eps = eps / len1;

        if overlap_start > overlap_end + t_eps {
            return SegmentIntersection::None;
        }

        if overlap_end - overlap_start <= t_eps {
            let point = s1.point_at(overlap_start);
            let (_, t2) = s2.closest_point(point);
            return SegmentIntersection::Point {
                point,
                t1: overlap_start,
                t2,
            };
        }

        return SegmentIntersection::Overlapping {
            start: s1.point_at(overlap_start),
            end: s1.point_at(overlap_end),
        };
    }

    // Cramer's rule on s1.start + t1 * d1 = s2.start + t2 * d2.
    let t1 = d.cross(d2) / cross;
    let t2 = d.cross(d1) / cross;

    let t1_eps = eps / len1;
    let t2_eps = eps / len2;
    let one = F::one();

    if t1 >= -t1_eps && t1 <= one + t1_eps && t2 >= -t2_eps && t2 <= one + t2_eps {
        let t1 = t1.max(F::zero()).min(one);
        SegmentIntersection::Point {
            point: s1.point_at(t1),
            t1,
            t2: t2.max(F::zero()).min(one),
        }
    } else {
        SegmentIntersection::None
    }
}

/// Distance from `p` to the infinite line through `line`.
fn point_line_distance<F: Float>(p: Point2<F>, line: Segment2<F>) -> F {
    let d = line.direction();
    d.cross(p - line.start).abs() / d.magnitude()
}

/// Handles the case where at least one segment is a single point.
fn degenerate_intersection<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    if s1.is_degenerate(eps) {
        if point_on_segment(s1.start, s2, eps) {
            let (_, t2) = s2.closest_point(s1.start);
            return SegmentIntersection::Point {
                point: s1.start,
                t1: F::zero(),
                t2,
            };
        }
        return SegmentIntersection::None;
    }

    if point_on_segment(s2.start, s1, eps) {
        let (point, t1) = s1.closest_point(s2.start);
        return SegmentIntersection::Point {
            point,
            t1,
            t2: F::zero(),
        };
    }
    SegmentIntersection::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orient2d() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(
            orient2d(a, b, Point2::new(0.5, 1.0), 1e-10),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orient2d(a, b, Point2::new(0.5, -1.0), 1e-10),
            Orientation::Clockwise
        );
        assert_eq!(
            orient2d(a, b, Point2::new(2.0, 0.0), 1e-10),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_orient2d_nearly_collinear() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(100.0, 0.0);
        // Tolerance is a distance, independent of edge length.
        assert_eq!(
            orient2d(a, b, Point2::new(50.0, 1e-12), 1e-10),
            Orientation::Collinear
        );
        assert_eq!(
            orient2d(a, b, Point2::new(50.0, 1e-8), 1e-10),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn test_point_on_segment() {
        let seg: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);
        assert!(point_on_segment(Point2::new(0.0, 0.0), seg, 1e-10));
        assert!(point_on_segment(Point2::new(5.0, 0.0), seg, 1e-10));
        assert!(point_on_segment(Point2::new(10.0, 0.0), seg, 1e-10));
        assert!(!point_on_segment(Point2::new(15.0, 0.0), seg, 1e-10));
        assert!(!point_on_segment(Point2::new(5.0, 0.5), seg, 0.1));
    }

    #[test]
    fn test_segments_intersect_crossing() {
        let s1: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 10.0);
        let s2 = Segment2::from_coords(0.0, 10.0, 10.0, 0.0);

        match segments_intersect(s1, s2, 1e-10) {
            SegmentIntersection::Point { point, t1, t2 } => {
                assert_relative_eq!(point.x, 5.0, epsilon = 1e-10);
                assert_relative_eq!(point.y, 5.0, epsilon = 1e-10);
                assert_relative_eq!(t1, 0.5, epsilon = 1e-10);
                assert_relative_eq!(t2, 0.5, epsilon = 1e-10);
            }
            other => panic!("expected point intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_segments_intersect_shared_vertex() {
        let s1: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 5.0, 5.0);
        let s2 = Segment2::from_coords(5.0, 5.0, 10.0, 0.0);

        match segments_intersect(s1, s2, 1e-10) {
            SegmentIntersection::Point { t1, t2, .. } => {
                assert_relative_eq!(t1, 1.0, epsilon = 1e-10);
                assert_relative_eq!(t2, 0.0, epsilon = 1e-10);
            }
            other => panic!("expected point intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_segments_no_intersection() {
        let s1: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 4.0, 4.0);
        let s2 = Segment2::from_coords(6.0, 4.0, 10.0, 0.0);
        assert_eq!(segments_intersect(s1, s2, 1e-10), SegmentIntersection::None);

        let parallel = Segment2::from_coords(0.0, 1.0, 4.0, 5.0);
        assert_eq!(
            segments_intersect(s1, parallel, 1e-10),
            SegmentIntersection::None
        );
    }

    #[test]
    fn test_segments_collinear() {
        let s1: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);

        match segments_intersect(s1, Segment2::from_coords(5.0, 0.0, 15.0, 0.0), 1e-10) {
            SegmentIntersection::Overlapping { start, end } => {
                assert_relative_eq!(start.x, 5.0, epsilon = 1e-10);
                assert_relative_eq!(end.x, 10.0, epsilon = 1e-10);
            }
            other => panic!("expected overlap, got {other:?}"),
        }

        match segments_intersect(s1, Segment2::from_coords(15.0, 0.0, 10.0, 0.0), 1e-10) {
            SegmentIntersection::Point { point, .. } => {
                assert_relative_eq!(point.x, 10.0, epsilon = 1e-10);
            }
            other => panic!("expected touching point, got {other:?}"),
        }

        assert_eq!(
            segments_intersect(s1, Segment2::from_coords(11.0, 0.0, 15.0, 0.0), 1e-10),
            SegmentIntersection::None
        );
    }

    #[test]
    fn test_degenerate_segment() {
        let s1: Segment2<f64> = Segment2::from_coords(0.0, 0.0, 10.0, 0.0);
        let dot = Segment2::from_coords(3.0, 0.0, 3.0, 0.0);
        assert!(segments_intersect(s1, dot, 1e-10).is_some());
        assert!(segments_intersect(dot, s1, 1e-10).is_some());

        let off = Segment2::from_coords(3.0, 1.0, 3.0, 1.0);
        assert!(!segments_intersect(s1, off, 1e-10).is_some());
    }
}
