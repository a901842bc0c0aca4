//! Polygon clipping against axis-aligned rectangles.

use crate::bounds::Aabb2;
use crate::polygon::core::Polygon;
use crate::primitives::Point2;
use num_traits::Float;

/// One side of a rectangle, seen as the half-plane that keeps the interior.
#[derive(Debug, Clone, Copy, PartialEq)]
enum HalfPlane<F> {
    /// Keeps `x >= value`.
    Left(F),
    /// Keeps `x <= value`.
    Right(F),
    /// Keeps `y >= value`.
    Bottom(F),
    /// Keeps `y <= value`.
    Top(F),
}

impl<F: Float> HalfPlane<F> {
    #[inline]
    fn contains(self, p: Point2<F>) -> bool {
        match self {
            HalfPlane::Left(v) => p.x >= v,
            HalfPlane::Right(v) => p.x <= v,
            HalfPlane::Bottom(v) => p.y >= v,
            HalfPlane::Top(v) => p.y <= v,
        }
    }

    /// Where the segment `a -> b` crosses the boundary line.
    ///
    /// Only called when `a` and `b` are on opposite sides, so the divisor is
    /// never zero. The coordinate on the boundary is snapped exactly.
    #[inline]
    fn crossing(self, a: Point2<F>, b: Point2<F>) -> Point2<F> {
        match self {
            HalfPlane::Left(v) | HalfPlane::Right(v) => {
                let t = (v - a.x) / (b.x - a.x);
                Point2::new(v, a.y + (b.y - a.y) * t)
            }
            HalfPlane::Bottom(v) | HalfPlane::Top(v) => {
                let t = (v - a.y) / (b.y - a.y);
                Point2::new(a.x + (b.x - a.x) * t, v)
            }
        }
    }
}

/// Clips a polygon to a rectangle with the Sutherland–Hodgman algorithm.
///
/// The subject is clipped successively against the rectangle's four
/// half-planes. Concave subjects may produce zero-width bridges along the
/// rectangle's sides; they contribute no area, so the shoelace area of the
/// result is the exact intersection area.
///
/// # Example
///
/// ```
/// use gridcover::bounds::Aabb2;
/// use gridcover::polygon::{clip_to_rect, Polygon};
/// use gridcover::Point2;
///
/// let triangle = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(0.0, 6.0),
/// ]);
/// let cell = Aabb2::new(Point2::new(5.0, 0.0), Point2::new(10.0, 3.0));
///
/// let clipped: Polygon<f64> = clip_to_rect(&triangle, cell);
/// assert!((clipped.area() - 7.5).abs() < 1e-12);
/// ```
pub fn clip_to_rect<F: Float>(subject: &Polygon<F>, rect: Aabb2<F>) -> Polygon<F> {
    if subject.is_empty() {
        return Polygon::empty();
    }

    let planes = [
        HalfPlane::Left(rect.min.x),
        HalfPlane::Right(rect.max.x),
        HalfPlane::Bottom(rect.min.y),
        HalfPlane::Top(rect.max.y),
    ];

    let mut output = subject.vertices.clone();

    for plane in planes {
        if output.is_empty() {
            break;
        }

        let input = std::mem::take(&mut output);
        let n = input.len();
        for j in 0..n {
            let current = input[j];
            let next = input[(j + 1) % n];

            let current_inside = plane.contains(current);
            let next_inside = plane.contains(next);

            if current_inside {
                output.push(current);
                if !next_inside {
                    output.push(plane.crossing(current, next));
                }
            } else if next_inside {
                output.push(plane.crossing(current, next));
            }
        }
    }

    Polygon::new(output)
}

/// Area of the intersection of `subject` and `rect`.
///
/// Signed like the subject: a CCW subject gives a non-negative area.
pub fn clipped_area<F: Float>(subject: &Polygon<F>, rect: Aabb2<F>) -> F {
    clip_to_rect(subject, rect).signed_area()
}
