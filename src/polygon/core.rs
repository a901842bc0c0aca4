//! Core polygon type and basic operations.

use crate::bounds::Aabb2;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::point_on_segment;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A polygon represented as a sequence of vertices.
///
/// The polygon is implicitly closed (the last vertex connects to the first).
/// Polygons coming out of [`normalize_perimeter`](super::normalize_perimeter)
/// are simple and counter-clockwise; other constructors make no such promise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon<F> {
    /// The vertices of the polygon.
    pub vertices: Vec<Point2<F>>,
}

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    /// Strictly inside, farther than the tolerance from every edge.
    Inside,
    /// Within the tolerance of an edge.
    Boundary,
    /// Strictly outside.
    Outside,
}

impl PointLocation {
    /// `Inside` or `Boundary`.
    #[inline]
    pub fn is_inside_or_on(self) -> bool {
        self != PointLocation::Outside
    }
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over the closed ring of edges, last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        let n = self.vertices.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| Segment2::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the length of the closed boundary.
    pub fn perimeter(&self) -> F {
        self.edges().fold(F::zero(), |acc, e| acc + e.length())
    }

    pub fn bounding_box(&self) -> Option<Aabb2<F>> {
        Aabb2::from_points(self.vertices.iter().copied())
    }

    /// Classifies a point as inside, on the boundary of, or outside the polygon.
    pub fn locate(&self, point: Point2<F>, eps: F) -> PointLocation {
        locate_point(&self.vertices, point, eps)
    }

    /// Ensures the polygon has CCW winding order.
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < F::zero() {
            self.vertices.reverse();
        }
    }
}

/// Computes the signed area of a polygon using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    let n = vertices.len();
    if n < 3 {
        return F::zero();
    }

    // Centering on the first vertex keeps the cross products small when the
    // drawing sits far from the origin.
    let o = vertices[0];
    let mut twice = F::zero();
    for i in 1..n - 1 {
        let a = vertices[i] - o;
        let b = vertices[i + 1] - o;
        twice = twice + a.cross(b);
    }

    twice / (F::one() + F::one())
}

/// Computes the absolute area of a polygon.
pub fn polygon_area<F: Float>(vertices: &[Point2<F>]) -> F {
    polygon_signed_area(vertices).abs()
}

/// Locates a point against a polygon ring.
///
/// Points within `eps` of any edge are `Boundary`; the rest are decided by
/// even-odd ray casting.
pub fn locate_point<F: Float>(vertices: &[Point2<F>], point: Point2<F>, eps: F) -> PointLocation {
    let n = vertices.len();
    if n < 3 {
        return PointLocation::Outside;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if point_on_segment(point, Segment2::new(vj, vi), eps) {
            return PointLocation::Boundary;
        }

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}
