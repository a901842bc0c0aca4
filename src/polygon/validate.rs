//! Perimeter validation and normalization.
//!
//! Turns a user-drawn point sequence into a simple, counter-clockwise
//! [`Polygon`]. Crossing perimeters are rejected, never repaired: repairing
//! would silently change the area the user drew.
//!
//! # Example
//!
//! ```
//! use gridcover::polygon::normalize_perimeter;
//! use gridcover::tolerance::Tolerance;
//! use gridcover::{CoverageError, Point2};
//!
//! // Clockwise, with a duplicated click and an explicit closing point.
//! let drawn = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 6.0),
//!     Point2::new(0.0, 6.0),
//!     Point2::new(10.0, 6.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(0.0, 0.0),
//! ];
//! let tol = Tolerance::for_points(&drawn);
//! let polygon = normalize_perimeter(&drawn, tol).unwrap();
//! assert_eq!(polygon.len(), 4);
//! assert!(polygon.signed_area() > 0.0);
//!
//! let bowtie = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(0.0, 2.0),
//! ];
//! assert!(matches!(
//!     normalize_perimeter(&bowtie, tol),
//!     Err(CoverageError::SelfIntersectingPolygon { .. })
//! ));
//! ```

use super::core::Polygon;
use crate::error::CoverageError;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{orient2d, segments_intersect, Orientation, SegmentIntersection, Tolerance};
use num_traits::Float;
use tracing::debug;

/// Validates a drawn perimeter and returns it as a simple CCW polygon.
///
/// Steps, in order: reject non-finite coordinates, drop consecutive duplicate
/// points, drop closing points that repeat the first, require 3 distinct
/// non-collinear points, reject self-intersections, require a non-zero area,
/// and reverse clockwise input.
pub fn normalize_perimeter<F: Float>(
    points: &[Point2<F>],
    tol: Tolerance<F>,
) -> Result<Polygon<F>, CoverageError> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(CoverageError::NonFiniteCoordinate { index });
    }

    let eps = tol.eps();
    let mut vertices = remove_duplicate_vertices(points, eps);
    while vertices.len() > 1 && vertices[vertices.len() - 1].approx_eq(vertices[0], eps) {
        vertices.pop();
    }

    if vertices.len() < 3 || all_collinear(&vertices, eps) {
        return Err(CoverageError::DegeneratePolygon);
    }

    let mut polygon = Polygon::new(vertices);

    // A bowtie also has zero signed area, so crossings are checked before
    // the area test to report the right error.
    if let Some((first_edge, second_edge)) = find_self_intersection(&polygon, eps) {
        return Err(CoverageError::SelfIntersectingPolygon {
            first_edge,
            second_edge,
        });
    }

    if polygon.area() <= eps * polygon.perimeter() {
        return Err(CoverageError::DegeneratePolygon);
    }

    polygon.ensure_ccw();
    debug!(
        input = points.len(),
        vertices = polygon.len(),
        "perimeter normalized"
    );
    Ok(polygon)
}

/// Removes consecutive vertices closer than `eps` to the previous kept one.
pub fn remove_duplicate_vertices<F: Float>(points: &[Point2<F>], eps: F) -> Vec<Point2<F>> {
    let mut result: Vec<Point2<F>> = Vec::with_capacity(points.len());
    for &p in points {
        match result.last() {
            Some(&last) if last.approx_eq(p, eps) => {}
            _ => result.push(p),
        }
    }
    result
}

/// Returns `true` if every vertex lies within `eps` of one line.
fn all_collinear<F: Float>(vertices: &[Point2<F>], eps: F) -> bool {
    let anchor = vertices[0];
    let far = vertices
        .iter()
        .copied()
        .fold(anchor, |best, v| {
            if anchor.distance_squared(v) > anchor.distance_squared(best) {
                v
            } else {
                best
            }
        });

    if anchor.approx_eq(far, eps) {
        return true;
    }

    vertices
        .iter()
        .all(|&v| orient2d(anchor, far, v, eps) == Orientation::Collinear)
}

/// Returns the first pair of edges that make the ring non-simple.
///
/// Non-adjacent edges may not meet at all. Adjacent edges may only share
/// their common vertex; a collinear overlap means the outline folds back on
/// itself.
pub fn find_self_intersection<F: Float>(polygon: &Polygon<F>, eps: F) -> Option<(usize, usize)> {
    let edges: Vec<Segment2<F>> = polygon.edges().collect();
    let n = edges.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            let hit = segments_intersect(edges[i], edges[j], eps);
            let bad = if adjacent {
                matches!(hit, SegmentIntersection::Overlapping { .. })
            } else {
                hit.is_some()
            };
            if bad {
                return Some((i, j));
            }
        }
    }

    None
}

/// Returns `true` if no two edges of the ring cross, touch or overlap.
pub fn is_simple<F: Float>(polygon: &Polygon<F>, eps: F) -> bool {
    find_self_intersection(polygon, eps).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn normalize(coords: &[(f64, f64)]) -> Result<Polygon<f64>, CoverageError> {
        let points = pts(coords);
        normalize_perimeter(&points, Tolerance::for_points(&points))
    }

    #[test]
    fn test_ccw_input_is_kept() {
        let poly = normalize(&[(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (0.0, 6.0)]).unwrap();
        assert_eq!(poly.vertices[0], Point2::new(0.0, 0.0));
        assert_eq!(poly.vertices[1], Point2::new(10.0, 0.0));
        assert_relative_eq!(poly.signed_area(), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cw_input_is_reversed() {
        let poly = normalize(&[(0.0, 0.0), (0.0, 6.0), (10.0, 6.0), (10.0, 0.0)]).unwrap();
        assert_relative_eq!(poly.signed_area(), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_duplicates_and_closing_point_removed() {
        let poly = normalize(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 1e-12),
            (10.0, 6.0),
            (0.0, 6.0),
            (0.0, 0.0),
            (0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.len(), 4);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            normalize(&[(0.0, 0.0), (1.0, 1.0)]),
            Err(CoverageError::DegeneratePolygon)
        );
        assert_eq!(
            normalize(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 0.0)]),
            Err(CoverageError::DegeneratePolygon)
        );
        assert_eq!(normalize(&[]), Err(CoverageError::DegeneratePolygon));
    }

    #[test]
    fn test_zero_area() {
        assert_eq!(
            normalize(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
            Err(CoverageError::DegeneratePolygon)
        );
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(
            normalize(&[(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)]),
            Err(CoverageError::NonFiniteCoordinate { index: 1 })
        );
    }

    #[test]
    fn test_bowtie_rejected() {
        assert_eq!(
            normalize(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]),
            Err(CoverageError::SelfIntersectingPolygon {
                first_edge: 0,
                second_edge: 2
            })
        );
    }

    #[test]
    fn test_vertex_touching_edge_rejected() {
        // Vertex (5, 0) lies on the first edge's span: the outline pinches.
        let result = normalize(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 6.0),
            (5.0, 0.0),
            (0.0, 6.0),
        ]);
        assert!(matches!(
            result,
            Err(CoverageError::SelfIntersectingPolygon { .. })
        ));
    }

    #[test]
    fn test_fold_back_rejected() {
        // Spike: goes out to (15, 3) and straight back along the same line.
        let result = normalize(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 3.0),
            (15.0, 3.0),
            (12.0, 3.0),
            (10.0, 3.0 + 1e-3),
            (10.0, 6.0),
            (0.0, 6.0),
        ]);
        assert!(matches!(
            result,
            Err(CoverageError::SelfIntersectingPolygon { .. })
        ));
    }

    #[test]
    fn test_collinear_vertices_allowed() {
        let poly = normalize(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 6.0), (0.0, 6.0)]).unwrap();
        assert_eq!(poly.len(), 5);
        assert!(is_simple(&poly, 1e-9));
    }

    #[test]
    fn test_remove_duplicate_vertices() {
        let points = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0)]);
        assert_eq!(remove_duplicate_vertices(&points, 1e-9).len(), 2);
    }
}
