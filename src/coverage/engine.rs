//! The coverage pipeline: validate, generate, classify, aggregate.

use super::classify::{CellClassifier, ClassifiedCell};
use super::report::CoverageReport;
use crate::error::CoverageError;
use crate::grid::{GridLayout, GridSpec};
use crate::polygon::normalize_perimeter;
use crate::primitives::Point2;
use crate::tolerance::Tolerance;
use tracing::debug;

/// Computes how a regular grid covers a drawn perimeter.
///
/// `points` is the perimeter in meters, in drawing order; it may repeat the
/// first point at the end and may be clockwise. The grid's cells are
/// `grid.cell_width` x `grid.cell_height`, anchored at `grid.origin` or, if
/// that is `None`, at the minimum corner of the perimeter's bounding box.
///
/// The function is pure: identical inputs give identical reports.
///
/// # Errors
///
/// Input problems ([`CoverageError::DegeneratePolygon`],
/// [`CoverageError::SelfIntersectingPolygon`],
/// [`CoverageError::NonFiniteCoordinate`], [`CoverageError::InvalidGrid`])
/// are reported before any cell is generated, as are grids too large to lay
/// out ([`CoverageError::GridTooLarge`],
/// [`CoverageError::GridIndexOutOfRange`]).
///
/// # Example
///
/// ```
/// use gridcover::{compute_coverage, GridSpec, Point2};
///
/// let perimeter = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 6.0),
///     Point2::new(0.0, 6.0),
/// ];
///
/// let report = compute_coverage(&perimeter, &GridSpec::greenhouse()).unwrap();
/// assert_eq!(report.full_count, 4);
/// assert_eq!(report.partial_count, 0);
/// assert_eq!(report.polygon_area, 60.0);
/// assert_eq!(report.coverage_ratio, 1.0);
/// ```
pub fn compute_coverage(
    points: &[Point2<f64>],
    grid: &GridSpec,
) -> Result<CoverageReport, CoverageError> {
    grid.validate()?;

    let tol = Tolerance::for_points(points.iter().chain(grid.origin.iter()));
    let polygon = normalize_perimeter(points, tol)?;

    let bbox = polygon
        .bounding_box()
        .ok_or(CoverageError::DegeneratePolygon)?;
    let layout = GridLayout::covering(bbox, grid, tol)?;
    debug!(
        columns = layout.columns(),
        rows = layout.rows(),
        first_column = layout.first_column(),
        first_row = layout.first_row(),
        "grid laid out"
    );

    let classifier = CellClassifier::new(&polygon, grid.cell_area(), tol);
    let cells = classify_all(&classifier, &layout)?;
    let report = CoverageReport::aggregate(&polygon, &layout, cells);

    debug!(
        full = report.full_count,
        partial = report.partial_count,
        none = report.none_count,
        covered_area = report.covered_area,
        polygon_area = report.polygon_area,
        "coverage computed"
    );
    Ok(report)
}

#[cfg(not(feature = "parallel"))]
fn classify_all(
    classifier: &CellClassifier<'_>,
    layout: &GridLayout,
) -> Result<Vec<ClassifiedCell>, CoverageError> {
    layout
        .cells()
        .map(|cell| classifier.classify(&cell))
        .collect()
}

#[cfg(feature = "parallel")]
fn classify_all(
    classifier: &CellClassifier<'_>,
    layout: &GridLayout,
) -> Result<Vec<ClassifiedCell>, CoverageError> {
    use rayon::prelude::*;

    let cells: Vec<_> = layout.cells().collect();
    cells
        .par_iter()
        .map(|cell| classifier.classify(cell))
        .collect()
}
