//! Aggregation of classified cells into a coverage report.

use super::classify::{CellClass, ClassifiedCell};
use crate::grid::GridLayout;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use serde::{Deserialize, Serialize};

/// Result of one coverage computation.
///
/// `cells` lists every candidate cell in row-major order (bottom row first,
/// left to right), which is the order a renderer shades them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Area enclosed by the perimeter, in square meters.
    pub polygon_area: f64,
    /// Length of the perimeter, in meters.
    pub perimeter_length: f64,
    /// Sum of `Full` cell areas and `Partial` intersection areas.
    pub covered_area: f64,
    /// `full_count * cell_width * cell_height`.
    pub full_area: f64,
    pub partial_area: f64,
    /// Polygon area not accounted for by any cell, clamped at zero.
    pub uncovered_area: f64,
    /// `covered_area / polygon_area`, in [0, 1].
    pub coverage_ratio: f64,
    pub full_count: usize,
    pub partial_count: usize,
    pub none_count: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Effective grid origin (the bounding-box corner unless overridden).
    pub origin: Point2<f64>,
    pub cells: Vec<ClassifiedCell>,
}

impl CoverageReport {
    /// Sums classified cells into a report.
    ///
    /// Cells may arrive in any order; they are stably sorted back into
    /// row-major order first.
    pub fn aggregate(
        polygon: &Polygon<f64>,
        layout: &GridLayout,
        mut cells: Vec<ClassifiedCell>,
    ) -> Self {
        cells.sort_by_key(|c| (c.cell.row, c.cell.column));

        let mut full_count: usize = 0;
        let mut partial_count = 0;
        let mut none_count = 0;
        let mut partial_area = 0.0;

        for c in &cells {
            match c.class {
                CellClass::Full => full_count += 1,
                CellClass::Partial => {
                    partial_count += 1;
                    partial_area += c.area;
                }
                CellClass::None => none_count += 1,
            }
        }

        let full_area = full_count as f64 * layout.cell_width() * layout.cell_height();
        let polygon_area = polygon.area();
        let covered_area = full_area + partial_area;
        let coverage_ratio = if polygon_area > 0.0 {
            (covered_area / polygon_area).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            polygon_area,
            perimeter_length: polygon.perimeter(),
            covered_area,
            full_area,
            partial_area,
            uncovered_area: (polygon_area - covered_area).max(0.0),
            coverage_ratio,
            full_count,
            partial_count,
            none_count,
            cell_width: layout.cell_width(),
            cell_height: layout.cell_height(),
            origin: layout.origin(),
            cells,
        }
    }

    /// Total number of candidate cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells of one class, in row-major order.
    pub fn cells_of(&self, class: CellClass) -> impl Iterator<Item = &ClassifiedCell> + '_ {
        self.cells.iter().filter(move |c| c.class == class)
    }
}
