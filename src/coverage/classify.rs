//! Per-cell classification against a perimeter polygon.

use crate::error::CoverageError;
use crate::grid::GridCell;
use crate::polygon::{clipped_area, PointLocation, Polygon};
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

/// How a grid cell relates to the perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellClass {
    /// Entirely inside the perimeter.
    Full,
    /// Crossed by the perimeter.
    Partial,
    /// Entirely outside the perimeter.
    None,
}

/// A cell together with its classification and covered area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCell {
    pub cell: GridCell,
    pub class: CellClass,
    /// Area of the cell inside the perimeter: the whole cell for `Full`,
    /// strictly between zero and the cell area for `Partial`, zero for `None`.
    pub area: f64,
    /// Perimeter length inside the closed cell. Only measured for `Partial`.
    pub boundary_length: f64,
    /// Perimeter length inside the open cell interior, excluding stretches
    /// running along the cell's sides. Only measured for `Partial`.
    pub crossing_length: f64,
}

impl ClassifiedCell {
    fn whole(cell: GridCell, class: CellClass, area: f64) -> Self {
        Self {
            cell,
            class,
            area,
            boundary_length: 0.0,
            crossing_length: 0.0,
        }
    }

    /// Fraction of the cell covered by the perimeter, in [0, 1].
    pub fn fill_ratio(&self) -> f64 {
        let cell_area = self.cell.area();
        if cell_area > 0.0 {
            (self.area / cell_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Classifies grid cells against one validated perimeter.
///
/// Holds only shared references, so one classifier can be used from many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct CellClassifier<'a> {
    polygon: &'a Polygon<f64>,
    cell_area: f64,
    tol: Tolerance<f64>,
}

impl<'a> CellClassifier<'a> {
    /// `polygon` must be simple and counter-clockwise, as produced by
    /// [`normalize_perimeter`](crate::polygon::normalize_perimeter).
    ///
    /// `cell_area` is the nominal `width * height` reported for `Full` cells.
    /// Cell rectangles far from the origin can differ from it by rounding.
    pub fn new(polygon: &'a Polygon<f64>, cell_area: f64, tol: Tolerance<f64>) -> Self {
        Self {
            polygon,
            cell_area,
            tol,
        }
    }

    /// Classifies one cell as `Full`, `Partial` or `None`.
    ///
    /// Cells whose interior no edge enters are decided from their corners and
    /// center alone. Everything else is clipped; clipped areas within a
    /// sliver of zero or of the whole cell are snapped to `None` or `Full`.
    pub fn classify(&self, cell: &GridCell) -> Result<ClassifiedCell, CoverageError> {
        let eps = self.tol.eps();
        let rect = cell.rect;
        let rect_area = rect.area();

        let corners = rect.corners().map(|c| self.polygon.locate(c, eps));
        let center = self.polygon.locate(rect.center(), eps);
        let crossed = self.edges_enter(cell);

        if !crossed {
            if center != PointLocation::Outside && corners.iter().all(|c| c.is_inside_or_on()) {
                trace!(column = cell.column, row = cell.row, "full");
                return Ok(ClassifiedCell::whole(*cell, CellClass::Full, self.cell_area));
            }
            if center == PointLocation::Outside
                && !corners.iter().any(|&c| c == PointLocation::Inside)
            {
                trace!(column = cell.column, row = cell.row, "none");
                return Ok(ClassifiedCell::whole(*cell, CellClass::None, 0.0));
            }
        }

        let area = clipped_area(self.polygon, rect);
        let sliver = self.tol.sliver_area(rect.width(), rect.height());

        if !area.is_finite() || area < -sliver || area > rect_area + sliver {
            error!(
                column = cell.column,
                row = cell.row,
                area,
                rect_area,
                "clipped area out of range"
            );
            return Err(CoverageError::InternalGeometry(format!(
                "cell ({}, {}) clipped to area {} outside [0, {}]",
                cell.column, cell.row, area, rect_area
            )));
        }

        if area <= sliver {
            trace!(column = cell.column, row = cell.row, area, "sliver snapped to none");
            return Ok(ClassifiedCell::whole(*cell, CellClass::None, 0.0));
        }
        if area >= rect_area - sliver {
            trace!(column = cell.column, row = cell.row, area, "sliver snapped to full");
            return Ok(ClassifiedCell::whole(*cell, CellClass::Full, self.cell_area));
        }

        let (boundary_length, crossing_length) = self.boundary_lengths(cell);
        trace!(column = cell.column, row = cell.row, area, "partial");
        Ok(ClassifiedCell {
            cell: *cell,
            class: CellClass::Partial,
            area,
            boundary_length,
            crossing_length,
        })
    }

    /// Returns `true` if some perimeter edge reaches the cell's open interior.
    fn edges_enter(&self, cell: &GridCell) -> bool {
        match cell.rect.shrink(self.tol.eps()) {
            Some(inner) => self
                .polygon
                .edges()
                .any(|edge| inner.clip_segment(edge).is_some()),
            // Thinner than the tolerance: let the clip decide.
            None => true,
        }
    }

    fn boundary_lengths(&self, cell: &GridCell) -> (f64, f64) {
        let inner = cell.rect.shrink(self.tol.eps());
        self.polygon.edges().fold((0.0, 0.0), |(closed, open), edge| {
            let inside_open = inner.map_or(0.0, |r| r.clipped_length(edge));
            (closed + cell.rect.clipped_length(edge), open + inside_open)
        })
    }
}
