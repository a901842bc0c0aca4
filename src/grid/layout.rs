//! Index ranges and lazy cell generation.

use super::GridSpec;
use crate::bounds::Aabb2;
use crate::error::CoverageError;
use crate::primitives::Point2;
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Largest number of cells one layout may hold.
pub const MAX_GRID_CELLS: usize = 10_000_000;

/// Largest cell index magnitude; every index up to it is exact in `f64`.
const MAX_CELL_INDEX: f64 = 9_007_199_254_740_992.0;

/// One candidate grid cell.
///
/// `column` and `row` count cells from the grid origin: column `c` spans
/// `origin.x + c * width ..= origin.x + (c + 1) * width`. They are negative
/// for cells left of or below an overridden origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub column: i64,
    pub row: i64,
    pub rect: Aabb2<f64>,
}

impl GridCell {
    #[inline]
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.rect.center()
    }
}

/// The block of cells overlapping a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    origin: Point2<f64>,
    cell_width: f64,
    cell_height: f64,
    first_column: i64,
    first_row: i64,
    columns: usize,
    rows: usize,
}

impl GridLayout {
    /// Computes the columns and rows whose cells overlap `bbox` with positive area.
    ///
    /// A bbox side that lies within tolerance of a grid line does not pull in
    /// the neighbouring row or column. A degenerate bbox yields an empty layout.
    ///
    /// # Errors
    ///
    /// [`CoverageError::GridTooLarge`] if the block holds more than
    /// [`MAX_GRID_CELLS`] cells, and [`CoverageError::GridIndexOutOfRange`]
    /// if the origin is too far from `bbox` for exact cell indices.
    pub fn covering(
        bbox: Aabb2<f64>,
        spec: &GridSpec,
        tol: Tolerance<f64>,
    ) -> Result<Self, CoverageError> {
        let origin = spec.origin.unwrap_or(bbox.min);
        let (w, h) = (spec.cell_width, spec.cell_height);

        let empty = Self {
            origin,
            cell_width: w,
            cell_height: h,
            first_column: 0,
            first_row: 0,
            columns: 0,
            rows: 0,
        };

        if bbox.is_degenerate(tol.eps()) || !(w > 0.0 && h > 0.0) {
            return Ok(empty);
        }

        let (first_column, columns) = index_range(bbox.min.x, bbox.max.x, origin.x, w, tol.eps());
        let (first_row, rows) = index_range(bbox.min.y, bbox.max.y, origin.y, h, tol.eps());

        let too_large = CoverageError::GridTooLarge {
            columns,
            rows,
            max: MAX_GRID_CELLS,
        };
        let limit = MAX_GRID_CELLS as f64;
        if !(columns <= limit && rows <= limit) {
            return Err(too_large);
        }

        let in_range = |first: f64, count: f64| {
            first.abs() <= MAX_CELL_INDEX && (first + count).abs() <= MAX_CELL_INDEX
        };
        if !(in_range(first_column, columns) && in_range(first_row, rows)) {
            return Err(CoverageError::GridIndexOutOfRange {
                column: first_column,
                row: first_row,
            });
        }

        let (columns, rows) = (columns as usize, rows as usize);
        match columns.checked_mul(rows) {
            Some(n) if n <= MAX_GRID_CELLS => {}
            _ => return Err(too_large),
        }

        Ok(Self {
            first_column: first_column as i64,
            first_row: first_row as i64,
            columns,
            rows,
            ..empty
        })
    }

    #[inline]
    pub fn origin(&self) -> Point2<f64> {
        self.origin
    }

    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Index of the leftmost column.
    #[inline]
    pub fn first_column(&self) -> i64 {
        self.first_column
    }

    /// Index of the bottom row.
    #[inline]
    pub fn first_row(&self) -> i64 {
        self.first_row
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Geometry of the cell at a grid index.
    ///
    /// Both edges are computed from the origin, so neighbouring cells share
    /// bit-identical sides.
    pub fn cell(&self, column: i64, row: i64) -> GridCell {
        let x0 = self.origin.x + column as f64 * self.cell_width;
        let x1 = self.origin.x + (column + 1) as f64 * self.cell_width;
        let y0 = self.origin.y + row as f64 * self.cell_height;
        let y1 = self.origin.y + (row + 1) as f64 * self.cell_height;
        GridCell {
            column,
            row,
            rect: Aabb2::new(Point2::new(x0, y0), Point2::new(x1, y1)),
        }
    }

    /// Lazily iterates the cells in row-major order.
    ///
    /// Rows go bottom to top (increasing y); within a row, columns go left to
    /// right. Call again to restart.
    pub fn cells(&self) -> GridCells {
        GridCells {
            layout: *self,
            next: 0,
        }
    }
}

/// Returns the first index and count of cells overlapping `[lo, hi]`.
///
/// Both are whole numbers kept as `f64` until the caller has range-checked them.
fn index_range(lo: f64, hi: f64, origin: f64, size: f64, eps: f64) -> (f64, f64) {
    let snap = eps / size;
    let first = ((lo - origin) / size + snap).floor();
    let end = ((hi - origin) / size - snap).ceil();
    let count = if end > first { end - first } else { 0.0 };
    (first, count)
}

/// Row-major iterator over the cells of a [`GridLayout`].
#[derive(Debug, Clone)]
pub struct GridCells {
    layout: GridLayout,
    next: usize,
}

impl Iterator for GridCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.next >= self.layout.len() {
            return None;
        }
        let row = (self.next / self.layout.columns) as i64;
        let column = (self.next % self.layout.columns) as i64;
        self.next += 1;
        Some(
            self.layout
                .cell(self.layout.first_column + column, self.layout.first_row + row),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridCells {}

impl FusedIterator for GridCells {}
